//! Domain tests for the list aggregate.

use crate::list::domain::{
    DEFAULT_LIST_COLOR, DEFAULT_LIST_ICON, ListDomainError, ListPatch, TaskList,
};
use crate::workspace::domain::{UserId, WorkspaceId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn list() -> TaskList {
    TaskList::new(
        "  Roadmap ",
        WorkspaceId::new(),
        3,
        UserId::new(),
        &DefaultClock,
    )
    .expect("list should be valid")
}

#[rstest]
fn new_list_trims_name_and_applies_defaults(list: TaskList) {
    assert_eq!(list.name(), "Roadmap");
    assert_eq!(list.color(), DEFAULT_LIST_COLOR);
    assert_eq!(list.icon(), DEFAULT_LIST_ICON);
    assert_eq!(list.order(), 3);
    assert_eq!(list.description(), None);
    assert_eq!(list.created_at(), list.updated_at());
}

#[rstest]
fn new_list_rejects_blank_name() {
    let result = TaskList::new("   ", WorkspaceId::new(), 0, UserId::new(), &DefaultClock);
    assert_eq!(result, Err(ListDomainError::EmptyListName));
}

#[rstest]
fn builders_override_defaults(list: TaskList) {
    let customised = list
        .with_description("Quarterly goals")
        .with_color("#ef4444")
        .with_icon("🚀");

    assert_eq!(customised.description(), Some("Quarterly goals"));
    assert_eq!(customised.color(), "#ef4444");
    assert_eq!(customised.icon(), "🚀");
}

#[rstest]
fn patch_applies_only_present_members(mut list: TaskList) {
    let patch: ListPatch = serde_json::from_value(json!({ "name": "Backlog", "order": 9 }))
        .expect("patch should deserialize");

    list.apply_patch(patch, &DefaultClock)
        .expect("patch should apply");

    assert_eq!(list.name(), "Backlog");
    assert_eq!(list.order(), 9);
    assert_eq!(list.color(), DEFAULT_LIST_COLOR);
    assert!(list.updated_at() >= list.created_at());
}

#[rstest]
fn patch_with_null_description_clears_it(list: TaskList) {
    let mut described = list.with_description("Temporary");
    let patch: ListPatch = serde_json::from_value(json!({ "description": null }))
        .expect("patch should deserialize");

    described
        .apply_patch(patch, &DefaultClock)
        .expect("patch should apply");

    assert_eq!(described.description(), None);
}

#[rstest]
fn patch_with_blank_name_leaves_list_unchanged(mut list: TaskList) {
    let before = list.clone();
    let patch = ListPatch {
        name: Some(" ".to_owned()),
        color: Some("#000000".to_owned()),
        ..ListPatch::default()
    };

    let result = list.apply_patch(patch, &DefaultClock);

    assert_eq!(result, Err(ListDomainError::EmptyListName));
    assert_eq!(list, before);
}
