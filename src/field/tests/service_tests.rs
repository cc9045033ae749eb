//! Service tests for the field definition store.

use std::sync::Arc;

use crate::context::RequestContext;
use crate::field::{
    adapters::memory::InMemoryFieldDefinitionRepository,
    domain::{FieldDomainError, FieldId, FieldKind, FieldSettings, SelectOption},
    services::{
        CreateFieldRequest, FieldDefinitionService, FieldServiceError, UpdateFieldRequest,
    },
};
use crate::list::{
    adapters::memory::InMemoryListRepository, domain::TaskList, ports::ListRepository,
};
use crate::workspace::domain::{UserId, WorkspaceId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

type TestService = FieldDefinitionService<
    InMemoryFieldDefinitionRepository,
    InMemoryListRepository,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    lists: Arc<InMemoryListRepository>,
    ctx: RequestContext,
    list: TaskList,
}

impl Harness {
    async fn sibling_list(&self) -> TaskList {
        let list = TaskList::new(
            "Archive",
            self.ctx.workspace_id,
            1,
            self.ctx.user_id,
            &DefaultClock,
        )
        .expect("list should be valid");
        self.lists
            .store(&list)
            .await
            .expect("list store should succeed");
        list
    }
}

#[fixture]
async fn setup() -> Harness {
    let lists = Arc::new(InMemoryListRepository::new());
    let ctx = RequestContext::new(WorkspaceId::new(), UserId::new());
    let list = TaskList::new("Tickets", ctx.workspace_id, 0, ctx.user_id, &DefaultClock)
        .expect("list should be valid");
    lists.store(&list).await.expect("list store should succeed");
    let service = FieldDefinitionService::new(
        Arc::new(InMemoryFieldDefinitionRepository::new()),
        Arc::clone(&lists),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        lists,
        ctx,
        list,
    }
}

fn department_request() -> CreateFieldRequest {
    CreateFieldRequest::new("Department", "select")
        .with_required(true)
        .with_options(vec![
            SelectOption::new("Engineering", "eng"),
            SelectOption::new("Quality", "qa"),
        ])
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_appends_definitions_in_order(#[future] setup: Harness) {
    let harness = setup.await;
    let mut orders = Vec::new();
    for (name, kind) in [("Estimate", "number"), ("Spec", "url"), ("Reviewed", "checkbox")] {
        let field = harness
            .service
            .create(
                &harness.ctx,
                harness.list.id(),
                CreateFieldRequest::new(name, kind),
            )
            .await
            .expect("field creation should succeed");
        orders.push(field.order());
    }

    let fields = harness
        .service
        .list(&harness.ctx, harness.list.id())
        .await
        .expect("listing should succeed");

    assert_eq!(orders, vec![0, 1, 2]);
    let kinds: Vec<FieldKind> = fields.iter().map(|field| field.kind()).collect();
    assert_eq!(
        kinds,
        vec![FieldKind::Number, FieldKind::Url, FieldKind::Checkbox]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_unknown_kind(#[future] setup: Harness) {
    let harness = setup.await;

    let result = harness
        .service
        .create(
            &harness.ctx,
            harness.list.id(),
            CreateFieldRequest::new("Stars", "rating"),
        )
        .await;

    assert!(matches!(
        result,
        Err(FieldServiceError::Domain(FieldDomainError::UnknownFieldKind(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_select_without_options(#[future] setup: Harness) {
    let harness = setup.await;

    let result = harness
        .service
        .create(
            &harness.ctx,
            harness.list.id(),
            CreateFieldRequest::new("Department", "select"),
        )
        .await;
    let fields = harness
        .service
        .list(&harness.ctx, harness.list.id())
        .await
        .expect("listing should succeed");

    assert!(matches!(
        result,
        Err(FieldServiceError::Domain(FieldDomainError::Shape(_)))
    ));
    assert!(fields.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_in_foreign_workspace_is_list_not_found(#[future] setup: Harness) {
    let harness = setup.await;
    let stranger = RequestContext::new(WorkspaceId::new(), harness.ctx.user_id);

    let result = harness
        .service
        .create(&stranger, harness.list.id(), department_request())
        .await;

    assert!(matches!(result, Err(FieldServiceError::ListNotFound(id)) if id == harness.list.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_from_json_payload(#[future] setup: Harness) {
    let harness = setup.await;
    let field = harness
        .service
        .create(&harness.ctx, harness.list.id(), department_request())
        .await
        .expect("field creation should succeed");
    let request: UpdateFieldRequest = serde_json::from_value(json!({
        "name": "Team",
        "required": false,
        "defaultValue": "qa"
    }))
    .expect("payload should deserialize");

    let updated = harness
        .service
        .update(&harness.ctx, harness.list.id(), field.id(), request)
        .await
        .expect("update should succeed");
    let fetched = harness
        .service
        .get(&harness.ctx, harness.list.id(), field.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(updated, fetched);
    assert_eq!(fetched.name(), "Team");
    assert!(!fetched.required());
    assert_eq!(fetched.default_value(), Some(&json!("qa")));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_can_retype_without_touching_options(#[future] setup: Harness) {
    let harness = setup.await;
    let field = harness
        .service
        .create(&harness.ctx, harness.list.id(), department_request())
        .await
        .expect("field creation should succeed");
    let request = UpdateFieldRequest {
        kind: Some("text".to_owned()),
        ..UpdateFieldRequest::default()
    };

    let updated = harness
        .service
        .update(&harness.ctx, harness.list.id(), field.id(), request)
        .await
        .expect("retype should succeed");

    assert_eq!(updated.kind(), FieldKind::Text);
    assert_eq!(updated.options().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_only_the_named_field(#[future] setup: Harness) {
    let harness = setup.await;
    let doomed = harness
        .service
        .create(&harness.ctx, harness.list.id(), department_request())
        .await
        .expect("field creation should succeed");
    let kept = harness
        .service
        .create(
            &harness.ctx,
            harness.list.id(),
            CreateFieldRequest::new("Notes", "text"),
        )
        .await
        .expect("field creation should succeed");

    harness
        .service
        .delete(&harness.ctx, harness.list.id(), doomed.id())
        .await
        .expect("delete should succeed");
    let second_delete = harness
        .service
        .delete(&harness.ctx, harness.list.id(), doomed.id())
        .await;
    let remaining = harness
        .service
        .list(&harness.ctx, harness.list.id())
        .await
        .expect("listing should succeed");

    assert!(matches!(second_delete, Err(FieldServiceError::NotFound(id)) if id == doomed.id()));
    assert_eq!(remaining, vec![kept]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_field_is_not_found(#[future] setup: Harness) {
    let harness = setup.await;
    let missing = FieldId::new();

    let result = harness
        .service
        .get(&harness.ctx, harness.list.id(), missing)
        .await;

    assert!(matches!(result, Err(FieldServiceError::NotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_keeps_number_settings(#[future] setup: Harness) {
    let harness = setup.await;
    let settings = FieldSettings::default()
        .with_range(Some(0.0), Some(100.0))
        .with_placeholder("0-100");

    let created = harness
        .service
        .create(
            &harness.ctx,
            harness.list.id(),
            CreateFieldRequest::new("Score", "number").with_settings(settings.clone()),
        )
        .await
        .expect("field creation should succeed");
    let fetched = harness
        .service
        .get(&harness.ctx, harness.list.id(), created.id())
        .await
        .expect("field lookup should succeed");

    assert_eq!(fetched.settings(), &settings);
    assert_eq!(fetched.settings().placeholder.as_deref(), Some("0-100"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fields_are_invisible_from_sibling_lists(#[future] setup: Harness) {
    let harness = setup.await;
    let sibling = harness.sibling_list().await;
    let field = harness
        .service
        .create(&harness.ctx, harness.list.id(), department_request())
        .await
        .expect("field creation should succeed");

    let lookup = harness
        .service
        .get(&harness.ctx, sibling.id(), field.id())
        .await;
    let delete = harness
        .service
        .delete(&harness.ctx, sibling.id(), field.id())
        .await;
    let remaining = harness
        .service
        .list(&harness.ctx, harness.list.id())
        .await
        .expect("listing should succeed");

    assert!(matches!(lookup, Err(FieldServiceError::NotFound(id)) if id == field.id()));
    assert!(matches!(delete, Err(FieldServiceError::NotFound(id)) if id == field.id()));
    assert_eq!(remaining, vec![field]);
}
