//! Tests for custom field entries carried by tasks.

use crate::field::domain::{
    FieldDefinition, FieldDraft, FieldId, FieldKind, FieldPlacement, FieldValueError,
    SelectOption,
};
use crate::list::domain::ListId;
use crate::task::domain::{
    CustomFieldEntries, CustomFieldValue, TaskDomainError, missing_required,
};
use crate::workspace::domain::{UserId, WorkspaceId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Definitions {
    department: FieldDefinition,
    estimate: FieldDefinition,
    notes: FieldDefinition,
}

impl Definitions {
    fn all(&self) -> Vec<FieldDefinition> {
        vec![
            self.department.clone(),
            self.estimate.clone(),
            self.notes.clone(),
        ]
    }
}

fn define(draft: FieldDraft, order: i64) -> FieldDefinition {
    let placement = FieldPlacement {
        list_id: ListId::new(),
        workspace_id: WorkspaceId::new(),
        order,
        created_by: UserId::new(),
    };
    FieldDefinition::new(draft, placement, &DefaultClock).expect("definition should be valid")
}

#[fixture]
fn definitions() -> Definitions {
    Definitions {
        department: define(
            FieldDraft::new("Department", FieldKind::Select)
                .with_required(true)
                .with_options(vec![
                    SelectOption::new("Engineering", "eng"),
                    SelectOption::new("Quality", "qa"),
                ]),
            0,
        ),
        estimate: define(FieldDraft::new("Estimate", FieldKind::Number), 1),
        notes: define(
            FieldDraft::new("Notes", FieldKind::Text).with_required(true),
            2,
        ),
    }
}

fn entries(pairs: Vec<(FieldId, Value)>) -> CustomFieldEntries {
    CustomFieldEntries::new(
        pairs
            .into_iter()
            .map(|(field_id, value)| CustomFieldValue::new(field_id, value))
            .collect(),
    )
    .expect("entries should be distinct")
}

#[rstest]
fn repeated_field_ids_are_rejected() {
    let field_id = FieldId::new();
    let result = CustomFieldEntries::new(vec![
        CustomFieldValue::new(field_id, json!("a")),
        CustomFieldValue::new(field_id, json!("b")),
    ]);

    assert_eq!(result, Err(TaskDomainError::DuplicateCustomField(field_id)));
}

#[rstest]
fn entries_for_unknown_fields_are_rejected(definitions: Definitions) {
    let stranger = FieldId::new();
    let candidate = entries(vec![(stranger, json!("x"))]);

    assert_eq!(
        candidate.validate_against(&definitions.all()),
        Err(TaskDomainError::UnknownCustomField(stranger))
    );
}

#[rstest]
fn ill_typed_values_name_the_field(definitions: Definitions) {
    let candidate = entries(vec![(definitions.estimate.id(), json!("three"))]);

    let result = candidate.validate_against(&definitions.all());

    assert_eq!(
        result,
        Err(TaskDomainError::InvalidCustomFieldValue {
            field_id: definitions.estimate.id(),
            field_name: "Estimate".to_owned(),
            source: FieldValueError::WrongShape {
                kind: FieldKind::Number,
                expected: FieldKind::Number.value_shape(),
            },
        })
    );
}

#[rstest]
fn replacement_keeps_orphaned_entries(definitions: Definitions) {
    let deleted_field = FieldId::new();
    let stored = entries(vec![
        (definitions.department.id(), json!("eng")),
        (deleted_field, json!("legacy")),
        (definitions.notes.id(), json!("old")),
    ]);
    let replacement = entries(vec![(definitions.department.id(), json!("qa"))]);

    let merged = stored.merge_preserving_orphans(replacement, &definitions.all());

    assert_eq!(merged.get(definitions.department.id()), Some(&json!("qa")));
    assert_eq!(merged.get(deleted_field), Some(&json!("legacy")));
    assert_eq!(merged.get(definitions.notes.id()), None);
    assert_eq!(merged.as_slice().len(), 2);
}

#[rstest]
fn live_entries_follow_definition_order_and_skip_orphans(definitions: Definitions) {
    let stored = entries(vec![
        (definitions.notes.id(), json!("hello")),
        (FieldId::new(), json!("ghost")),
        (definitions.department.id(), json!("qa")),
    ]);
    let all = definitions.all();

    let names: Vec<&str> = stored
        .live(&all)
        .map(|(definition, _)| definition.name())
        .collect();

    assert_eq!(names, vec!["Department", "Notes"]);
}

#[rstest]
fn required_fields_without_usable_values_are_reported(definitions: Definitions) {
    let stored = entries(vec![
        (definitions.department.id(), json!("eng")),
        (definitions.notes.id(), json!("   ")),
    ]);
    let all = definitions.all();

    let missing: Vec<&str> = missing_required(&all, &stored)
        .into_iter()
        .map(FieldDefinition::name)
        .collect();

    assert_eq!(missing, vec!["Notes"]);
}

#[rstest]
fn entries_serialize_as_a_plain_array(definitions: Definitions) {
    let stored = entries(vec![(definitions.estimate.id(), json!(1.5))]);

    let encoded = serde_json::to_value(&stored).expect("entries should serialize");

    assert_eq!(
        encoded,
        json!([{ "fieldId": definitions.estimate.id().to_string(), "value": 1.5 }])
    );
}
