//! Typed custom field values through the task store.

use super::helpers::{App, app};
use rstest::rstest;
use serde_json::{Value, json};
use trellis::field::{
    domain::{FieldSettings, SelectOption},
    services::CreateFieldRequest,
};
use trellis::task::{
    domain::{CustomFieldValue, TaskDomainError, TaskQueryParams},
    ports::TaskRepository as _,
    services::{CreateTaskRequest, TaskServiceError, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn number_values_round_trip(#[future] app: App) {
    let harness = app.await;
    let list = harness.list("Engineering").await;
    let estimate = harness
        .field(
            &list,
            CreateFieldRequest::new("Estimate", "number")
                .with_settings(FieldSettings::default().with_range(Some(0.0), Some(10.0))),
        )
        .await;
    let created = harness
        .state
        .tasks
        .create(
            &harness.ctx,
            list.id(),
            CreateTaskRequest::new("Size it")
                .with_custom_fields(vec![CustomFieldValue::new(estimate.id(), json!(7.5))]),
        )
        .await
        .expect("task creation should succeed");

    let read = harness
        .state
        .tasks
        .get(&harness.ctx, list.id(), created.id)
        .await
        .expect("task lookup should succeed");

    assert_eq!(read.custom_fields.len(), 1);
    let entry = read.custom_fields.first().expect("entry should exist");
    assert_eq!(entry.field_id, estimate.id());
    assert_eq!(entry.value, json!(7.5));

    let out_of_range = harness
        .state
        .tasks
        .create(
            &harness.ctx,
            list.id(),
            CreateTaskRequest::new("Too big")
                .with_custom_fields(vec![CustomFieldValue::new(estimate.id(), json!(11))]),
        )
        .await;
    assert!(matches!(
        out_of_range,
        Err(TaskServiceError::Domain(
            TaskDomainError::InvalidCustomFieldValue { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn department_scenario_rejects_unknown_option(#[future] app: App) {
    let harness = app.await;
    let list = harness.list("Engineering").await;
    let department = harness
        .field(
            &list,
            CreateFieldRequest::new("Department", "select").with_options(vec![
                SelectOption::new("Backend", "backend"),
                SelectOption::new("Frontend", "frontend"),
            ]),
        )
        .await;

    let accepted = harness
        .state
        .tasks
        .create(
            &harness.ctx,
            list.id(),
            CreateTaskRequest::new("API")
                .with_custom_fields(vec![CustomFieldValue::new(department.id(), json!("backend"))]),
        )
        .await
        .expect("a listed option should be accepted");
    let rejected = harness
        .state
        .tasks
        .create(
            &harness.ctx,
            list.id(),
            CreateTaskRequest::new("Testing")
                .with_custom_fields(vec![CustomFieldValue::new(department.id(), json!("qa"))]),
        )
        .await;

    assert_eq!(
        accepted
            .custom_fields
            .first()
            .and_then(|entry| entry.display.clone()),
        Some("Backend".to_owned())
    );
    assert!(matches!(
        rejected,
        Err(TaskServiceError::Domain(
            TaskDomainError::InvalidCustomFieldValue { field_id, .. }
        )) if field_id == department.id()
    ));
    let stored = harness
        .state
        .tasks
        .query(&harness.ctx, list.id(), &TaskQueryParams::default())
        .await
        .expect("query should succeed");
    assert_eq!(stored.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_fields_leave_tasks_readable(#[future] app: App) {
    let harness = app.await;
    let list = harness.list("Engineering").await;
    let doomed = harness
        .field(&list, CreateFieldRequest::new("Legacy", "text"))
        .await;
    let kept = harness
        .field(&list, CreateFieldRequest::new("Notes", "text"))
        .await;
    let task = harness
        .state
        .tasks
        .create(
            &harness.ctx,
            list.id(),
            CreateTaskRequest::new("Migrate").with_custom_fields(vec![
                CustomFieldValue::new(doomed.id(), json!("old")),
                CustomFieldValue::new(kept.id(), json!("first")),
            ]),
        )
        .await
        .expect("task creation should succeed");

    harness
        .state
        .fields
        .delete(&harness.ctx, list.id(), doomed.id())
        .await
        .expect("field delete should succeed");
    let read = harness
        .state
        .tasks
        .get(&harness.ctx, list.id(), task.id)
        .await
        .expect("task should remain readable");
    assert_eq!(read.custom_fields.len(), 1);
    assert_eq!(
        read.custom_fields.first().map(|entry| entry.field_id),
        Some(kept.id())
    );

    harness
        .state
        .tasks
        .update(
            &harness.ctx,
            list.id(),
            task.id,
            UpdateTaskRequest::default()
                .with_custom_fields(vec![CustomFieldValue::new(kept.id(), json!("second"))]),
        )
        .await
        .expect("update should succeed");
    let stored = harness
        .repositories
        .tasks
        .find(list.id(), task.id)
        .await
        .expect("find should succeed")
        .expect("task should exist");
    assert_eq!(
        stored.custom_fields().get(doomed.id()),
        Some(&Value::from("old"))
    );
    assert_eq!(
        stored.custom_fields().get(kept.id()),
        Some(&Value::from("second"))
    );
}
