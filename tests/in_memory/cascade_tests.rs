//! Cascade delete and ordering across lists, fields and tasks.

use super::helpers::{App, app};
use rstest::rstest;
use serde_json::json;
use trellis::field::{
    ports::FieldDefinitionRepository as _,
    services::{CreateFieldRequest, FieldServiceError},
};
use trellis::list::services::ListServiceError;
use trellis::task::{
    domain::{TaskQuery, TaskQueryParams},
    ports::TaskRepository as _,
    services::{CreateTaskRequest, TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_list_removes_its_tasks_and_fields(#[future] app: App) {
    let harness = app.await;
    let doomed = harness.list("Engineering").await;
    let survivor = harness.list("Marketing").await;
    harness
        .field(&doomed, CreateFieldRequest::new("Estimate", "number"))
        .await;
    harness
        .field(&survivor, CreateFieldRequest::new("Budget", "number"))
        .await;
    for name in ["Spec", "Build", "Ship"] {
        harness
            .state
            .tasks
            .create(&harness.ctx, doomed.id(), CreateTaskRequest::new(name))
            .await
            .expect("task creation should succeed");
    }
    let kept = harness
        .state
        .tasks
        .create(&harness.ctx, survivor.id(), CreateTaskRequest::new("Launch"))
        .await
        .expect("task creation should succeed");

    let deletion = harness
        .state
        .lists
        .delete(&harness.ctx, doomed.id())
        .await
        .expect("cascade should succeed");

    assert_eq!(deletion.tasks_deleted, 3);
    assert_eq!(deletion.fields_deleted, 1);
    let lookup = harness.state.lists.get(&harness.ctx, doomed.id()).await;
    assert!(matches!(lookup, Err(ListServiceError::NotFound(_))));
    let fields = harness.state.fields.list(&harness.ctx, doomed.id()).await;
    assert!(matches!(fields, Err(FieldServiceError::ListNotFound(_))));
    let tasks = harness
        .state
        .tasks
        .query(&harness.ctx, doomed.id(), &TaskQueryParams::default())
        .await;
    assert!(matches!(tasks, Err(TaskServiceError::ListNotFound(_))));

    let query = TaskQuery::from_params(&TaskQueryParams::default()).expect("query should parse");
    let orphaned = harness
        .repositories
        .tasks
        .query(doomed.id(), &query)
        .await
        .expect("repository query should succeed");
    assert!(orphaned.is_empty());
    let orphaned_fields = harness
        .repositories
        .fields
        .list_by_list(doomed.id())
        .await
        .expect("repository lookup should succeed");
    assert!(orphaned_fields.is_empty());

    let remaining = harness
        .state
        .tasks
        .query(&harness.ctx, survivor.id(), &TaskQueryParams::default())
        .await
        .expect("survivor query should succeed");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining.first().map(|view| view.id), Some(kept.id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sequential_creates_append_in_order(#[future] app: App) {
    let harness = app.await;
    let mut list_orders = Vec::new();
    for name in ["A", "B", "C"] {
        list_orders.push(harness.list(name).await.order());
    }
    let list = harness.list("D").await;
    let mut field_orders = Vec::new();
    for name in ["One", "Two", "Three"] {
        field_orders.push(
            harness
                .field(&list, CreateFieldRequest::new(name, "text"))
                .await
                .order(),
        );
    }
    let mut task_orders = Vec::new();
    for name in ["x", "y", "z"] {
        let view = harness
            .state
            .tasks
            .create(&harness.ctx, list.id(), CreateTaskRequest::new(name))
            .await
            .expect("task creation should succeed");
        task_orders.push(view.order);
    }

    assert_eq!(list_orders, vec![0, 1, 2]);
    assert_eq!(field_orders, vec![0, 1, 2]);
    assert_eq!(task_orders, vec![0, 1, 2]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn select_fields_require_options(#[future] app: App) {
    let harness = app.await;
    let list = harness.list("Engineering").await;

    for kind in ["select", "multi-select"] {
        let missing = harness
            .state
            .fields
            .create(&harness.ctx, list.id(), CreateFieldRequest::new("Team", kind))
            .await;
        assert!(matches!(missing, Err(FieldServiceError::Domain(_))));
    }

    let field = harness
        .field(
            &list,
            CreateFieldRequest::new("Team", "select").with_options(
                serde_json::from_value(json!([{"label": "Backend", "value": "backend"}]))
                    .expect("options should deserialize"),
            ),
        )
        .await;
    let emptied = harness
        .state
        .fields
        .update(
            &harness.ctx,
            list.id(),
            field.id(),
            serde_json::from_value(json!({"options": []})).expect("patch should deserialize"),
        )
        .await;
    assert!(matches!(emptied, Err(FieldServiceError::Domain(_))));
}
