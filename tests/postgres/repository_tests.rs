//! Service flows persisted through the Diesel adapters.

use super::helpers::{BoxError, postgres_app};
use mockable::DefaultClock;
use serde_json::json;
use trellis::attachment::{
    domain::{Attachment, NewAttachment},
    ports::{AttachmentRepository as _, AttachmentRepositoryError},
};
use trellis::field::{
    domain::SelectOption, ports::FieldDefinitionRepository as _, services::CreateFieldRequest,
};
use trellis::list::services::CreateListRequest;
use trellis::task::{
    domain::{CustomFieldValue, TaskQuery, TaskQueryParams},
    ports::TaskRepository as _,
    services::CreateTaskRequest,
};
use trellis::workspace::{domain::WorkspaceId, services::BootstrapRequest};

#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_reuses_stored_identity() -> Result<(), BoxError> {
    let Some(app) = postgres_app().await? else {
        return Ok(());
    };

    let again = app
        .state
        .workspaces
        .get_or_create(&BootstrapRequest::new(
            "owner@example.com",
            "Owner",
            "My Workspace",
        ))
        .await?;

    assert_eq!(again.context(), app.ctx);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_bootstraps_share_one_workspace() -> Result<(), BoxError> {
    let Some(app) = postgres_app().await? else {
        return Ok(());
    };
    let request = BootstrapRequest::new("racer@example.com", "Racer", "Race");
    let mut handles = Vec::new();
    for _ in 0..8 {
        let state = app.state.clone();
        let bootstrap = request.clone();
        handles.push(tokio::spawn(async move {
            state.workspaces.get_or_create(&bootstrap).await
        }));
    }

    let mut workspace_ids: Vec<WorkspaceId> = Vec::new();
    for handle in handles {
        workspace_ids.push(handle.await??.workspace.id());
    }
    workspace_ids.dedup();

    assert_eq!(workspace_ids.len(), 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn tasks_round_trip_with_custom_fields() -> Result<(), BoxError> {
    let Some(app) = postgres_app().await? else {
        return Ok(());
    };
    let list = app
        .state
        .lists
        .create(&app.ctx, CreateListRequest::new("Engineering"))
        .await?;
    let field = app
        .state
        .fields
        .create(
            &app.ctx,
            list.id(),
            CreateFieldRequest::new("Department", "select")
                .with_options(vec![SelectOption::new("Backend", "backend")]),
        )
        .await?;
    for name in ["Second", "First"] {
        app.state
            .tasks
            .create(
                &app.ctx,
                list.id(),
                CreateTaskRequest::new(name)
                    .with_custom_fields(vec![CustomFieldValue::new(field.id(), json!("backend"))]),
            )
            .await?;
    }

    let sorted: TaskQueryParams = serde_json::from_value(json!({ "sortField": "name" }))?;
    let views = app.state.tasks.query(&app.ctx, list.id(), &sorted).await?;

    let names: Vec<&str> = views.iter().map(|view| view.name.as_str()).collect();
    assert_eq!(names, ["First", "Second"]);
    assert!(views.iter().all(|view| {
        view.custom_fields
            .first()
            .is_some_and(|entry| entry.value == json!("backend"))
    }));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn list_delete_cascades_in_storage() -> Result<(), BoxError> {
    let Some(app) = postgres_app().await? else {
        return Ok(());
    };
    let list = app
        .state
        .lists
        .create(&app.ctx, CreateListRequest::new("Doomed"))
        .await?;
    app.state
        .fields
        .create(&app.ctx, list.id(), CreateFieldRequest::new("Notes", "text"))
        .await?;
    app.state
        .tasks
        .create(&app.ctx, list.id(), CreateTaskRequest::new("One"))
        .await?;

    let deletion = app.state.lists.delete(&app.ctx, list.id()).await?;

    assert_eq!(deletion.tasks_deleted, 1);
    assert_eq!(deletion.fields_deleted, 1);
    let tasks = app
        .repositories
        .tasks
        .query(list.id(), &TaskQuery::default())
        .await?;
    let fields = app.repositories.fields.list_by_list(list.id()).await?;
    assert!(tasks.is_empty());
    assert!(fields.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn storage_ids_are_unique() -> Result<(), BoxError> {
    let Some(app) = postgres_app().await? else {
        return Ok(());
    };
    let list = app
        .state
        .lists
        .create(&app.ctx, CreateListRequest::new("Docs"))
        .await?;
    let task = app
        .state
        .tasks
        .create(&app.ctx, list.id(), CreateTaskRequest::new("Attach"))
        .await?;
    let upload = || {
        Attachment::new(
            NewAttachment {
                task_id: task.id,
                workspace_id: app.ctx.workspace_id,
                original_name: "notes.txt".to_owned(),
                url: "http://files.test/tasks/notes.txt".to_owned(),
                storage_id: "tasks/notes.txt".to_owned(),
                content_type: "text/plain".to_owned(),
                size: 5,
                uploaded_by: app.ctx.user_id,
            },
            &DefaultClock,
        )
    };

    app.repositories.attachments.store(&upload()).await?;
    let duplicate = app.repositories.attachments.store(&upload()).await;

    assert!(matches!(
        duplicate,
        Err(AttachmentRepositoryError::DuplicateStorageId(_))
    ));
    Ok(())
}
