//! Workspace bootstrap and settings.

use super::helpers::{App, app, bootstrap};
use rstest::rstest;
use trellis::task::domain::{Priority, TaskStatus};
use trellis::workspace::{
    domain::{WorkspaceDomainError, WorkspaceSettings},
    services::{UpdateWorkspaceRequest, WorkspaceServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bootstrap_is_idempotent(#[future] app: App) {
    let harness = app.await;

    let first = harness
        .state
        .workspaces
        .get_or_create(&bootstrap())
        .await
        .expect("bootstrap should succeed");
    let second = harness
        .state
        .workspaces
        .get_or_create(&bootstrap())
        .await
        .expect("bootstrap should succeed");

    assert_eq!(first.context(), harness.ctx);
    assert_eq!(first.user.id(), second.user.id());
    assert_eq!(first.workspace.id(), second.workspace.id());
    assert_eq!(second.workspace.owner_id(), second.user.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_name_and_settings(#[future] app: App) {
    let harness = app.await;
    let settings = WorkspaceSettings {
        default_task_status: TaskStatus::InProgress,
        default_priority: Priority::High,
    };

    let updated = harness
        .state
        .workspaces
        .update(
            &harness.ctx,
            UpdateWorkspaceRequest {
                name: Some("Platform".to_owned()),
                settings: Some(settings),
                ..UpdateWorkspaceRequest::default()
            },
        )
        .await
        .expect("update should succeed");
    let reloaded = harness
        .state
        .workspaces
        .get(harness.ctx.workspace_id)
        .await
        .expect("workspace should exist");

    assert_eq!(updated, reloaded);
    assert_eq!(reloaded.name(), "Platform");
    assert_eq!(reloaded.settings(), settings);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_name_is_rejected_without_changes(#[future] app: App) {
    let harness = app.await;

    let result = harness
        .state
        .workspaces
        .update(
            &harness.ctx,
            UpdateWorkspaceRequest {
                name: Some("   ".to_owned()),
                ..UpdateWorkspaceRequest::default()
            },
        )
        .await;
    let reloaded = harness
        .state
        .workspaces
        .get(harness.ctx.workspace_id)
        .await
        .expect("workspace should exist");

    assert!(matches!(
        result,
        Err(WorkspaceServiceError::Domain(
            WorkspaceDomainError::EmptyWorkspaceName
        ))
    ));
    assert_eq!(reloaded.name(), "My Workspace");
}
