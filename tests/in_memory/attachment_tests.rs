//! Attachment uploads through wired application state.

use std::sync::Arc;

use super::helpers::{App, app, bootstrap};
use camino::Utf8PathBuf;
use rstest::rstest;
use tempfile::TempDir;
use trellis::attachment::{
    adapters::filesystem::FilesystemBlobStore,
    domain::{AttachmentDomainError, AttachmentPolicy},
    ports::BlobStore,
    services::{AttachmentServiceError, UploadRequest},
};
use trellis::http::{AppState, Repositories};
use trellis::list::services::CreateListRequest;
use trellis::task::services::CreateTaskRequest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_is_listed_and_survives_task_delete(#[future] app: App) {
    let harness = app.await;
    let list = harness.list("Engineering").await;
    let task = harness
        .state
        .tasks
        .create(&harness.ctx, list.id(), CreateTaskRequest::new("Write notes"))
        .await
        .expect("task creation should succeed");

    let attachment = harness
        .state
        .attachments
        .upload(
            &harness.ctx,
            task.id,
            UploadRequest::new("notes.txt", "text/plain", b"hello".to_vec()),
        )
        .await
        .expect("upload should succeed");
    let listed = harness
        .state
        .attachments
        .list(&harness.ctx, task.id)
        .await
        .expect("list should succeed");

    assert_eq!(listed, vec![attachment.clone()]);
    assert_eq!(attachment.original_name(), "notes.txt");
    assert_eq!(attachment.size(), 5);
    assert_eq!(
        harness.blobs.content(attachment.storage_id()),
        Some(b"hello".to_vec())
    );

    harness
        .state
        .tasks
        .delete(&harness.ctx, list.id(), task.id)
        .await
        .expect("task delete should succeed");
    assert_eq!(
        harness.blobs.content(attachment.storage_id()),
        Some(b"hello".to_vec())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disallowed_type_is_rejected(#[future] app: App) {
    let harness = app.await;
    let list = harness.list("Engineering").await;
    let task = harness
        .state
        .tasks
        .create(&harness.ctx, list.id(), CreateTaskRequest::new("Ship"))
        .await
        .expect("task creation should succeed");

    let result = harness
        .state
        .attachments
        .upload(
            &harness.ctx,
            task.id,
            UploadRequest::new("run.sh", "application/x-sh", b"echo".to_vec()),
        )
        .await;

    assert!(matches!(
        result,
        Err(AttachmentServiceError::Domain(
            AttachmentDomainError::UnsupportedType(_)
        ))
    ));
    assert!(harness.blobs.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filesystem_backend_writes_beneath_root() {
    let temp = TempDir::new().expect("temp dir should be created");
    let root = Utf8PathBuf::from_path_buf(temp.path().join("blobs"))
        .expect("temp path should be UTF-8");
    let blobs: Arc<dyn BlobStore> = Arc::new(
        FilesystemBlobStore::open(&root, "http://files.test")
            .expect("blob store should open"),
    );
    let state = AppState::new(
        Repositories::in_memory(),
        blobs,
        AttachmentPolicy::default(),
        bootstrap(),
    );
    let ctx = state.context().await.expect("bootstrap should succeed");
    let list = state
        .lists
        .create(&ctx, CreateListRequest::new("Docs"))
        .await
        .expect("list creation should succeed");
    let task = state
        .tasks
        .create(&ctx, list.id(), CreateTaskRequest::new("Attach"))
        .await
        .expect("task creation should succeed");

    let attachment = state
        .attachments
        .upload(
            &ctx,
            task.id,
            UploadRequest::new("report.csv", "text/csv", b"a,b\n1,2\n".to_vec()),
        )
        .await
        .expect("upload should succeed");

    let on_disk = root.join(attachment.storage_id());
    assert_eq!(
        std::fs::read(&on_disk).expect("blob should be on disk"),
        b"a,b\n1,2\n"
    );
    assert!(attachment.url().starts_with("http://files.test/tasks/"));
    assert!(attachment.storage_id().starts_with(&format!("tasks/{}", task.id)));

    let deletion = state
        .attachments
        .delete(&ctx, task.id, attachment.id())
        .await
        .expect("delete should succeed");
    assert!(deletion.blob_purged);
    assert!(!on_disk.exists());
}
