//! Service layer for attachment upload, lookup and deletion.

use crate::attachment::{
    domain::{Attachment, AttachmentDomainError, AttachmentId, AttachmentPolicy, NewAttachment},
    ports::{AttachmentRepository, AttachmentRepositoryError, BlobStore, BlobStoreError},
};
use crate::context::RequestContext;
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// A file to attach to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// File name supplied by the client.
    pub file_name: String,
    /// MIME type supplied by the client.
    pub content_type: String,
    /// File content.
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    /// Creates an upload request.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Outcome of an attachment delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentDeletion {
    /// The removed attachment.
    pub attachment_id: AttachmentId,
    /// `false` when the blob store did not confirm removal of the content.
    pub blob_purged: bool,
}

/// Service-level errors for attachment operations.
#[derive(Debug, Error)]
pub enum AttachmentServiceError {
    /// The upload was refused.
    #[error(transparent)]
    Domain(#[from] AttachmentDomainError),
    /// Attachment repository operation failed.
    #[error(transparent)]
    Repository(#[from] AttachmentRepositoryError),
    /// Blob store operation failed.
    #[error(transparent)]
    Blob(#[from] BlobStoreError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// The task does not exist in the caller's workspace.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The attachment does not exist on the task.
    #[error("attachment not found: {0}")]
    NotFound(AttachmentId),
}

/// Result type for attachment service operations.
pub type AttachmentServiceResult<T> = Result<T, AttachmentServiceError>;

/// Attachment metadata and blob lifecycle service.
pub struct AttachmentService<A, B, T, C>
where
    A: AttachmentRepository + ?Sized,
    B: BlobStore + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    attachments: Arc<A>,
    blobs: Arc<B>,
    tasks: Arc<T>,
    clock: Arc<C>,
    policy: AttachmentPolicy,
}

impl<A, B, T, C> AttachmentService<A, B, T, C>
where
    A: AttachmentRepository + ?Sized,
    B: BlobStore + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new attachment service using the default upload policy.
    #[must_use]
    pub fn new(attachments: Arc<A>, blobs: Arc<B>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            attachments,
            blobs,
            tasks,
            clock,
            policy: AttachmentPolicy::default(),
        }
    }

    /// Replaces the upload policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AttachmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the task's attachments, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::TaskNotFound`] when the task is not
    /// in the caller's workspace.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
    ) -> AttachmentServiceResult<Vec<Attachment>> {
        self.require_task(ctx, task_id).await?;
        Ok(self.attachments.list_by_task(task_id).await?)
    }

    /// Returns one attachment.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the task or attachment does not match.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        attachment_id: AttachmentId,
    ) -> AttachmentServiceResult<Attachment> {
        self.require_task(ctx, task_id).await?;
        self.attachments
            .find(task_id, attachment_id)
            .await?
            .ok_or(AttachmentServiceError::NotFound(attachment_id))
    }

    /// Validates, stores the blob, then records the metadata.
    ///
    /// The blob lands under `tasks/<task_id>`. When the metadata write fails
    /// the blob is removed again on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentServiceError::Domain`] when the file is empty, too
    /// large or of a disallowed type; nothing is uploaded in that case.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        request: UploadRequest,
    ) -> AttachmentServiceResult<Attachment> {
        let size = u64::try_from(request.bytes.len()).unwrap_or(u64::MAX);
        self.policy
            .admit(&request.file_name, &request.content_type, size)?;
        self.require_task(ctx, task_id).await?;

        let folder = format!("tasks/{task_id}");
        let blob = self
            .blobs
            .upload(&request.bytes, &request.file_name, &folder)
            .await?;
        let attachment = Attachment::new(
            NewAttachment {
                task_id,
                workspace_id: ctx.workspace_id,
                original_name: request.file_name,
                url: blob.url,
                storage_id: blob.object_id,
                content_type: request.content_type.trim().to_owned(),
                size,
                uploaded_by: ctx.user_id,
            },
            &*self.clock,
        );

        if let Err(err) = self.attachments.store(&attachment).await {
            self.discard_blob(attachment.storage_id()).await;
            return Err(err.into());
        }
        info!(
            attachment_id = %attachment.id(),
            %task_id,
            size,
            "stored attachment"
        );
        Ok(attachment)
    }

    /// Deletes the blob, then the metadata.
    ///
    /// A blob that cannot be removed is logged and does not stop the
    /// metadata delete.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the task or attachment does not match.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
        attachment_id: AttachmentId,
    ) -> AttachmentServiceResult<AttachmentDeletion> {
        let attachment = self.get(ctx, task_id, attachment_id).await?;
        let blob_purged = self.discard_blob(attachment.storage_id()).await;
        if !self.attachments.delete(task_id, attachment_id).await? {
            return Err(AttachmentServiceError::NotFound(attachment_id));
        }
        info!(%attachment_id, %task_id, blob_purged, "deleted attachment");
        Ok(AttachmentDeletion {
            attachment_id,
            blob_purged,
        })
    }

    async fn discard_blob(&self, storage_id: &str) -> bool {
        match self.blobs.delete(storage_id).await {
            Ok(true) => true,
            Ok(false) => {
                warn!(storage_id, "blob store did not remove attachment content");
                false
            }
            Err(err) => {
                warn!(storage_id, error = %err, "failed to remove attachment content");
                false
            }
        }
    }

    async fn require_task(
        &self,
        ctx: &RequestContext,
        task_id: TaskId,
    ) -> AttachmentServiceResult<()> {
        let owned = self
            .tasks
            .find_by_id(task_id)
            .await?
            .is_some_and(|task| task.workspace_id() == ctx.workspace_id);
        if owned {
            Ok(())
        } else {
            Err(AttachmentServiceError::TaskNotFound(task_id))
        }
    }
}
