//! Repository port for attachment metadata.

use crate::attachment::domain::{Attachment, AttachmentId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for attachment repository operations.
pub type AttachmentRepositoryResult<T> = Result<T, AttachmentRepositoryError>;

/// Attachment metadata persistence contract. Lookups are scoped to a task.
#[async_trait]
pub trait AttachmentRepository: Send + Sync {
    /// Stores new metadata.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentRepositoryError::DuplicateStorageId`] when another
    /// attachment already references the same blob.
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()>;

    /// Finds an attachment belonging to `task_id`.
    async fn find(
        &self,
        task_id: TaskId,
        attachment_id: AttachmentId,
    ) -> AttachmentRepositoryResult<Option<Attachment>>;

    /// Returns the task's attachments, newest first.
    async fn list_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>>;

    /// Deletes one attachment. Returns `false` when it did not exist.
    async fn delete(
        &self,
        task_id: TaskId,
        attachment_id: AttachmentId,
    ) -> AttachmentRepositoryResult<bool>;
}

/// Errors returned by attachment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AttachmentRepositoryError {
    /// An attachment with the same identifier already exists.
    #[error("duplicate attachment identifier: {0}")]
    DuplicateAttachment(AttachmentId),

    /// Another attachment already references the blob.
    #[error("duplicate storage identifier: {0}")]
    DuplicateStorageId(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AttachmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
