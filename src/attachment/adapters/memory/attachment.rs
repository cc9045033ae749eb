//! In-memory repository for attachment metadata.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::attachment::{
    domain::{Attachment, AttachmentId},
    ports::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult},
};
use crate::task::domain::TaskId;

/// Thread-safe in-memory attachment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttachmentRepository {
    state: Arc<RwLock<HashMap<AttachmentId, Attachment>>>,
}

impl InMemoryAttachmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> AttachmentRepositoryError {
    AttachmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AttachmentRepository for InMemoryAttachmentRepository {
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        let mut attachments = self.state.write().map_err(lock_error)?;
        if attachments.contains_key(&attachment.id()) {
            return Err(AttachmentRepositoryError::DuplicateAttachment(
                attachment.id(),
            ));
        }
        if attachments
            .values()
            .any(|existing| existing.storage_id() == attachment.storage_id())
        {
            return Err(AttachmentRepositoryError::DuplicateStorageId(
                attachment.storage_id().to_owned(),
            ));
        }
        attachments.insert(attachment.id(), attachment.clone());
        Ok(())
    }

    async fn find(
        &self,
        task_id: TaskId,
        attachment_id: AttachmentId,
    ) -> AttachmentRepositoryResult<Option<Attachment>> {
        let attachments = self.state.read().map_err(lock_error)?;
        Ok(attachments
            .get(&attachment_id)
            .filter(|attachment| attachment.task_id() == task_id)
            .cloned())
    }

    async fn list_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>> {
        let attachments = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Attachment> = attachments
            .values()
            .filter(|attachment| attachment.task_id() == task_id)
            .cloned()
            .collect();
        matching.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(matching)
    }

    async fn delete(
        &self,
        task_id: TaskId,
        attachment_id: AttachmentId,
    ) -> AttachmentRepositoryResult<bool> {
        let mut attachments = self.state.write().map_err(lock_error)?;
        let owned = attachments
            .get(&attachment_id)
            .is_some_and(|attachment| attachment.task_id() == task_id);
        if owned {
            attachments.remove(&attachment_id);
        }
        Ok(owned)
    }
}
