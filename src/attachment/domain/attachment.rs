//! Attachment metadata record.

use super::AttachmentId;
use crate::task::domain::TaskId;
use crate::workspace::domain::{UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Metadata for a file stored in the blob store and linked to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    id: AttachmentId,
    task_id: TaskId,
    workspace_id: WorkspaceId,
    name: String,
    original_name: String,
    url: String,
    storage_id: String,
    #[serde(rename = "type")]
    content_type: String,
    size: u64,
    uploaded_by: UserId,
    created_at: DateTime<Utc>,
}

/// Attributes of a stored blob and its upload, used to build an [`Attachment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    /// Owning task.
    pub task_id: TaskId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// File name as supplied by the uploader.
    pub original_name: String,
    /// Public URL of the stored blob.
    pub url: String,
    /// Blob store object identifier.
    pub storage_id: String,
    /// MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Uploading user.
    pub uploaded_by: UserId,
}

impl Attachment {
    /// Creates attachment metadata.
    ///
    /// The display name is the supplied file name without directory
    /// components.
    #[must_use]
    pub fn new(upload: NewAttachment, clock: &impl Clock) -> Self {
        let name = display_name(&upload.original_name);
        Self {
            id: AttachmentId::new(),
            task_id: upload.task_id,
            workspace_id: upload.workspace_id,
            name,
            original_name: upload.original_name,
            url: upload.url,
            storage_id: upload.storage_id,
            content_type: upload.content_type,
            size: upload.size,
            uploaded_by: upload.uploaded_by,
            created_at: clock.utc(),
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the file name as uploaded.
    #[must_use]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Returns the public URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the blob store object identifier.
    #[must_use]
    pub fn storage_id(&self) -> &str {
        &self.storage_id
    }

    /// Returns the MIME type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the uploading user.
    #[must_use]
    pub const fn uploaded_by(&self) -> UserId {
        self.uploaded_by
    }

    /// Returns the upload timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn display_name(original: &str) -> String {
    original
        .rsplit(['/', '\\'])
        .next()
        .map_or(original, str::trim)
        .to_owned()
}
