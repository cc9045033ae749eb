//! Diesel row models for attachment persistence.

use super::schema::attachments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Insert model for attachments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attachments)]
pub struct NewAttachmentRow {
    /// Attachment identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Blob store object identifier.
    pub storage_id: String,
    /// Serialized attachment.
    pub document: Value,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
}
