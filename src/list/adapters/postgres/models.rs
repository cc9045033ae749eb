//! Diesel row models for list persistence.

use super::schema::task_lists;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Insert model for lists.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_lists)]
pub struct NewListRow {
    /// List identifier.
    pub id: uuid::Uuid,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Position among the workspace's lists.
    pub position: i64,
    /// Serialized list.
    pub document: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
