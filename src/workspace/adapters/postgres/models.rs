//! Diesel row models for workspace and user persistence.

use super::schema::{users, workspaces};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Insert model for users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Normalized email address.
    pub email: String,
    /// Serialized user.
    pub document: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for workspaces.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workspaces)]
pub struct NewWorkspaceRow {
    /// Workspace identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Serialized workspace.
    pub document: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
