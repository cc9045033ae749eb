//! Diesel row models for field definition persistence.

use super::schema::field_definitions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Insert model for field definitions.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = field_definitions)]
pub struct NewFieldRow {
    /// Field identifier.
    pub id: uuid::Uuid,
    /// Owning list.
    pub list_id: uuid::Uuid,
    /// Owning workspace.
    pub workspace_id: uuid::Uuid,
    /// Position among the list's fields.
    pub position: i64,
    /// Serialized definition.
    pub document: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
