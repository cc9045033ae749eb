//! Read projection of a task resolved against live definitions and users.

use super::{Priority, Task, TaskId, TaskStatus};
use crate::field::domain::{FieldDefinition, FieldId};
use crate::list::domain::ListId;
use crate::workspace::domain::{UserId, UserSummary, WorkspaceId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// A custom field value with its display rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldView {
    /// Referenced field definition.
    pub field_id: FieldId,
    /// Raw stored value.
    pub value: Value,
    /// Human-readable rendering, absent when the value does not fit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A user reference, expanded when the user is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UserReference {
    /// The user record was found.
    User(UserSummary),
    /// Only the identifier is known.
    Unresolved(UserId),
}

impl UserReference {
    fn resolve(id: UserId, users: &HashMap<UserId, UserSummary>) -> Self {
        users
            .get(&id)
            .map_or(Self::Unresolved(id), |summary| Self::User(summary.clone()))
    }
}

/// Task as returned to callers.
///
/// Custom fields are restricted to live definitions, in definition order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Owning list.
    pub list_id: ListId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Task name.
    pub name: String,
    /// Description, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Urgency.
    pub priority: Priority,
    /// Due date, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Live custom field values.
    pub custom_fields: Vec<CustomFieldView>,
    /// Position among the list's tasks.
    pub order: i64,
    /// Assigned users; unknown identifiers are dropped.
    pub assignees: Vec<UserSummary>,
    /// Creating user.
    pub created_by: UserReference,
    /// Last updating user.
    pub updated_by: UserReference,
    /// Completion timestamp while done.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskView {
    /// Resolves `task` against the list's definitions and known users.
    #[must_use]
    pub fn build(
        task: &Task,
        definitions: &[FieldDefinition],
        users: &HashMap<UserId, UserSummary>,
    ) -> Self {
        let custom_fields = task
            .custom_fields()
            .live(definitions)
            .map(|(definition, value)| CustomFieldView {
                field_id: definition.id(),
                value: value.clone(),
                display: definition.render(value),
            })
            .collect();
        let assignees = task
            .assignees()
            .iter()
            .filter_map(|id| users.get(id).cloned())
            .collect();

        Self {
            id: task.id(),
            list_id: task.list_id(),
            workspace_id: task.workspace_id(),
            name: task.name().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date(),
            custom_fields,
            order: task.order(),
            assignees,
            created_by: UserReference::resolve(task.created_by(), users),
            updated_by: UserReference::resolve(task.updated_by(), users),
            completed_at: task.completed_at(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
