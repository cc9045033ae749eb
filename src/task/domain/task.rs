//! Task aggregate root and its create/update inputs.

use super::{CustomFieldEntries, Priority, TaskDomainError, TaskId, TaskStatus};
use crate::list::domain::ListId;
use crate::workspace::domain::{UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A unit of work inside a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    list_id: ListId,
    workspace_id: WorkspaceId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    status: TaskStatus,
    priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    custom_fields: CustomFieldEntries,
    order: i64,
    #[serde(default)]
    assignees: Vec<UserId>,
    created_by: UserId,
    updated_by: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Where a new task lives and who created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPlacement {
    /// Owning list.
    pub list_id: ListId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Position among the list's tasks.
    pub order: i64,
    /// Creating user.
    pub created_by: UserId,
}

/// Input describing a new task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    name: String,
    description: Option<String>,
    status: TaskStatus,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    custom_fields: CustomFieldEntries,
    assignees: Vec<UserId>,
}

impl TaskDraft {
    /// Starts a draft with default status and priority.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the custom field entries.
    #[must_use]
    pub fn with_custom_fields(mut self, custom_fields: CustomFieldEntries) -> Self {
        self.custom_fields = custom_fields;
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = assignees;
        self
    }

    /// Returns the custom field entries.
    #[must_use]
    pub const fn custom_fields(&self) -> &CustomFieldEntries {
        &self.custom_fields
    }
}

/// Partial task update. Absent members are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    name: Option<String>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    due_date: Option<Option<DateTime<Utc>>>,
    custom_fields: Option<CustomFieldEntries>,
    assignees: Option<Vec<UserId>>,
    order: Option<i64>,
    completed_at: Option<Option<DateTime<Utc>>>,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the task.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Changes the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Changes the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the full custom field entry set.
    #[must_use]
    pub fn with_custom_fields(mut self, custom_fields: CustomFieldEntries) -> Self {
        self.custom_fields = Some(custom_fields);
        self
    }

    /// Replaces the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = Some(assignees);
        self
    }

    /// Moves the task.
    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Supplies an explicit completion timestamp, or `None` to clear it.
    #[must_use]
    pub const fn with_completed_at(mut self, completed_at: Option<DateTime<Utc>>) -> Self {
        self.completed_at = Some(completed_at);
        self
    }
}

/// Decides the completion timestamp after an update.
///
/// A change to `done` stamps `now` unless an explicit timestamp is given; a
/// change to any other status clears it. Without a status change an explicit
/// value (including an explicit clear) is taken as given.
#[must_use]
pub fn resolve_completed_at(
    current: Option<DateTime<Utc>>,
    status_change: Option<TaskStatus>,
    explicit: Option<Option<DateTime<Utc>>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match (status_change, explicit) {
        (Some(status), Some(Some(timestamp))) if status.is_done() => Some(timestamp),
        (Some(status), _) if status.is_done() => Some(now),
        (Some(_), _) => None,
        (None, Some(given)) => given,
        (None, None) => current,
    }
}

impl Task {
    /// Creates a task from a draft.
    ///
    /// Custom field entries are expected to have been validated against the
    /// list's definitions already.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank.
    pub fn new(
        draft: TaskDraft,
        placement: TaskPlacement,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let timestamp = clock.utc();
        let completed_at = draft.status.is_done().then_some(timestamp);
        Ok(Self {
            id: TaskId::new(),
            list_id: placement.list_id,
            workspace_id: placement.workspace_id,
            name: normalized_name(&draft.name)?,
            description: draft.description.as_deref().and_then(normalized_description),
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            custom_fields: draft.custom_fields,
            order: placement.order,
            assignees: draft.assignees,
            created_by: placement.created_by,
            updated_by: placement.created_by,
            completed_at,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Applies a change set on behalf of `updated_by`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the change set
    /// supplies a blank name; the task is left unchanged.
    pub fn apply_changes(
        &mut self,
        changes: TaskChanges,
        updated_by: UserId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let name = changes.name.as_deref().map(normalized_name).transpose()?;
        let now = clock.utc();

        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(description) = changes.description {
            self.description = description.as_deref().and_then(normalized_description);
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(due_date) = changes.due_date {
            self.due_date = due_date;
        }
        if let Some(custom_fields) = changes.custom_fields {
            self.custom_fields = custom_fields;
        }
        if let Some(assignees) = changes.assignees {
            self.assignees = assignees;
        }
        if let Some(order) = changes.order {
            self.order = order;
        }
        self.completed_at =
            resolve_completed_at(self.completed_at, changes.status, changes.completed_at, now);
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_by = updated_by;
        self.updated_at = now;
        Ok(())
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning list.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns every stored custom field entry, orphans included.
    #[must_use]
    pub const fn custom_fields(&self) -> &CustomFieldEntries {
        &self.custom_fields
    }

    /// Returns the position among the list's tasks.
    #[must_use]
    pub const fn order(&self) -> i64 {
        self.order
    }

    /// Returns the assigned users.
    #[must_use]
    pub fn assignees(&self) -> &[UserId] {
        &self.assignees
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the last updating user.
    #[must_use]
    pub const fn updated_by(&self) -> UserId {
        self.updated_by
    }

    /// Returns the completion timestamp, if any.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn normalized_name(name: &str) -> Result<String, TaskDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTaskName);
    }
    Ok(trimmed.to_owned())
}

fn normalized_description(description: &str) -> Option<String> {
    let trimmed = description.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
