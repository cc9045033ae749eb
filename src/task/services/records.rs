//! Service layer for task records and their custom field values.

use crate::context::RequestContext;
use crate::field::{
    domain::{FieldDefinition, parse_date},
    ports::{FieldDefinitionRepository, FieldRepositoryError},
};
use crate::list::{
    domain::{ListId, TaskList},
    ports::{ListRepository, ListRepositoryError},
};
use crate::ordering::next_position;
use crate::patch::deserialize_some;
use crate::task::{
    domain::{
        CustomFieldEntries, CustomFieldValue, ParsePriorityError, ParseTaskStatusError, Priority,
        Task, TaskChanges, TaskDomainError, TaskDraft, TaskId, TaskPlacement, TaskQuery,
        TaskQueryError, TaskQueryParams, TaskStatus, TaskView,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::workspace::{
    domain::{UserId, UserSummary},
    ports::{UserRepository, WorkspaceRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Status token; defaults to `to-do`.
    #[serde(default)]
    pub status: Option<String>,
    /// Priority token; defaults to `normal`.
    #[serde(default)]
    pub priority: Option<String>,
    /// Due date as `YYYY-MM-DD` or RFC 3339.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Custom field entries.
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldValue>,
    /// Assigned users.
    #[serde(default)]
    pub assignees: Vec<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with only a name.
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
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status.as_str().to_owned());
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority.as_str().to_owned());
        self
    }

    /// Sets the due date text.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the custom field entries.
    #[must_use]
    pub fn with_custom_fields(mut self, custom_fields: Vec<CustomFieldValue>) -> Self {
        self.custom_fields = custom_fields;
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: Vec<UserId>) -> Self {
        self.assignees = assignees;
        self
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    /// New status token.
    #[serde(default)]
    pub status: Option<String>,
    /// New priority token.
    #[serde(default)]
    pub priority: Option<String>,
    /// New due date; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub due_date: Option<Option<String>>,
    /// Replacement entries for live custom fields.
    #[serde(default)]
    pub custom_fields: Option<Vec<CustomFieldValue>>,
    /// Replacement assignees.
    #[serde(default)]
    pub assignees: Option<Vec<UserId>>,
    /// New position.
    #[serde(default)]
    pub order: Option<i64>,
    /// Explicit completion timestamp; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub completed_at: Option<Option<String>>,
}

impl UpdateTaskRequest {
    /// Sets the new status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status.as_str().to_owned());
        self
    }

    /// Sets replacement custom field entries.
    #[must_use]
    pub fn with_custom_fields(mut self, custom_fields: Vec<CustomFieldValue>) -> Self {
        self.custom_fields = Some(custom_fields);
        self
    }

    /// Sets an explicit completion timestamp, or `None` to clear it.
    #[must_use]
    pub fn with_completed_at(mut self, completed_at: Option<DateTime<Utc>>) -> Self {
        self.completed_at = Some(completed_at.map(|timestamp| timestamp.to_rfc3339()));
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// A status token is unknown.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
    /// A priority token is unknown.
    #[error(transparent)]
    Priority(#[from] ParsePriorityError),
    /// A date does not parse.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// Query parameters are malformed.
    #[error(transparent)]
    Query(#[from] TaskQueryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Field repository operation failed.
    #[error(transparent)]
    Fields(#[from] FieldRepositoryError),
    /// List repository operation failed.
    #[error(transparent)]
    Lists(#[from] ListRepositoryError),
    /// User repository operation failed.
    #[error(transparent)]
    Users(#[from] WorkspaceRepositoryError),
    /// The list does not exist in the caller's workspace.
    #[error("list not found: {0}")]
    ListNotFound(ListId),
    /// The task does not exist in the list.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task record store scoped to lists.
pub struct TaskService<T, F, L, U, C>
where
    T: TaskRepository + ?Sized,
    F: FieldDefinitionRepository + ?Sized,
    L: ListRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    fields: Arc<F>,
    lists: Arc<L>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<T, F, L, U, C> TaskService<T, F, L, U, C>
where
    T: TaskRepository + ?Sized,
    F: FieldDefinitionRepository + ?Sized,
    L: ListRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        fields: Arc<F>,
        lists: Arc<L>,
        users: Arc<U>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            fields,
            lists,
            users,
            clock,
        }
    }

    /// Returns the list's tasks matching `params`, filtered and sorted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Query`] for malformed parameters or a
    /// not-found error when the list is not in the caller's workspace.
    pub async fn query(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        params: &TaskQueryParams,
    ) -> TaskServiceResult<Vec<TaskView>> {
        let query = TaskQuery::from_params(params)?;
        self.require_list(ctx, list_id).await?;
        let tasks = self.tasks.query(list_id, &query).await?;
        debug!(%list_id, matched = tasks.len(), "queried tasks");
        let definitions = self.fields.list_by_list(list_id).await?;
        self.resolve(&tasks, &definitions).await
    }

    /// Returns one task with users expanded.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the list or task does not match.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        task_id: TaskId,
    ) -> TaskServiceResult<TaskView> {
        let task = self.require_task(ctx, list_id, task_id).await?;
        let definitions = self.fields.list_by_list(list_id).await?;
        self.resolve_one(&task, &definitions).await
    }

    /// Creates a task appended after the list's existing tasks.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank, a token or date is
    /// malformed, or a custom field entry is unknown, repeated or ill-typed.
    /// Nothing is written in that case.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<TaskView> {
        let list = self.require_list(ctx, list_id).await?;
        let definitions = self.fields.list_by_list(list_id).await?;
        let entries = CustomFieldEntries::new(request.custom_fields)?;
        entries.validate_against(&definitions)?;

        let mut draft = TaskDraft::new(request.name)
            .with_custom_fields(entries)
            .with_assignees(request.assignees);
        if let Some(description) = request.description {
            draft = draft.with_description(description);
        }
        if let Some(status) = request.status {
            draft = draft.with_status(TaskStatus::try_from(status.as_str())?);
        }
        if let Some(priority) = request.priority {
            draft = draft.with_priority(Priority::try_from(priority.as_str())?);
        }
        if let Some(due_date) = parse_optional_date(request.due_date.as_deref())? {
            draft = draft.with_due_date(due_date);
        }

        let order = next_position(self.tasks.max_order(list_id).await?);
        let placement = TaskPlacement {
            list_id,
            workspace_id: list.workspace_id(),
            order,
            created_by: ctx.user_id,
        };
        let task = Task::new(draft, placement, &*self.clock)?;
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), %list_id, "created task");
        self.resolve_one(&task, &definitions).await
    }

    /// Applies a partial update, enforcing the completion timestamp rule.
    ///
    /// A supplied `customFields` replaces the entries of live fields; entries
    /// whose definition was deleted are kept.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the list or task does not match, or a
    /// validation error for malformed input.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<TaskView> {
        let mut task = self.require_task(ctx, list_id, task_id).await?;
        let definitions = self.fields.list_by_list(list_id).await?;
        let changes = build_changes(request, &task, &definitions)?;
        task.apply_changes(changes, ctx.user_id, &*self.clock)?;
        self.tasks.update(&task).await?;
        self.resolve_one(&task, &definitions).await
    }

    /// Deletes a task. Its attachments are left in place.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the list or task does not match.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        task_id: TaskId,
    ) -> TaskServiceResult<()> {
        self.require_list(ctx, list_id).await?;
        if !self.tasks.delete(list_id, task_id).await? {
            return Err(TaskServiceError::NotFound(task_id));
        }
        info!(%task_id, %list_id, "deleted task");
        Ok(())
    }

    async fn require_list(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
    ) -> TaskServiceResult<TaskList> {
        self.lists
            .find(ctx.workspace_id, list_id)
            .await?
            .ok_or(TaskServiceError::ListNotFound(list_id))
    }

    async fn require_task(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        task_id: TaskId,
    ) -> TaskServiceResult<Task> {
        self.require_list(ctx, list_id).await?;
        self.tasks
            .find(list_id, task_id)
            .await?
            .ok_or(TaskServiceError::NotFound(task_id))
    }

    async fn resolve_one(
        &self,
        task: &Task,
        definitions: &[FieldDefinition],
    ) -> TaskServiceResult<TaskView> {
        let users = self.user_summaries(std::slice::from_ref(task)).await?;
        Ok(TaskView::build(task, definitions, &users))
    }

    async fn resolve(
        &self,
        tasks: &[Task],
        definitions: &[FieldDefinition],
    ) -> TaskServiceResult<Vec<TaskView>> {
        let users = self.user_summaries(tasks).await?;
        Ok(tasks
            .iter()
            .map(|task| TaskView::build(task, definitions, &users))
            .collect())
    }

    async fn user_summaries(
        &self,
        tasks: &[Task],
    ) -> TaskServiceResult<HashMap<UserId, UserSummary>> {
        let ids: BTreeSet<UserId> = tasks
            .iter()
            .flat_map(|task| {
                task.assignees()
                    .iter()
                    .copied()
                    .chain([task.created_by(), task.updated_by()])
            })
            .collect();
        let lookup: Vec<UserId> = ids.into_iter().collect();
        let users = self.users.find_many(&lookup).await?;
        Ok(users
            .into_iter()
            .map(|user| (user.id(), user.summary()))
            .collect())
    }
}

fn build_changes(
    request: UpdateTaskRequest,
    task: &Task,
    definitions: &[FieldDefinition],
) -> TaskServiceResult<TaskChanges> {
    let mut changes = TaskChanges::new();
    if let Some(name) = request.name {
        changes = changes.with_name(name);
    }
    if let Some(description) = request.description {
        changes = changes.with_description(description);
    }
    if let Some(status) = request.status {
        changes = changes.with_status(TaskStatus::try_from(status.as_str())?);
    }
    if let Some(priority) = request.priority {
        changes = changes.with_priority(Priority::try_from(priority.as_str())?);
    }
    if let Some(due_date) = request.due_date {
        changes = changes.with_due_date(parse_optional_date(due_date.as_deref())?);
    }
    if let Some(custom_fields) = request.custom_fields {
        let replacement = CustomFieldEntries::new(custom_fields)?;
        replacement.validate_against(definitions)?;
        changes = changes.with_custom_fields(
            task.custom_fields()
                .merge_preserving_orphans(replacement, definitions),
        );
    }
    if let Some(assignees) = request.assignees {
        changes = changes.with_assignees(assignees);
    }
    if let Some(order) = request.order {
        changes = changes.with_order(order);
    }
    if let Some(completed_at) = request.completed_at {
        changes = changes.with_completed_at(parse_optional_date(completed_at.as_deref())?);
    }
    Ok(changes)
}

fn parse_optional_date(text: Option<&str>) -> TaskServiceResult<Option<DateTime<Utc>>> {
    text.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            parse_date(value).ok_or_else(|| TaskServiceError::InvalidDate(value.to_owned()))
        })
        .transpose()
}
