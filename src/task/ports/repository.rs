//! Repository port for task persistence and queries.

use crate::list::domain::ListId;
use crate::task::domain::{Task, TaskId, TaskQuery};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract. Lookups are scoped to a list.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Replaces an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task belonging to `list_id`.
    async fn find(&self, list_id: ListId, task_id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Finds a task by identifier regardless of list.
    async fn find_by_id(&self, task_id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the list's tasks that match `query`, in query order.
    async fn query(&self, list_id: ListId, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the largest `order` among the list's tasks.
    async fn max_order(&self, list_id: ListId) -> TaskRepositoryResult<Option<i64>>;

    /// Deletes one task. Returns `false` when it did not exist.
    async fn delete(&self, list_id: ListId, task_id: TaskId) -> TaskRepositoryResult<bool>;

    /// Deletes every task of a list and returns how many were removed.
    async fn delete_by_list(&self, list_id: ListId) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
