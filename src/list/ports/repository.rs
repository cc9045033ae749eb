//! Repository port for list persistence.

use crate::list::domain::{ListId, TaskList};
use crate::workspace::domain::WorkspaceId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for list repository operations.
pub type ListRepositoryResult<T> = Result<T, ListRepositoryError>;

/// List persistence contract. Every lookup is scoped to a workspace.
#[async_trait]
pub trait ListRepository: Send + Sync {
    /// Stores a new list.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::DuplicateList`] when the identifier
    /// already exists.
    async fn store(&self, list: &TaskList) -> ListRepositoryResult<()>;

    /// Replaces an existing list.
    ///
    /// # Errors
    ///
    /// Returns [`ListRepositoryError::NotFound`] when the list does not exist.
    async fn update(&self, list: &TaskList) -> ListRepositoryResult<()>;

    /// Finds a list belonging to `workspace_id`.
    async fn find(
        &self,
        workspace_id: WorkspaceId,
        list_id: ListId,
    ) -> ListRepositoryResult<Option<TaskList>>;

    /// Returns the workspace's lists ordered by `order`, then creation time.
    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> ListRepositoryResult<Vec<TaskList>>;

    /// Returns the largest `order` among the workspace's lists.
    async fn max_order(&self, workspace_id: WorkspaceId) -> ListRepositoryResult<Option<i64>>;

    /// Deletes one list. Returns `false` when it did not exist.
    async fn delete(
        &self,
        workspace_id: WorkspaceId,
        list_id: ListId,
    ) -> ListRepositoryResult<bool>;
}

/// Errors returned by list repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ListRepositoryError {
    /// A list with the same identifier already exists.
    #[error("duplicate list identifier: {0}")]
    DuplicateList(ListId),

    /// The list was not found.
    #[error("list not found: {0}")]
    NotFound(ListId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ListRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
