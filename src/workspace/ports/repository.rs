//! Repository ports for workspaces and users.

use crate::workspace::domain::{EmailAddress, User, UserId, Workspace, WorkspaceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workspace and user repository operations.
pub type WorkspaceRepositoryResult<T> = Result<T, WorkspaceRepositoryError>;

/// User persistence contract.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::DuplicateEmail`] when another user
    /// already owns the email address.
    async fn store(&self, user: &User) -> WorkspaceRepositoryResult<()>;

    /// Finds a user by identifier.
    async fn find_by_id(&self, id: UserId) -> WorkspaceRepositoryResult<Option<User>>;

    /// Finds a user by normalized email address.
    async fn find_by_email(&self, email: &EmailAddress) -> WorkspaceRepositoryResult<Option<User>>;

    /// Returns the users matching `ids`; unknown identifiers are skipped.
    async fn find_many(&self, ids: &[UserId]) -> WorkspaceRepositoryResult<Vec<User>>;
}

/// Workspace persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Stores a new workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::DuplicateWorkspace`] when the
    /// identifier already exists and [`WorkspaceRepositoryError::OwnerTaken`]
    /// when the owner already has a workspace.
    async fn store(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()>;

    /// Replaces an existing workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceRepositoryError::WorkspaceNotFound`] when the
    /// workspace does not exist.
    async fn update(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()>;

    /// Finds a workspace by identifier.
    async fn find_by_id(&self, id: WorkspaceId) -> WorkspaceRepositoryResult<Option<Workspace>>;

    /// Finds the workspace owned by `owner_id`.
    async fn find_by_owner(&self, owner_id: UserId)
    -> WorkspaceRepositoryResult<Option<Workspace>>;
}

/// Errors returned by workspace and user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceRepositoryError {
    /// A user with the same email already exists.
    #[error("duplicate user email: {0}")]
    DuplicateEmail(EmailAddress),

    /// A workspace with the same identifier already exists.
    #[error("duplicate workspace identifier: {0}")]
    DuplicateWorkspace(WorkspaceId),

    /// The owner already has a workspace.
    #[error("user already owns a workspace: {0}")]
    OwnerTaken(UserId),

    /// The workspace was not found.
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(WorkspaceId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkspaceRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
