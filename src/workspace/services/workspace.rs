//! Service layer for the workspace singleton.

use crate::context::RequestContext;
use crate::patch::deserialize_some;
use crate::workspace::{
    domain::{
        EmailAddress, User, Workspace, WorkspaceDomainError, WorkspaceId, WorkspaceSettings,
    },
    ports::{UserRepository, WorkspaceRepository, WorkspaceRepositoryError},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Identity of the user and workspace created on first access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapRequest {
    email: String,
    user_name: String,
    workspace_name: String,
    workspace_description: Option<String>,
}

impl BootstrapRequest {
    /// Creates a bootstrap request.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        user_name: impl Into<String>,
        workspace_name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            user_name: user_name.into(),
            workspace_name: workspace_name.into(),
            workspace_description: None,
        }
    }

    /// Sets the description used when the workspace is created.
    #[must_use]
    pub fn with_workspace_description(mut self, description: impl Into<String>) -> Self {
        self.workspace_description = Some(description.into());
        self
    }
}

/// Result of [`WorkspaceService::get_or_create`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bootstrapped {
    /// The bootstrap user.
    pub user: User,
    /// The workspace owned by that user.
    pub workspace: Workspace,
}

impl Bootstrapped {
    /// Returns the request context acting as the bootstrap user.
    #[must_use]
    pub const fn context(&self) -> RequestContext {
        RequestContext::new(self.workspace.id(), self.user.id())
    }
}

/// Partial workspace update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkspaceRequest {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New description; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    /// New settings.
    #[serde(default)]
    pub settings: Option<WorkspaceSettings>,
}

/// Service-level errors for workspace operations.
#[derive(Debug, Error)]
pub enum WorkspaceServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] WorkspaceDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] WorkspaceRepositoryError),
    /// The workspace does not exist.
    #[error("workspace not found: {0}")]
    NotFound(WorkspaceId),
}

/// Result type for workspace service operations.
pub type WorkspaceServiceResult<T> = Result<T, WorkspaceServiceError>;

/// Workspace bootstrap and settings service.
pub struct WorkspaceService<W, U, C>
where
    W: WorkspaceRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    workspaces: Arc<W>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<W, U, C> WorkspaceService<W, U, C>
where
    W: WorkspaceRepository + ?Sized,
    U: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new workspace service.
    #[must_use]
    pub const fn new(workspaces: Arc<W>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            workspaces,
            users,
            clock,
        }
    }

    /// Returns the bootstrap user and workspace, creating either if missing.
    ///
    /// Repeated calls with the same email return the same records.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError`] when the bootstrap identity is
    /// invalid or persistence fails.
    pub async fn get_or_create(
        &self,
        request: &BootstrapRequest,
    ) -> WorkspaceServiceResult<Bootstrapped> {
        let email = EmailAddress::new(&request.email)?;
        let user = self.get_or_create_user(&email, &request.user_name).await?;

        if let Some(workspace) = self.workspaces.find_by_owner(user.id()).await? {
            return Ok(Bootstrapped { user, workspace });
        }

        let mut workspace = Workspace::new(&request.workspace_name, user.id(), &*self.clock)?;
        if let Some(description) = &request.workspace_description {
            workspace = workspace.with_description(description);
        }
        match self.workspaces.store(&workspace).await {
            Ok(()) => {
                info!(
                    workspace_id = %workspace.id(),
                    owner_id = %user.id(),
                    "created workspace"
                );
                Ok(Bootstrapped { user, workspace })
            }
            Err(WorkspaceRepositoryError::OwnerTaken(owner_id)) => {
                match self.workspaces.find_by_owner(owner_id).await? {
                    Some(winner) => Ok(Bootstrapped {
                        user,
                        workspace: winner,
                    }),
                    None => Err(WorkspaceRepositoryError::OwnerTaken(owner_id).into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Loads a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError::NotFound`] when it does not exist.
    pub async fn get(&self, id: WorkspaceId) -> WorkspaceServiceResult<Workspace> {
        self.workspaces
            .find_by_id(id)
            .await?
            .ok_or(WorkspaceServiceError::NotFound(id))
    }

    /// Applies a partial update to the caller's workspace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceServiceError`] when the workspace is missing, the
    /// new name is blank, or persistence fails.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        request: UpdateWorkspaceRequest,
    ) -> WorkspaceServiceResult<Workspace> {
        let mut workspace = self.get(ctx.workspace_id).await?;
        if let Some(name) = &request.name {
            workspace.rename(name, &*self.clock)?;
        }
        if let Some(description) = request.description {
            workspace.set_description(description.as_deref(), &*self.clock);
        }
        if let Some(settings) = request.settings {
            workspace.set_settings(settings, &*self.clock);
        }
        self.workspaces.update(&workspace).await?;
        Ok(workspace)
    }

    async fn get_or_create_user(
        &self,
        email: &EmailAddress,
        name: &str,
    ) -> WorkspaceServiceResult<User> {
        if let Some(user) = self.users.find_by_email(email).await? {
            return Ok(user);
        }
        let user = User::new(email.clone(), name, &*self.clock)?;
        match self.users.store(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), "created bootstrap user");
                Ok(user)
            }
            Err(WorkspaceRepositoryError::DuplicateEmail(existing)) => {
                match self.users.find_by_email(email).await? {
                    Some(winner) => Ok(winner),
                    None => Err(WorkspaceRepositoryError::DuplicateEmail(existing).into()),
                }
            }
            Err(err) => Err(err.into()),
        }
    }
}
