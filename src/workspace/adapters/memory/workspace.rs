//! In-memory repository for workspaces.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workspace::{
    domain::{UserId, Workspace, WorkspaceId},
    ports::{WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult},
};

/// Thread-safe in-memory workspace repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspaceRepository {
    state: Arc<RwLock<HashMap<WorkspaceId, Workspace>>>,
}

impl InMemoryWorkspaceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> WorkspaceRepositoryError {
    WorkspaceRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaceRepository {
    async fn store(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()> {
        let mut workspaces = self.state.write().map_err(lock_error)?;
        if workspaces.contains_key(&workspace.id()) {
            return Err(WorkspaceRepositoryError::DuplicateWorkspace(workspace.id()));
        }
        if workspaces
            .values()
            .any(|existing| existing.owner_id() == workspace.owner_id())
        {
            return Err(WorkspaceRepositoryError::OwnerTaken(workspace.owner_id()));
        }
        workspaces.insert(workspace.id(), workspace.clone());
        Ok(())
    }

    async fn update(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()> {
        let mut workspaces = self.state.write().map_err(lock_error)?;
        let slot = workspaces
            .get_mut(&workspace.id())
            .ok_or(WorkspaceRepositoryError::WorkspaceNotFound(workspace.id()))?;
        *slot = workspace.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: WorkspaceId) -> WorkspaceRepositoryResult<Option<Workspace>> {
        let workspaces = self.state.read().map_err(lock_error)?;
        Ok(workspaces.get(&id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: UserId,
    ) -> WorkspaceRepositoryResult<Option<Workspace>> {
        let workspaces = self.state.read().map_err(lock_error)?;
        Ok(workspaces
            .values()
            .find(|workspace| workspace.owner_id() == owner_id)
            .cloned())
    }
}
