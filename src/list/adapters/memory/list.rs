//! In-memory repository for lists.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::list::{
    domain::{ListId, TaskList},
    ports::{ListRepository, ListRepositoryError, ListRepositoryResult},
};
use crate::workspace::domain::WorkspaceId;

/// Thread-safe in-memory list repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListRepository {
    state: Arc<RwLock<HashMap<ListId, TaskList>>>,
}

impl InMemoryListRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ListRepositoryError {
    ListRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ListRepository for InMemoryListRepository {
    async fn store(&self, list: &TaskList) -> ListRepositoryResult<()> {
        let mut lists = self.state.write().map_err(lock_error)?;
        if lists.contains_key(&list.id()) {
            return Err(ListRepositoryError::DuplicateList(list.id()));
        }
        lists.insert(list.id(), list.clone());
        Ok(())
    }

    async fn update(&self, list: &TaskList) -> ListRepositoryResult<()> {
        let mut lists = self.state.write().map_err(lock_error)?;
        let slot = lists
            .get_mut(&list.id())
            .ok_or(ListRepositoryError::NotFound(list.id()))?;
        *slot = list.clone();
        Ok(())
    }

    async fn find(
        &self,
        workspace_id: WorkspaceId,
        list_id: ListId,
    ) -> ListRepositoryResult<Option<TaskList>> {
        let lists = self.state.read().map_err(lock_error)?;
        Ok(lists
            .get(&list_id)
            .filter(|list| list.workspace_id() == workspace_id)
            .cloned())
    }

    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> ListRepositoryResult<Vec<TaskList>> {
        let lists = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<TaskList> = lists
            .values()
            .filter(|list| list.workspace_id() == workspace_id)
            .cloned()
            .collect();
        matching.sort_by_key(|list| (list.order(), list.created_at()));
        Ok(matching)
    }

    async fn max_order(&self, workspace_id: WorkspaceId) -> ListRepositoryResult<Option<i64>> {
        let lists = self.state.read().map_err(lock_error)?;
        Ok(lists
            .values()
            .filter(|list| list.workspace_id() == workspace_id)
            .map(TaskList::order)
            .max())
    }

    async fn delete(
        &self,
        workspace_id: WorkspaceId,
        list_id: ListId,
    ) -> ListRepositoryResult<bool> {
        let mut lists = self.state.write().map_err(lock_error)?;
        let owned = lists
            .get(&list_id)
            .is_some_and(|list| list.workspace_id() == workspace_id);
        if owned {
            lists.remove(&list_id);
        }
        Ok(owned)
    }
}
