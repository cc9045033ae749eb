//! In-memory repository for tasks.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::list::domain::ListId;
use crate::task::{
    domain::{Task, TaskId, TaskQuery},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        let slot = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find(&self, list_id: ListId, task_id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks
            .get(&task_id)
            .filter(|task| task.list_id() == list_id)
            .cloned())
    }

    async fn find_by_id(&self, task_id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks.get(&task_id).cloned())
    }

    async fn query(&self, list_id: ListId, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_error)?;
        let in_list = tasks
            .values()
            .filter(|task| task.list_id() == list_id)
            .cloned()
            .collect();
        Ok(query.apply(in_list))
    }

    async fn max_order(&self, list_id: ListId) -> TaskRepositoryResult<Option<i64>> {
        let tasks = self.state.read().map_err(lock_error)?;
        Ok(tasks
            .values()
            .filter(|task| task.list_id() == list_id)
            .map(Task::order)
            .max())
    }

    async fn delete(&self, list_id: ListId, task_id: TaskId) -> TaskRepositoryResult<bool> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        let owned = tasks
            .get(&task_id)
            .is_some_and(|task| task.list_id() == list_id);
        if owned {
            tasks.remove(&task_id);
        }
        Ok(owned)
    }

    async fn delete_by_list(&self, list_id: ListId) -> TaskRepositoryResult<u64> {
        let mut tasks = self.state.write().map_err(lock_error)?;
        let before = tasks.len();
        tasks.retain(|_, task| task.list_id() != list_id);
        Ok(u64::try_from(before - tasks.len()).unwrap_or(u64::MAX))
    }
}
