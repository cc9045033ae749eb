//! Service layer for lists.

use super::{CascadeDeletion, CascadeError, CascadeProgress, CascadeStep};
use crate::context::RequestContext;
use crate::field::ports::FieldDefinitionRepository;
use crate::list::{
    domain::{ListDomainError, ListId, ListPatch, TaskList},
    ports::{ListRepository, ListRepositoryError},
};
use crate::ordering::next_position;
use crate::task::ports::TaskRepository;
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    /// List name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Display color; a default is used when absent.
    #[serde(default)]
    pub color: Option<String>,
    /// Display icon; a default is used when absent.
    #[serde(default)]
    pub icon: Option<String>,
}

impl CreateListRequest {
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

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the display icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Service-level errors for list operations.
#[derive(Debug, Error)]
pub enum ListServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ListDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ListRepositoryError),
    /// The list does not exist in the caller's workspace.
    #[error("list not found: {0}")]
    NotFound(ListId),
    /// A cascading delete stopped part-way.
    #[error(transparent)]
    Cascade(#[from] CascadeError),
}

/// Result type for list service operations.
pub type ListServiceResult<T> = Result<T, ListServiceError>;

/// List management and cascade delete service.
pub struct ListService<L, T, F, C>
where
    L: ListRepository + ?Sized,
    T: TaskRepository + ?Sized,
    F: FieldDefinitionRepository + ?Sized,
    C: Clock + Send + Sync,
{
    lists: Arc<L>,
    tasks: Arc<T>,
    fields: Arc<F>,
    clock: Arc<C>,
}

impl<L, T, F, C> ListService<L, T, F, C>
where
    L: ListRepository + ?Sized,
    T: TaskRepository + ?Sized,
    F: FieldDefinitionRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new list service.
    #[must_use]
    pub const fn new(lists: Arc<L>, tasks: Arc<T>, fields: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            lists,
            tasks,
            fields,
            clock,
        }
    }

    /// Returns the workspace's lists ordered by `order`, then creation time.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::Repository`] when the lookup fails.
    pub async fn list(&self, ctx: &RequestContext) -> ListServiceResult<Vec<TaskList>> {
        Ok(self.lists.list_by_workspace(ctx.workspace_id).await?)
    }

    /// Returns one list.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::NotFound`] when the list is not in the
    /// caller's workspace.
    pub async fn get(&self, ctx: &RequestContext, list_id: ListId) -> ListServiceResult<TaskList> {
        self.lists
            .find(ctx.workspace_id, list_id)
            .await?
            .ok_or(ListServiceError::NotFound(list_id))
    }

    /// Creates a list appended after the workspace's existing lists.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::Domain`] when the name is blank.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateListRequest,
    ) -> ListServiceResult<TaskList> {
        let order = next_position(self.lists.max_order(ctx.workspace_id).await?);
        let mut list = TaskList::new(
            &request.name,
            ctx.workspace_id,
            order,
            ctx.user_id,
            &*self.clock,
        )?;
        if let Some(description) = &request.description {
            list = list.with_description(description);
        }
        if let Some(color) = request.color {
            list = list.with_color(color);
        }
        if let Some(icon) = request.icon {
            list = list.with_icon(icon);
        }
        self.lists.store(&list).await?;
        info!(list_id = %list.id(), order, "created list");
        Ok(list)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::NotFound`] when the list is not in the
    /// caller's workspace, or [`ListServiceError::Domain`] for a blank name.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        patch: ListPatch,
    ) -> ListServiceResult<TaskList> {
        let mut list = self.get(ctx, list_id).await?;
        list.apply_patch(patch, &*self.clock)?;
        self.lists.update(&list).await?;
        Ok(list)
    }

    /// Deletes the list's tasks, then its field definitions, then the list.
    ///
    /// # Errors
    ///
    /// Returns [`ListServiceError::NotFound`] when the list is not in the
    /// caller's workspace, or [`ListServiceError::Cascade`] describing the
    /// completed steps when a later step fails. Completed steps are not
    /// rolled back.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
    ) -> ListServiceResult<CascadeDeletion> {
        self.get(ctx, list_id).await?;
        let mut progress = CascadeProgress::default();

        let tasks_deleted = self
            .tasks
            .delete_by_list(list_id)
            .await
            .map_err(|err| cascade_failure(list_id, progress, CascadeStep::Tasks, err))?;
        progress.tasks_deleted = Some(tasks_deleted);

        let fields_deleted = self
            .fields
            .delete_by_list(list_id)
            .await
            .map_err(|err| {
                cascade_failure(list_id, progress, CascadeStep::FieldDefinitions, err)
            })?;
        progress.fields_deleted = Some(fields_deleted);

        let removed = self
            .lists
            .delete(ctx.workspace_id, list_id)
            .await
            .map_err(|err| cascade_failure(list_id, progress, CascadeStep::List, err))?;
        if !removed {
            return Err(ListServiceError::NotFound(list_id));
        }

        info!(%list_id, tasks_deleted, fields_deleted, "deleted list");
        Ok(CascadeDeletion {
            list_id,
            tasks_deleted,
            fields_deleted,
        })
    }
}

fn cascade_failure(
    list_id: ListId,
    progress: CascadeProgress,
    failed_step: CascadeStep,
    source: impl std::error::Error + Send + Sync + 'static,
) -> CascadeError {
    warn!(%list_id, step = %failed_step, error = %source, "list cascade stopped");
    CascadeError::new(list_id, progress, failed_step, source)
}
