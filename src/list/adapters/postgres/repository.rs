//! `PostgreSQL` repository implementation for lists.

use super::{models::NewListRow, schema::task_lists};
use crate::list::{
    domain::{ListId, TaskList},
    ports::{ListRepository, ListRepositoryError, ListRepositoryResult},
};
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::workspace::domain::WorkspaceId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL`-backed list repository.
#[derive(Debug, Clone)]
pub struct PostgresListRepository {
    pool: PgPool,
}

impl PostgresListRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ListRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ListRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, ListRepositoryError::persistence)?;
                f(&mut connection)
            },
            ListRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl ListRepository for PostgresListRepository {
    async fn store(&self, list: &TaskList) -> ListRepositoryResult<()> {
        let list_id = list.id();
        let new_row = to_new_row(list)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(task_lists::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ListRepositoryError::DuplicateList(list_id)
                    }
                    _ => ListRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, list: &TaskList) -> ListRepositoryResult<()> {
        let list_id = list.id();
        let NewListRow {
            id,
            position,
            document,
            updated_at,
            ..
        } = to_new_row(list)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(task_lists::table.filter(task_lists::id.eq(id)))
                .set((
                    task_lists::position.eq(position),
                    task_lists::document.eq(document),
                    task_lists::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(ListRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ListRepositoryError::NotFound(list_id));
            }
            Ok(())
        })
        .await
    }

    async fn find(
        &self,
        workspace_id: WorkspaceId,
        list_id: ListId,
    ) -> ListRepositoryResult<Option<TaskList>> {
        self.run_blocking(move |connection| {
            task_lists::table
                .filter(task_lists::id.eq(list_id.into_inner()))
                .filter(task_lists::workspace_id.eq(workspace_id.into_inner()))
                .select(task_lists::document)
                .first::<Value>(connection)
                .optional()
                .map_err(ListRepositoryError::persistence)?
                .map(document_to_list)
                .transpose()
        })
        .await
    }

    async fn list_by_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> ListRepositoryResult<Vec<TaskList>> {
        self.run_blocking(move |connection| {
            task_lists::table
                .filter(task_lists::workspace_id.eq(workspace_id.into_inner()))
                .order((task_lists::position.asc(), task_lists::created_at.asc()))
                .select(task_lists::document)
                .load::<Value>(connection)
                .map_err(ListRepositoryError::persistence)?
                .into_iter()
                .map(document_to_list)
                .collect()
        })
        .await
    }

    async fn max_order(&self, workspace_id: WorkspaceId) -> ListRepositoryResult<Option<i64>> {
        self.run_blocking(move |connection| {
            task_lists::table
                .filter(task_lists::workspace_id.eq(workspace_id.into_inner()))
                .select(diesel::dsl::max(task_lists::position))
                .first::<Option<i64>>(connection)
                .map_err(ListRepositoryError::persistence)
        })
        .await
    }

    async fn delete(
        &self,
        workspace_id: WorkspaceId,
        list_id: ListId,
    ) -> ListRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                task_lists::table
                    .filter(task_lists::id.eq(list_id.into_inner()))
                    .filter(task_lists::workspace_id.eq(workspace_id.into_inner())),
            )
            .execute(connection)
            .map_err(ListRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }
}

fn to_new_row(list: &TaskList) -> ListRepositoryResult<NewListRow> {
    let document = serde_json::to_value(list).map_err(ListRepositoryError::persistence)?;
    Ok(NewListRow {
        id: list.id().into_inner(),
        workspace_id: list.workspace_id().into_inner(),
        position: list.order(),
        document,
        created_at: list.created_at(),
        updated_at: list.updated_at(),
    })
}

fn document_to_list(document: Value) -> ListRepositoryResult<TaskList> {
    serde_json::from_value(document).map_err(ListRepositoryError::persistence)
}
