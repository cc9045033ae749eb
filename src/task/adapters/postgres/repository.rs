//! `PostgreSQL` repository implementation for task storage.

use super::{models::NewTaskRow, schema::tasks};
use crate::list::domain::ListId;
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::task::{
    domain::{Task, TaskId, TaskQuery},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;
use tracing::debug;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let NewTaskRow {
            id,
            position,
            status,
            document,
            updated_at,
            ..
        } = to_new_row(task)?;
        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(id)))
                .set((
                    tasks::position.eq(position),
                    tasks::status.eq(status),
                    tasks::document.eq(document),
                    tasks::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find(&self, list_id: ListId, task_id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .filter(tasks::list_id.eq(list_id.into_inner()))
                .select(tasks::document)
                .first::<Value>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .map(document_to_task)
                .transpose()
        })
        .await
    }

    async fn find_by_id(&self, task_id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::id.eq(task_id.into_inner()))
                .select(tasks::document)
                .first::<Value>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .map(document_to_task)
                .transpose()
        })
        .await
    }

    async fn query(&self, list_id: ListId, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let statuses: Vec<String> = query
            .filter
            .statuses()
            .iter()
            .map(|status| status.as_str().to_owned())
            .collect();
        let documents = self
            .run_blocking(move |connection| {
                let mut select = tasks::table
                    .filter(tasks::list_id.eq(list_id.into_inner()))
                    .select(tasks::document)
                    .into_boxed();
                if !statuses.is_empty() {
                    select = select.filter(tasks::status.eq_any(statuses));
                }
                select
                    .load::<Value>(connection)
                    .map_err(TaskRepositoryError::persistence)
            })
            .await?;
        debug!(%list_id, loaded = documents.len(), "filtering tasks");
        let loaded = documents
            .into_iter()
            .map(document_to_task)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        Ok(query.apply(loaded))
    }

    async fn max_order(&self, list_id: ListId) -> TaskRepositoryResult<Option<i64>> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::list_id.eq(list_id.into_inner()))
                .select(diesel::dsl::max(tasks::position))
                .first::<Option<i64>>(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn delete(&self, list_id: ListId, task_id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::list_id.eq(list_id.into_inner())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn delete_by_list(&self, list_id: ListId) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let removed =
                diesel::delete(tasks::table.filter(tasks::list_id.eq(list_id.into_inner())))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(removed).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let document = serde_json::to_value(task).map_err(TaskRepositoryError::persistence)?;
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        list_id: task.list_id().into_inner(),
        workspace_id: task.workspace_id().into_inner(),
        position: task.order(),
        status: task.status().as_str().to_owned(),
        document,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn document_to_task(document: Value) -> TaskRepositoryResult<Task> {
    serde_json::from_value(document).map_err(TaskRepositoryError::persistence)
}
