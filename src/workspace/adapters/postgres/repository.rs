//! `PostgreSQL` repository implementations for workspaces and users.

use super::{
    models::{NewUserRow, NewWorkspaceRow},
    schema::{users, workspaces},
};
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::workspace::{
    domain::{EmailAddress, User, UserId, Workspace, WorkspaceId},
    ports::{
        UserRepository, WorkspaceRepository, WorkspaceRepositoryError, WorkspaceRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde::de::DeserializeOwned;
use serde_json::Value;

const OWNER_UNIQUE_CONSTRAINT: &str = "workspaces_owner_unique";

async fn run_blocking<F, T>(pool: &PgPool, f: F) -> WorkspaceRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> WorkspaceRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool_handle = pool.clone();
    run_blocking_with(
        move || {
            let mut connection =
                get_conn_with(&pool_handle, WorkspaceRepositoryError::persistence)?;
            f(&mut connection)
        },
        WorkspaceRepositoryError::persistence,
    )
    .await
}

fn from_document<T: DeserializeOwned>(document: Value) -> WorkspaceRepositoryResult<T> {
    serde_json::from_value(document).map_err(WorkspaceRepositoryError::persistence)
}

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> WorkspaceRepositoryResult<()> {
        let email = user.email().clone();
        let new_row = NewUserRow {
            id: user.id().into_inner(),
            email: email.as_str().to_owned(),
            document: serde_json::to_value(user).map_err(WorkspaceRepositoryError::persistence)?,
            created_at: user.created_at(),
        };
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkspaceRepositoryError::DuplicateEmail(email)
                    }
                    _ => WorkspaceRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> WorkspaceRepositoryResult<Option<User>> {
        run_blocking(&self.pool, move |connection| {
            users::table
                .filter(users::id.eq(id.into_inner()))
                .select(users::document)
                .first::<Value>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?
                .map(from_document)
                .transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> WorkspaceRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        run_blocking(&self.pool, move |connection| {
            users::table
                .filter(users::email.eq(lookup))
                .select(users::document)
                .first::<Value>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?
                .map(from_document)
                .transpose()
        })
        .await
    }

    async fn find_many(&self, ids: &[UserId]) -> WorkspaceRepositoryResult<Vec<User>> {
        let lookup: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        run_blocking(&self.pool, move |connection| {
            users::table
                .filter(users::id.eq_any(lookup))
                .select(users::document)
                .load::<Value>(connection)
                .map_err(WorkspaceRepositoryError::persistence)?
                .into_iter()
                .map(from_document)
                .collect()
        })
        .await
    }
}

/// `PostgreSQL`-backed workspace repository.
#[derive(Debug, Clone)]
pub struct PostgresWorkspaceRepository {
    pool: PgPool,
}

impl PostgresWorkspaceRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_workspace_row(workspace: &Workspace) -> WorkspaceRepositoryResult<NewWorkspaceRow> {
    Ok(NewWorkspaceRow {
        id: workspace.id().into_inner(),
        owner_id: workspace.owner_id().into_inner(),
        document: serde_json::to_value(workspace)
            .map_err(WorkspaceRepositoryError::persistence)?,
        created_at: workspace.created_at(),
        updated_at: workspace.updated_at(),
    })
}

#[async_trait]
impl WorkspaceRepository for PostgresWorkspaceRepository {
    async fn store(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()> {
        let workspace_id = workspace.id();
        let owner_id = workspace.owner_id();
        let new_row = to_workspace_row(workspace)?;
        run_blocking(&self.pool, move |connection| {
            diesel::insert_into(workspaces::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some(OWNER_UNIQUE_CONSTRAINT) =>
                    {
                        WorkspaceRepositoryError::OwnerTaken(owner_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkspaceRepositoryError::DuplicateWorkspace(workspace_id)
                    }
                    _ => WorkspaceRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, workspace: &Workspace) -> WorkspaceRepositoryResult<()> {
        let workspace_id = workspace.id();
        let NewWorkspaceRow {
            id,
            document,
            updated_at,
            ..
        } = to_workspace_row(workspace)?;
        run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(workspaces::table.filter(workspaces::id.eq(id)))
                .set((
                    workspaces::document.eq(document),
                    workspaces::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(WorkspaceRepositoryError::persistence)?;
            if updated == 0 {
                return Err(WorkspaceRepositoryError::WorkspaceNotFound(workspace_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: WorkspaceId) -> WorkspaceRepositoryResult<Option<Workspace>> {
        run_blocking(&self.pool, move |connection| {
            workspaces::table
                .filter(workspaces::id.eq(id.into_inner()))
                .select(workspaces::document)
                .first::<Value>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?
                .map(from_document)
                .transpose()
        })
        .await
    }

    async fn find_by_owner(
        &self,
        owner_id: UserId,
    ) -> WorkspaceRepositoryResult<Option<Workspace>> {
        run_blocking(&self.pool, move |connection| {
            workspaces::table
                .filter(workspaces::owner_id.eq(owner_id.into_inner()))
                .select(workspaces::document)
                .first::<Value>(connection)
                .optional()
                .map_err(WorkspaceRepositoryError::persistence)?
                .map(from_document)
                .transpose()
        })
        .await
    }
}
