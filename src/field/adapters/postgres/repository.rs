//! `PostgreSQL` repository implementation for field definitions.

use super::{models::NewFieldRow, schema::field_definitions};
use crate::field::{
    domain::{FieldDefinition, FieldId},
    ports::{FieldDefinitionRepository, FieldRepositoryError, FieldRepositoryResult},
};
use crate::list::domain::ListId;
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL`-backed field definition repository.
#[derive(Debug, Clone)]
pub struct PostgresFieldDefinitionRepository {
    pool: PgPool,
}

impl PostgresFieldDefinitionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> FieldRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> FieldRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, FieldRepositoryError::persistence)?;
                f(&mut connection)
            },
            FieldRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl FieldDefinitionRepository for PostgresFieldDefinitionRepository {
    async fn store(&self, field: &FieldDefinition) -> FieldRepositoryResult<()> {
        let field_id = field.id();
        let new_row = to_new_row(field)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(field_definitions::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        FieldRepositoryError::DuplicateField(field_id)
                    }
                    _ => FieldRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, field: &FieldDefinition) -> FieldRepositoryResult<()> {
        let field_id = field.id();
        let NewFieldRow {
            id,
            position,
            document,
            updated_at,
            ..
        } = to_new_row(field)?;
        self.run_blocking(move |connection| {
            let target = field_definitions::table.filter(field_definitions::id.eq(id));
            let updated = diesel::update(target)
                .set((
                    field_definitions::position.eq(position),
                    field_definitions::document.eq(document),
                    field_definitions::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(FieldRepositoryError::persistence)?;
            if updated == 0 {
                return Err(FieldRepositoryError::NotFound(field_id));
            }
            Ok(())
        })
        .await
    }

    async fn find(
        &self,
        list_id: ListId,
        field_id: FieldId,
    ) -> FieldRepositoryResult<Option<FieldDefinition>> {
        self.run_blocking(move |connection| {
            let document = field_definitions::table
                .filter(field_definitions::id.eq(field_id.into_inner()))
                .filter(field_definitions::list_id.eq(list_id.into_inner()))
                .select(field_definitions::document)
                .first::<Value>(connection)
                .optional()
                .map_err(FieldRepositoryError::persistence)?;
            document.map(document_to_field).transpose()
        })
        .await
    }

    async fn list_by_list(&self, list_id: ListId) -> FieldRepositoryResult<Vec<FieldDefinition>> {
        self.run_blocking(move |connection| {
            field_definitions::table
                .filter(field_definitions::list_id.eq(list_id.into_inner()))
                .order((
                    field_definitions::position.asc(),
                    field_definitions::created_at.asc(),
                ))
                .select(field_definitions::document)
                .load::<Value>(connection)
                .map_err(FieldRepositoryError::persistence)?
                .into_iter()
                .map(document_to_field)
                .collect()
        })
        .await
    }

    async fn max_order(&self, list_id: ListId) -> FieldRepositoryResult<Option<i64>> {
        self.run_blocking(move |connection| {
            field_definitions::table
                .filter(field_definitions::list_id.eq(list_id.into_inner()))
                .select(diesel::dsl::max(field_definitions::position))
                .first::<Option<i64>>(connection)
                .map_err(FieldRepositoryError::persistence)
        })
        .await
    }

    async fn delete(&self, list_id: ListId, field_id: FieldId) -> FieldRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                field_definitions::table
                    .filter(field_definitions::id.eq(field_id.into_inner()))
                    .filter(field_definitions::list_id.eq(list_id.into_inner())),
            )
            .execute(connection)
            .map_err(FieldRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn delete_by_list(&self, list_id: ListId) -> FieldRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                field_definitions::table
                    .filter(field_definitions::list_id.eq(list_id.into_inner())),
            )
            .execute(connection)
            .map_err(FieldRepositoryError::persistence)?;
            u64::try_from(removed).map_err(FieldRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(field: &FieldDefinition) -> FieldRepositoryResult<NewFieldRow> {
    let document = serde_json::to_value(field).map_err(FieldRepositoryError::persistence)?;
    Ok(NewFieldRow {
        id: field.id().into_inner(),
        list_id: field.list_id().into_inner(),
        workspace_id: field.workspace_id().into_inner(),
        position: field.order(),
        document,
        created_at: field.created_at(),
        updated_at: field.updated_at(),
    })
}

fn document_to_field(document: Value) -> FieldRepositoryResult<FieldDefinition> {
    serde_json::from_value(document).map_err(FieldRepositoryError::persistence)
}
