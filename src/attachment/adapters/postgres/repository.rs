//! `PostgreSQL` repository implementation for attachment metadata.

use super::{models::NewAttachmentRow, schema::attachments};
use crate::attachment::{
    domain::{Attachment, AttachmentId},
    ports::{AttachmentRepository, AttachmentRepositoryError, AttachmentRepositoryResult},
};
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::Value;

/// `PostgreSQL`-backed attachment repository.
#[derive(Debug, Clone)]
pub struct PostgresAttachmentRepository {
    pool: PgPool,
}

impl PostgresAttachmentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AttachmentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AttachmentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, AttachmentRepositoryError::persistence)?;
                f(&mut connection)
            },
            AttachmentRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl AttachmentRepository for PostgresAttachmentRepository {
    async fn store(&self, attachment: &Attachment) -> AttachmentRepositoryResult<()> {
        let attachment_id = attachment.id();
        let storage_id = attachment.storage_id().to_owned();
        let document =
            serde_json::to_value(attachment).map_err(AttachmentRepositoryError::persistence)?;
        let new_row = NewAttachmentRow {
            id: attachment_id.into_inner(),
            task_id: attachment.task_id().into_inner(),
            workspace_id: attachment.workspace_id().into_inner(),
            storage_id: storage_id.clone(),
            document,
            created_at: attachment.created_at(),
        };
        self.run_blocking(move |connection| {
            diesel::insert_into(attachments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some("attachments_storage_id_key") =>
                    {
                        AttachmentRepositoryError::DuplicateStorageId(storage_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AttachmentRepositoryError::DuplicateAttachment(attachment_id)
                    }
                    _ => AttachmentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find(
        &self,
        task_id: TaskId,
        attachment_id: AttachmentId,
    ) -> AttachmentRepositoryResult<Option<Attachment>> {
        self.run_blocking(move |connection| {
            attachments::table
                .filter(attachments::id.eq(attachment_id.into_inner()))
                .filter(attachments::task_id.eq(task_id.into_inner()))
                .select(attachments::document)
                .first::<Value>(connection)
                .optional()
                .map_err(AttachmentRepositoryError::persistence)?
                .map(document_to_attachment)
                .transpose()
        })
        .await
    }

    async fn list_by_task(&self, task_id: TaskId) -> AttachmentRepositoryResult<Vec<Attachment>> {
        self.run_blocking(move |connection| {
            attachments::table
                .filter(attachments::task_id.eq(task_id.into_inner()))
                .order((attachments::created_at.desc(), attachments::id.asc()))
                .select(attachments::document)
                .load::<Value>(connection)
                .map_err(AttachmentRepositoryError::persistence)?
                .into_iter()
                .map(document_to_attachment)
                .collect()
        })
        .await
    }

    async fn delete(
        &self,
        task_id: TaskId,
        attachment_id: AttachmentId,
    ) -> AttachmentRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                attachments::table
                    .filter(attachments::id.eq(attachment_id.into_inner()))
                    .filter(attachments::task_id.eq(task_id.into_inner())),
            )
            .execute(connection)
            .map_err(AttachmentRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }
}

fn document_to_attachment(document: Value) -> AttachmentRepositoryResult<Attachment> {
    serde_json::from_value(document).map_err(AttachmentRepositoryError::persistence)
}
