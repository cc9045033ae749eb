//! Repository port for field definition persistence.

use crate::field::domain::{FieldDefinition, FieldId};
use crate::list::domain::ListId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for field definition repository operations.
pub type FieldRepositoryResult<T> = Result<T, FieldRepositoryError>;

/// Field definition persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FieldDefinitionRepository: Send + Sync {
    /// Stores a new definition.
    ///
    /// # Errors
    ///
    /// Returns [`FieldRepositoryError::DuplicateField`] when the identifier
    /// already exists.
    async fn store(&self, field: &FieldDefinition) -> FieldRepositoryResult<()>;

    /// Replaces an existing definition.
    ///
    /// # Errors
    ///
    /// Returns [`FieldRepositoryError::NotFound`] when the definition does not
    /// exist.
    async fn update(&self, field: &FieldDefinition) -> FieldRepositoryResult<()>;

    /// Finds a definition belonging to `list_id`.
    async fn find(
        &self,
        list_id: ListId,
        field_id: FieldId,
    ) -> FieldRepositoryResult<Option<FieldDefinition>>;

    /// Returns the list's definitions ordered by `order`, then creation time.
    async fn list_by_list(&self, list_id: ListId) -> FieldRepositoryResult<Vec<FieldDefinition>>;

    /// Returns the largest `order` among the list's definitions.
    async fn max_order(&self, list_id: ListId) -> FieldRepositoryResult<Option<i64>>;

    /// Deletes one definition. Returns `false` when it did not exist.
    async fn delete(&self, list_id: ListId, field_id: FieldId) -> FieldRepositoryResult<bool>;

    /// Deletes every definition of a list and returns how many were removed.
    async fn delete_by_list(&self, list_id: ListId) -> FieldRepositoryResult<u64>;
}

/// Errors returned by field definition repository implementations.
#[derive(Debug, Clone, Error)]
pub enum FieldRepositoryError {
    /// A definition with the same identifier already exists.
    #[error("duplicate field identifier: {0}")]
    DuplicateField(FieldId),

    /// The definition was not found.
    #[error("field not found: {0}")]
    NotFound(FieldId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FieldRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
