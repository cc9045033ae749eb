//! In-memory repository for field definitions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::field::{
    domain::{FieldDefinition, FieldId},
    ports::{FieldDefinitionRepository, FieldRepositoryError, FieldRepositoryResult},
};
use crate::list::domain::ListId;

/// Thread-safe in-memory field definition repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFieldDefinitionRepository {
    state: Arc<RwLock<HashMap<FieldId, FieldDefinition>>>,
}

impl InMemoryFieldDefinitionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> FieldRepositoryError {
    FieldRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl FieldDefinitionRepository for InMemoryFieldDefinitionRepository {
    async fn store(&self, field: &FieldDefinition) -> FieldRepositoryResult<()> {
        let mut fields = self.state.write().map_err(lock_error)?;
        if fields.contains_key(&field.id()) {
            return Err(FieldRepositoryError::DuplicateField(field.id()));
        }
        fields.insert(field.id(), field.clone());
        Ok(())
    }

    async fn update(&self, field: &FieldDefinition) -> FieldRepositoryResult<()> {
        let mut fields = self.state.write().map_err(lock_error)?;
        let slot = fields
            .get_mut(&field.id())
            .ok_or(FieldRepositoryError::NotFound(field.id()))?;
        *slot = field.clone();
        Ok(())
    }

    async fn find(
        &self,
        list_id: ListId,
        field_id: FieldId,
    ) -> FieldRepositoryResult<Option<FieldDefinition>> {
        let fields = self.state.read().map_err(lock_error)?;
        Ok(fields
            .get(&field_id)
            .filter(|field| field.list_id() == list_id)
            .cloned())
    }

    async fn list_by_list(&self, list_id: ListId) -> FieldRepositoryResult<Vec<FieldDefinition>> {
        let fields = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<FieldDefinition> = fields
            .values()
            .filter(|field| field.list_id() == list_id)
            .cloned()
            .collect();
        matching.sort_by_key(|field| (field.order(), field.created_at()));
        Ok(matching)
    }

    async fn max_order(&self, list_id: ListId) -> FieldRepositoryResult<Option<i64>> {
        let fields = self.state.read().map_err(lock_error)?;
        Ok(fields
            .values()
            .filter(|field| field.list_id() == list_id)
            .map(FieldDefinition::order)
            .max())
    }

    async fn delete(&self, list_id: ListId, field_id: FieldId) -> FieldRepositoryResult<bool> {
        let mut fields = self.state.write().map_err(lock_error)?;
        let owned = fields
            .get(&field_id)
            .is_some_and(|field| field.list_id() == list_id);
        if owned {
            fields.remove(&field_id);
        }
        Ok(owned)
    }

    async fn delete_by_list(&self, list_id: ListId) -> FieldRepositoryResult<u64> {
        let mut fields = self.state.write().map_err(lock_error)?;
        let before = fields.len();
        fields.retain(|_, field| field.list_id() != list_id);
        Ok(u64::try_from(before - fields.len()).unwrap_or(u64::MAX))
    }
}
