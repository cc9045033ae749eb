//! Service layer for per-list custom field definitions.

use crate::context::RequestContext;
use crate::field::{
    domain::{
        FieldDefinition, FieldDomainError, FieldDraft, FieldId, FieldKind, FieldPatch,
        FieldPlacement, FieldSettings, SelectOption,
    },
    ports::{FieldDefinitionRepository, FieldRepositoryError},
};
use crate::list::{
    domain::{ListId, TaskList},
    ports::{ListRepository, ListRepositoryError},
};
use crate::ordering::next_position;
use crate::patch::deserialize_some;
use mockable::Clock;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a field definition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFieldRequest {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Field kind token.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Advisory required flag.
    #[serde(default)]
    pub required: bool,
    /// Select options.
    #[serde(default)]
    pub options: Vec<SelectOption>,
    /// Default value.
    #[serde(default)]
    pub default_value: Option<Value>,
    /// Type-dependent settings.
    #[serde(default)]
    pub settings: FieldSettings,
}

impl CreateFieldRequest {
    /// Creates a request with the required members.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Marks the field as required.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the select options.
    #[must_use]
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Sets type-dependent settings.
    #[must_use]
    pub fn with_settings(mut self, settings: FieldSettings) -> Self {
        self.settings = settings;
        self
    }

    fn into_draft(self) -> Result<FieldDraft, FieldDomainError> {
        let kind = FieldKind::try_from(self.kind.as_str())?;
        let mut draft = FieldDraft::new(self.name, kind)
            .with_required(self.required)
            .with_options(self.options)
            .with_settings(self.settings);
        if let Some(value) = self.default_value {
            draft = draft.with_default_value(value);
        }
        draft.validate()?;
        Ok(draft)
    }
}

/// Request payload for a partial field definition update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldRequest {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New kind token.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// New required flag.
    #[serde(default)]
    pub required: Option<bool>,
    /// Replacement options.
    #[serde(default)]
    pub options: Option<Vec<SelectOption>>,
    /// Replacement default value; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub default_value: Option<Option<Value>>,
    /// Replacement settings.
    #[serde(default)]
    pub settings: Option<FieldSettings>,
    /// New position.
    #[serde(default)]
    pub order: Option<i64>,
}

impl UpdateFieldRequest {
    fn into_patch(self) -> Result<FieldPatch, FieldDomainError> {
        let mut patch = FieldPatch::new();
        if let Some(name) = self.name {
            patch = patch.with_name(name);
        }
        if let Some(kind) = self.kind {
            patch = patch.with_kind(FieldKind::try_from(kind.as_str())?);
        }
        if let Some(required) = self.required {
            patch = patch.with_required(required);
        }
        if let Some(options) = self.options {
            patch = patch.with_options(options);
        }
        if let Some(default_value) = self.default_value {
            patch = patch.with_default_value(default_value);
        }
        if let Some(settings) = self.settings {
            patch = patch.with_settings(settings);
        }
        if let Some(order) = self.order {
            patch = patch.with_order(order);
        }
        Ok(patch)
    }
}

/// Service-level errors for field definition operations.
#[derive(Debug, Error)]
pub enum FieldServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] FieldDomainError),
    /// Field repository operation failed.
    #[error(transparent)]
    Repository(#[from] FieldRepositoryError),
    /// List repository operation failed.
    #[error(transparent)]
    Lists(#[from] ListRepositoryError),
    /// The list does not exist in the caller's workspace.
    #[error("list not found: {0}")]
    ListNotFound(ListId),
    /// The field does not exist in the list.
    #[error("field not found: {0}")]
    NotFound(FieldId),
}

/// Result type for field definition service operations.
pub type FieldServiceResult<T> = Result<T, FieldServiceError>;

/// Field definition store scoped to lists.
pub struct FieldDefinitionService<F, L, C>
where
    F: FieldDefinitionRepository + ?Sized,
    L: ListRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fields: Arc<F>,
    lists: Arc<L>,
    clock: Arc<C>,
}

impl<F, L, C> FieldDefinitionService<F, L, C>
where
    F: FieldDefinitionRepository + ?Sized,
    L: ListRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new field definition service.
    #[must_use]
    pub const fn new(fields: Arc<F>, lists: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            fields,
            lists,
            clock,
        }
    }

    /// Returns the list's definitions ordered by `order`, then creation time.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::ListNotFound`] when the list is not in
    /// the caller's workspace.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
    ) -> FieldServiceResult<Vec<FieldDefinition>> {
        self.require_list(ctx, list_id).await?;
        Ok(self.fields.list_by_list(list_id).await?)
    }

    /// Returns one definition.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the list or field does not match.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        field_id: FieldId,
    ) -> FieldServiceResult<FieldDefinition> {
        self.require_list(ctx, list_id).await?;
        self.fields
            .find(list_id, field_id)
            .await?
            .ok_or(FieldServiceError::NotFound(field_id))
    }

    /// Creates a definition appended after the list's existing fields.
    ///
    /// # Errors
    ///
    /// Returns [`FieldServiceError::Domain`] when the name is blank, the kind
    /// is unknown, options are missing for a select kind, or the default
    /// value does not fit. Nothing is written in that case.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        request: CreateFieldRequest,
    ) -> FieldServiceResult<FieldDefinition> {
        let draft = request.into_draft()?;
        let list = self.require_list(ctx, list_id).await?;
        let order = next_position(self.fields.max_order(list_id).await?);
        let placement = FieldPlacement {
            list_id,
            workspace_id: list.workspace_id(),
            order,
            created_by: ctx.user_id,
        };
        let field = FieldDefinition::new(draft, placement, &*self.clock)?;
        self.fields.store(&field).await?;
        info!(
            field_id = %field.id(),
            %list_id,
            kind = %field.kind(),
            "created field definition"
        );
        Ok(field)
    }

    /// Applies a partial update to a definition.
    ///
    /// Stored task values are never migrated when the kind changes.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the list or field does not match, or
    /// [`FieldServiceError::Domain`] when the patched definition is invalid.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        field_id: FieldId,
        request: UpdateFieldRequest,
    ) -> FieldServiceResult<FieldDefinition> {
        let patch = request.into_patch()?;
        let mut field = self.get(ctx, list_id, field_id).await?;
        field.apply_patch(patch, &*self.clock)?;
        self.fields.update(&field).await?;
        Ok(field)
    }

    /// Deletes a definition. Task values referencing it are left in place.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the list or field does not match.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
        field_id: FieldId,
    ) -> FieldServiceResult<()> {
        self.require_list(ctx, list_id).await?;
        if !self.fields.delete(list_id, field_id).await? {
            return Err(FieldServiceError::NotFound(field_id));
        }
        info!(%field_id, %list_id, "deleted field definition");
        Ok(())
    }

    async fn require_list(
        &self,
        ctx: &RequestContext,
        list_id: ListId,
    ) -> FieldServiceResult<TaskList> {
        self.lists
            .find(ctx.workspace_id, list_id)
            .await?
            .ok_or(FieldServiceError::ListNotFound(list_id))
    }
}
