//! Field definition aggregate and its create/update inputs.

use super::{
    FieldDomainError, FieldId, FieldKind, FieldSettings, FieldValueError, SelectOption,
    render_value, validate_definition_shape, validate_value,
};
use crate::list::domain::ListId;
use crate::workspace::domain::{UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user-defined custom field attached to one list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    id: FieldId,
    list_id: ListId,
    workspace_id: WorkspaceId,
    name: String,
    #[serde(rename = "type")]
    kind: FieldKind,
    order: i64,
    required: bool,
    #[serde(default)]
    options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(default)]
    settings: FieldSettings,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Where a new definition lives and who created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPlacement {
    /// Owning list.
    pub list_id: ListId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Position among the list's fields.
    pub order: i64,
    /// Creating user.
    pub created_by: UserId,
}

/// Unvalidated input describing a new field definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDraft {
    name: String,
    kind: FieldKind,
    required: bool,
    options: Vec<SelectOption>,
    default_value: Option<Value>,
    settings: FieldSettings,
}

impl FieldDraft {
    /// Starts a draft with no options, settings or default.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            options: Vec::new(),
            default_value: None,
            settings: FieldSettings::default(),
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

    /// Sets the default value. `null` clears it.
    #[must_use]
    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default_value = (!value.is_null()).then_some(value);
        self
    }

    /// Sets type-dependent settings.
    #[must_use]
    pub fn with_settings(mut self, settings: FieldSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Checks the draft without touching any store.
    ///
    /// # Errors
    ///
    /// Returns [`FieldDomainError`] when the name is blank, the option set or
    /// settings are inconsistent, or the default value does not fit.
    pub fn validate(&self) -> Result<(), FieldDomainError> {
        check_definition(
            &self.name,
            self.kind,
            &self.options,
            &self.settings,
            self.default_value.as_ref(),
        )
    }
}

/// Partial update for a field definition. Unset members are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    name: Option<String>,
    kind: Option<FieldKind>,
    required: Option<bool>,
    options: Option<Vec<SelectOption>>,
    default_value: Option<Option<Value>>,
    settings: Option<FieldSettings>,
    order: Option<i64>,
}

impl FieldPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the field.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the field kind. Stored task values are not migrated.
    #[must_use]
    pub const fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Changes the advisory required flag.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Replaces the option set.
    #[must_use]
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// Replaces the default value; `None` or `null` clears it.
    #[must_use]
    pub fn with_default_value(mut self, value: Option<Value>) -> Self {
        self.default_value = Some(value.filter(|given| !given.is_null()));
        self
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: FieldSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Moves the field to another position.
    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

impl FieldDefinition {
    /// Builds a definition from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`FieldDomainError`] when the draft is invalid.
    pub fn new(
        draft: FieldDraft,
        placement: FieldPlacement,
        clock: &impl Clock,
    ) -> Result<Self, FieldDomainError> {
        draft.validate()?;
        let timestamp = clock.utc();
        Ok(Self {
            id: FieldId::new(),
            list_id: placement.list_id,
            workspace_id: placement.workspace_id,
            name: draft.name.trim().to_owned(),
            kind: draft.kind,
            order: placement.order,
            required: draft.required,
            options: draft.options,
            default_value: draft.default_value,
            settings: draft.settings,
            created_by: placement.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Applies a partial update.
    ///
    /// The patched definition is checked as a whole. A kind change keeps the
    /// stored default value unless the patch replaces it. Nothing changes
    /// when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`FieldDomainError`] when the resulting definition is invalid.
    pub fn apply_patch(
        &mut self,
        patch: FieldPatch,
        clock: &impl Clock,
    ) -> Result<(), FieldDomainError> {
        let mut candidate = self.clone();
        let default_replaced = patch.default_value.is_some();
        if let Some(name) = patch.name {
            candidate.name = name.trim().to_owned();
        }
        if let Some(kind) = patch.kind {
            candidate.kind = kind;
        }
        if let Some(required) = patch.required {
            candidate.required = required;
        }
        if let Some(options) = patch.options {
            candidate.options = options;
        }
        if let Some(default_value) = patch.default_value {
            candidate.default_value = default_value;
        }
        if let Some(settings) = patch.settings {
            candidate.settings = settings;
        }
        if let Some(order) = patch.order {
            candidate.order = order;
        }

        let checked_default = if default_replaced {
            candidate.default_value.as_ref()
        } else {
            None
        };
        check_definition(
            &candidate.name,
            candidate.kind,
            &candidate.options,
            &candidate.settings,
            checked_default,
        )?;

        candidate.updated_at = clock.utc();
        *self = candidate;
        Ok(())
    }

    /// Checks a task value against this definition.
    ///
    /// # Errors
    ///
    /// Returns [`FieldValueError`] when the value does not fit.
    pub fn validate_value(&self, value: &Value) -> Result<(), FieldValueError> {
        validate_value(self.kind, &self.settings, &self.options, value)
    }

    /// Renders a task value for display.
    #[must_use]
    pub fn render(&self, value: &Value) -> Option<String> {
        render_value(self.kind, &self.options, value)
    }

    /// Returns the field identifier.
    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// Returns the owning list.
    #[must_use]
    pub const fn list_id(&self) -> ListId {
        self.list_id
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace_id(&self) -> WorkspaceId {
        self.workspace_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the position among the list's fields.
    #[must_use]
    pub const fn order(&self) -> i64 {
        self.order
    }

    /// Returns the advisory required flag.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Returns the select options.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Returns the default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Returns the type-dependent settings.
    #[must_use]
    pub const fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn check_definition(
    name: &str,
    kind: FieldKind,
    options: &[SelectOption],
    settings: &FieldSettings,
    default_value: Option<&Value>,
) -> Result<(), FieldDomainError> {
    if name.trim().is_empty() {
        return Err(FieldDomainError::EmptyFieldName);
    }
    validate_definition_shape(kind, options)?;
    settings.validate()?;
    if let Some(value) = default_value {
        validate_value(kind, settings, options, value)
            .map_err(FieldDomainError::InvalidDefaultValue)?;
    }
    Ok(())
}
