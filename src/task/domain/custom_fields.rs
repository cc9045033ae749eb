//! Custom field values carried by a task.
//!
//! Entries reference field definitions by id only. Definitions can be
//! deleted or retyped underneath stored entries, so every reader resolves
//! entries against the live definitions and skips the ones that no longer
//! resolve.

use super::TaskDomainError;
use crate::field::domain::{FieldDefinition, FieldId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// One `{fieldId, value}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldValue {
    /// Referenced field definition.
    pub field_id: FieldId,
    /// Raw value; `null` means unset.
    #[serde(default)]
    pub value: Value,
}

impl CustomFieldValue {
    /// Creates an entry.
    #[must_use]
    pub const fn new(field_id: FieldId, value: Value) -> Self {
        Self { field_id, value }
    }
}

/// Ordered custom field entries with at most one entry per field id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomFieldEntries(Vec<CustomFieldValue>);

impl CustomFieldEntries {
    /// Builds entries, rejecting repeated field ids.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DuplicateCustomField`] for the first
    /// repeated field id.
    pub fn new(entries: Vec<CustomFieldValue>) -> Result<Self, TaskDomainError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.field_id) {
                return Err(TaskDomainError::DuplicateCustomField(entry.field_id));
            }
        }
        Ok(Self(entries))
    }

    /// Returns the entries in stored order.
    #[must_use]
    pub fn as_slice(&self) -> &[CustomFieldValue] {
        &self.0
    }

    /// Returns `true` when no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the stored value for `field_id`, if any.
    #[must_use]
    pub fn get(&self, field_id: FieldId) -> Option<&Value> {
        self.0
            .iter()
            .find(|entry| entry.field_id == field_id)
            .map(|entry| &entry.value)
    }

    /// Checks every entry against the list's live definitions.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownCustomField`] when an entry names a
    /// field the list does not define, or
    /// [`TaskDomainError::InvalidCustomFieldValue`] when a value does not fit
    /// its definition.
    pub fn validate_against(&self, definitions: &[FieldDefinition]) -> Result<(), TaskDomainError> {
        for entry in &self.0 {
            let definition = find_definition(definitions, entry.field_id)
                .ok_or(TaskDomainError::UnknownCustomField(entry.field_id))?;
            definition.validate_value(&entry.value).map_err(|source| {
                TaskDomainError::InvalidCustomFieldValue {
                    field_id: entry.field_id,
                    field_name: definition.name().to_owned(),
                    source,
                }
            })?;
        }
        Ok(())
    }

    /// Replaces the live-field entries with `replacement`, keeping stored
    /// entries whose definition no longer exists.
    #[must_use]
    pub fn merge_preserving_orphans(
        &self,
        replacement: Self,
        definitions: &[FieldDefinition],
    ) -> Self {
        let orphans: Vec<CustomFieldValue> = self
            .0
            .iter()
            .filter(|entry| {
                find_definition(definitions, entry.field_id).is_none()
                    && replacement.get(entry.field_id).is_none()
            })
            .cloned()
            .collect();
        let mut merged = replacement.0;
        merged.extend(orphans);
        Self(merged)
    }

    /// Pairs each entry with its live definition, in definition order.
    pub fn live<'a>(
        &'a self,
        definitions: &'a [FieldDefinition],
    ) -> impl Iterator<Item = (&'a FieldDefinition, &'a Value)> + 'a {
        definitions.iter().filter_map(move |definition| {
            self.get(definition.id()).map(|value| (definition, value))
        })
    }
}

/// Returns the required definitions that have no usable value in `entries`.
///
/// The store never rejects a task for this; callers at the presentation
/// boundary decide what to do with the result.
#[must_use]
pub fn missing_required<'a>(
    definitions: &'a [FieldDefinition],
    entries: &CustomFieldEntries,
) -> Vec<&'a FieldDefinition> {
    definitions
        .iter()
        .filter(|definition| definition.required())
        .filter(|definition| entries.get(definition.id()).is_none_or(is_blank))
        .collect()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn find_definition(definitions: &[FieldDefinition], field_id: FieldId) -> Option<&FieldDefinition> {
    definitions.iter().find(|definition| definition.id() == field_id)
}
