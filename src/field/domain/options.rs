//! Select options and type-dependent field settings.

use super::{FieldKind, FieldShapeError};
use serde::{Deserialize, Serialize};

/// One choice offered by a select or multi-select field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    /// Display label.
    pub label: String,
    /// Stored token.
    pub value: String,
    /// Optional display color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SelectOption {
    /// Creates an option without a color.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: None,
        }
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Type-dependent constraints and display hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSettings {
    /// Inclusive lower bound for number fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Inclusive upper bound for number fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Display format hint for date fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Input placeholder for any kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl FieldSettings {
    /// Sets both number bounds.
    #[must_use]
    pub const fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets the placeholder hint.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Checks that configured bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`FieldShapeError::InvertedRange`] when `min > max`.
    pub fn validate(&self) -> Result<(), FieldShapeError> {
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(FieldShapeError::InvertedRange { min, max });
        }
        Ok(())
    }
}

/// Checks that a kind and its option list are consistent.
///
/// Select and multi-select need at least one option; every supplied option
/// needs a non-blank label and value. Options on other kinds are kept but
/// carry no meaning.
///
/// # Errors
///
/// Returns the first [`FieldShapeError`] found.
pub fn validate_definition_shape(
    kind: FieldKind,
    options: &[SelectOption],
) -> Result<(), FieldShapeError> {
    if kind.requires_options() && options.is_empty() {
        return Err(FieldShapeError::MissingOptions(kind));
    }
    for (index, option) in options.iter().enumerate() {
        if option.label.trim().is_empty() {
            return Err(FieldShapeError::BlankOptionLabel { index });
        }
        if option.value.trim().is_empty() {
            return Err(FieldShapeError::BlankOptionValue { index });
        }
    }
    Ok(())
}
