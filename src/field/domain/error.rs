//! Error types for field definitions and field values.

use super::{FieldKind, ValueShape};
use thiserror::Error;

/// Structural problems with a field definition's kind, options or settings.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldShapeError {
    /// The kind needs options but none were given.
    #[error("options are required for {0} fields")]
    MissingOptions(FieldKind),

    /// An option has a blank label.
    #[error("option {index} must have a non-empty label")]
    BlankOptionLabel {
        /// Zero-based option position.
        index: usize,
    },

    /// An option has a blank value.
    #[error("option {index} must have a non-empty value")]
    BlankOptionValue {
        /// Zero-based option position.
        index: usize,
    },

    /// Number bounds are inverted.
    #[error("minimum {min} exceeds maximum {max}")]
    InvertedRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
}

/// A value does not fit the shape its field definition prescribes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldValueError {
    /// The JSON type is wrong for the field kind.
    #[error("expected {expected} for a {kind} field")]
    WrongShape {
        /// Field kind the value was checked against.
        kind: FieldKind,
        /// Shape that kind requires.
        expected: ValueShape,
    },

    /// A number is smaller than `settings.min`.
    #[error("{value} is below the minimum of {min}")]
    BelowMinimum {
        /// Supplied number.
        value: f64,
        /// Configured minimum.
        min: f64,
    },

    /// A number is larger than `settings.max`.
    #[error("{value} is above the maximum of {max}")]
    AboveMaximum {
        /// Supplied number.
        value: f64,
        /// Configured maximum.
        max: f64,
    },

    /// A date string does not parse.
    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    /// A URL string does not parse as an absolute URL.
    #[error("'{0}' is not a valid URL")]
    InvalidUrl(String),

    /// A select token is not among the field's option values.
    #[error("'{0}' is not one of the field options")]
    UnknownOption(String),

    /// A priority token is not recognized.
    #[error("'{0}' is not a task priority")]
    UnknownPriority(String),

    /// A status token is not recognized.
    #[error("'{0}' is not a task status")]
    UnknownStatus(String),
}

/// Errors returned while constructing or updating field definitions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldDomainError {
    /// The field name is empty after trimming.
    #[error("field name is required")]
    EmptyFieldName,

    /// The field type is not a registered kind.
    #[error("unsupported field type: {0}")]
    UnknownFieldKind(String),

    /// Kind, options or settings are inconsistent.
    #[error(transparent)]
    Shape(#[from] FieldShapeError),

    /// The default value does not fit the definition.
    #[error("invalid default value: {0}")]
    InvalidDefaultValue(#[source] FieldValueError),
}
