//! Error types for task domain validation and parsing.

use crate::field::domain::{FieldId, FieldValueError};
use thiserror::Error;

/// Errors returned while constructing or updating task values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name is required")]
    EmptyTaskName,

    /// The same custom field appears more than once in one payload.
    #[error("custom field {0} is set more than once")]
    DuplicateCustomField(FieldId),

    /// A custom field entry references a field the list does not define.
    #[error("unknown custom field: {0}")]
    UnknownCustomField(FieldId),

    /// A custom field value does not fit its field definition.
    #[error("invalid value for custom field '{field_name}': {source}")]
    InvalidCustomFieldValue {
        /// Field identifier.
        field_id: FieldId,
        /// Field display name.
        field_name: String,
        /// Shape violation reported by the field registry.
        #[source]
        source: FieldValueError,
    },
}

/// Error returned while parsing a task status token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing a task priority token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
