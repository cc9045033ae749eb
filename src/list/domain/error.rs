//! Error types for list validation.

use thiserror::Error;

/// Errors returned while constructing or updating lists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListDomainError {
    /// The list name is empty after trimming.
    #[error("list name is required")]
    EmptyListName,
}
