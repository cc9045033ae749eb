//! Error types for workspace and user validation.

use thiserror::Error;

/// Errors returned while constructing or updating workspaces and users.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceDomainError {
    /// The email address is malformed.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The user name is empty after trimming.
    #[error("user name is required")]
    EmptyUserName,

    /// The workspace name is empty after trimming.
    #[error("workspace name is required")]
    EmptyWorkspaceName,
}
