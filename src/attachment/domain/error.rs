//! Error types for attachment validation.

use thiserror::Error;

/// Reasons an upload is refused before any blob is written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttachmentDomainError {
    /// No file name was supplied.
    #[error("file name is required")]
    EmptyFileName,

    /// The file has no content.
    #[error("file is empty")]
    EmptyFile,

    /// The file exceeds the configured size limit.
    #[error("file size {size} exceeds maximum limit of {limit} bytes")]
    FileTooLarge {
        /// Supplied size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// The MIME type is not on the allow-list.
    #[error("file type not allowed: {0}")]
    UnsupportedType(String),
}
