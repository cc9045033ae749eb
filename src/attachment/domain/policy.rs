//! Upload admission rules.

use super::AttachmentDomainError;
use serde::{Deserialize, Serialize};

/// Default size limit: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types accepted when no allow-list is configured.
pub const DEFAULT_ALLOWED_TYPES: [&str; 11] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
    "text/csv",
];

/// Size and type limits applied to every upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentPolicy {
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
    /// Accepted MIME types, compared case-insensitively.
    pub allowed_types: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_types: DEFAULT_ALLOWED_TYPES
                .iter()
                .map(|mime| (*mime).to_owned())
                .collect(),
        }
    }
}

impl AttachmentPolicy {
    /// Checks an upload's name, size and MIME type.
    ///
    /// # Errors
    ///
    /// Returns the first [`AttachmentDomainError`] that applies.
    pub fn admit(
        &self,
        file_name: &str,
        content_type: &str,
        size: u64,
    ) -> Result<(), AttachmentDomainError> {
        if file_name.trim().is_empty() {
            return Err(AttachmentDomainError::EmptyFileName);
        }
        if size == 0 {
            return Err(AttachmentDomainError::EmptyFile);
        }
        if size > self.max_file_size {
            return Err(AttachmentDomainError::FileTooLarge {
                size,
                limit: self.max_file_size,
            });
        }
        let mime = content_type.trim();
        if !self
            .allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime))
        {
            return Err(AttachmentDomainError::UnsupportedType(mime.to_owned()));
        }
        Ok(())
    }
}
