//! Port for the external blob store holding attachment content.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Location of an uploaded blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Public URL for downloads.
    pub url: String,
    /// Store-specific object identifier used for deletion.
    pub object_id: String,
}

/// Result type for blob store operations.
pub type BlobStoreResult<T> = Result<T, BlobStoreError>;

/// Blob storage contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads `bytes` under `folder`, keeping `original_name`'s extension.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError`] when the content cannot be stored.
    async fn upload(
        &self,
        bytes: &[u8],
        original_name: &str,
        folder: &str,
    ) -> BlobStoreResult<StoredBlob>;

    /// Deletes an object. Returns `false` when the store did not remove it.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError`] when the store cannot be reached.
    async fn delete(&self, object_id: &str) -> BlobStoreResult<bool>;
}

/// Errors returned by blob store implementations.
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    /// The object identifier or folder is not acceptable to the store.
    #[error("invalid object path: {0}")]
    InvalidPath(String),

    /// Storage backend failure.
    #[error("blob storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl BlobStoreError {
    /// Wraps a storage backend error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
