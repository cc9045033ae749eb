//! In-memory blob store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::attachment::adapters::object_key;
use crate::attachment::ports::{BlobStore, BlobStoreError, BlobStoreResult, StoredBlob};

const MEMORY_URL_SCHEME: &str = "memory://";

/// Thread-safe blob store keeping content in a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    state: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the stored content for `object_id`.
    #[must_use]
    pub fn content(&self, object_id: &str) -> Option<Vec<u8>> {
        self.state
            .read()
            .ok()
            .and_then(|blobs| blobs.get(object_id).cloned())
    }

    /// Returns the number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().map_or(0, |blobs| blobs.len())
    }

    /// Returns `true` when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(err: impl ToString) -> BlobStoreError {
    BlobStoreError::storage(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn upload(
        &self,
        bytes: &[u8],
        original_name: &str,
        folder: &str,
    ) -> BlobStoreResult<StoredBlob> {
        let object_id = object_key(folder, original_name);
        let mut blobs = self.state.write().map_err(lock_error)?;
        blobs.insert(object_id.clone(), bytes.to_vec());
        Ok(StoredBlob {
            url: format!("{MEMORY_URL_SCHEME}{object_id}"),
            object_id,
        })
    }

    async fn delete(&self, object_id: &str) -> BlobStoreResult<bool> {
        let mut blobs = self.state.write().map_err(lock_error)?;
        Ok(blobs.remove(object_id).is_some())
    }
}
