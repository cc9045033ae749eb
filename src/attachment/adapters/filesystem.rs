//! Blob store writing attachment content beneath a capability-scoped root.
//!
//! Object identifiers are relative UTF-8 paths. All access goes through a
//! `cap_std` directory handle, so identifiers cannot reach outside the root.

use async_trait::async_trait;
use camino::{Utf8Component, Utf8Path};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use super::object_key;
use crate::attachment::ports::{BlobStore, BlobStoreError, BlobStoreResult, StoredBlob};

/// Blob store backed by a local directory.
#[derive(Debug, Clone)]
pub struct FilesystemBlobStore {
    root: Arc<Dir>,
    public_base_url: String,
}

impl FilesystemBlobStore {
    /// Opens (creating when missing) the root directory.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Storage`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Utf8Path, public_base_url: impl Into<String>) -> BlobStoreResult<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority()).map_err(BlobStoreError::storage)?;
        let dir =
            Dir::open_ambient_dir(root, ambient_authority()).map_err(BlobStoreError::storage)?;
        Ok(Self {
            root: Arc::new(dir),
            public_base_url: public_base_url.into(),
        })
    }

    fn url_for(&self, object_id: &str) -> String {
        format!(
            "{}/{object_id}",
            self.public_base_url.trim_end_matches('/')
        )
    }

    async fn run_blocking<F, T>(&self, f: F) -> BlobStoreResult<T>
    where
        F: FnOnce(&Dir) -> BlobStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = Arc::clone(&self.root);
        tokio::task::spawn_blocking(move || f(&root))
            .await
            .map_err(BlobStoreError::storage)?
    }
}

fn checked_relative(path: &str) -> BlobStoreResult<&Utf8Path> {
    let candidate = Utf8Path::new(path);
    let plain = candidate
        .components()
        .all(|component| matches!(component, Utf8Component::Normal(_)));
    if path.is_empty() || !plain {
        return Err(BlobStoreError::InvalidPath(path.to_owned()));
    }
    Ok(candidate)
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn upload(
        &self,
        bytes: &[u8],
        original_name: &str,
        folder: &str,
    ) -> BlobStoreResult<StoredBlob> {
        checked_relative(folder.trim_matches('/'))?;
        let object_id = object_key(folder, original_name);
        let content = bytes.to_vec();
        let target = object_id.clone();
        self.run_blocking(move |root| {
            let path = checked_relative(&target)?;
            if let Some(parent) = path.parent() {
                root.create_dir_all(parent).map_err(BlobStoreError::storage)?;
            }
            root.write(path, content).map_err(BlobStoreError::storage)
        })
        .await?;
        Ok(StoredBlob {
            url: self.url_for(&object_id),
            object_id,
        })
    }

    async fn delete(&self, object_id: &str) -> BlobStoreResult<bool> {
        let target = checked_relative(object_id)?.to_owned();
        self.run_blocking(move |root| match root.remove_file(&target) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(BlobStoreError::storage(err)),
        })
        .await
    }
}
