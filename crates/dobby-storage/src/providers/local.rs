//! Local filesystem blob store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use dobby_core::config::LocalStorageConfig;
use dobby_core::error::{AppError, ErrorKind};
use dobby_core::result::AppResult;
use dobby_core::traits::blob::{BlobStore, StoredBlob};

use crate::keys::blob_name;

/// Blob store writing into a single local directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalBlobStore {
    /// Create the store, creating the root directory if needed.
    pub async fn new(config: &LocalStorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
        })
    }

    /// The directory holding the blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path inside the root. Keys are flat names.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let name = key.trim_start_matches('/');
        if name.is_empty() || name.contains(['/', '\\']) || name == ".." {
            return Err(AppError::storage(format!("Invalid blob key: {key}")));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn save(&self, data: Bytes, original_name: &str) -> AppResult<StoredBlob> {
        let key = blob_name(original_name);
        let full_path = self.resolve(&key)?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob: {key}"),
                e,
            )
        })?;

        debug!(key = %key, bytes = data.len(), "Wrote blob");
        Ok(StoredBlob {
            url: format!("{}/{}", self.public_prefix, key),
            key,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(key, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {key}"),
                e,
            )),
        }
    }
}
