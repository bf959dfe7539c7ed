//! Blob store trait for pluggable upload backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Reference to a persisted blob, as returned by [`BlobStore::save`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredBlob {
    /// Provider-specific key used to address the blob later.
    pub key: String,
    /// Retrievable URL. Relative for local storage, absolute for S3.
    pub url: String,
}

/// Trait for blob storage backends.
///
/// The registry stores only the returned [`StoredBlob`]; implementations
/// choose the key and never inspect content. Implementations live in
/// `dobby-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Persist `data` and return its key and URL. `original_name` is only
    /// consulted for the file extension.
    async fn save(&self, data: Bytes, original_name: &str) -> AppResult<StoredBlob>;

    /// Remove a previously stored blob. Missing blobs are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
