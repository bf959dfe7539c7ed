//! # dobby-storage
//!
//! [`BlobStore`](dobby_core::traits::BlobStore) implementations for Dobby
//! Drive: a local directory served under `/uploads`, and S3-compatible
//! object storage behind the `s3` feature.

pub mod keys;
pub mod providers;

use std::sync::Arc;

use tracing::info;

use dobby_core::config::{StorageConfig, StorageProviderKind};
use dobby_core::result::AppResult;
use dobby_core::traits::BlobStore;

pub use providers::LocalBlobStore;
#[cfg(feature = "s3")]
pub use providers::S3BlobStore;

/// Construct the configured blob store.
pub async fn build_blob_store(config: &StorageConfig) -> AppResult<Arc<dyn BlobStore>> {
    let store: Arc<dyn BlobStore> = match config.provider {
        StorageProviderKind::Local => Arc::new(LocalBlobStore::new(&config.local).await?),
        #[cfg(feature = "s3")]
        StorageProviderKind::S3 => Arc::new(S3BlobStore::new(&config.s3).await?),
        #[cfg(not(feature = "s3"))]
        StorageProviderKind::S3 => {
            return Err(dobby_core::AppError::configuration(
                "storage.provider = \"s3\" requires the `s3` feature",
            ));
        }
    };
    info!(provider = store.provider_type(), "Blob store ready");
    Ok(store)
}
