//! S3-compatible object storage blob store (AWS S3, Cloudflare R2, MinIO).

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, info};

use dobby_core::config::S3StorageConfig;
use dobby_core::error::AppError;
use dobby_core::result::AppResult;
use dobby_core::traits::blob::{BlobStore, StoredBlob};

use crate::keys::blob_name;

const KEY_PREFIX: &str = "uploads";

/// Blob store writing objects into one bucket with path-style addressing.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3BlobStore {
    /// Build a client from static credentials.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.bucket.is_empty() {
            return Err(AppError::configuration("storage.s3.bucket is required"));
        }
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 blob store"
        );

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "dobby-config",
        );
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(&config.endpoint);
        }
        let shared = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            public_base: config.public_base(),
        })
    }
}

/// Content type for an uploaded object, guessed from the original name.
fn content_type(original_name: &str) -> Option<String> {
    mime_guess::from_path(original_name)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

#[async_trait]
impl BlobStore for S3BlobStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn save(&self, data: Bytes, original_name: &str) -> AppResult<StoredBlob> {
        let key = format!("{KEY_PREFIX}/{}", blob_name(original_name));
        let size = data.len();

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data));
        if let Some(mime) = content_type(original_name) {
            request = request.content_type(mime);
        }
        request
            .send()
            .await
            .map_err(|e| AppError::storage(format!("Failed to upload object {key}: {e}")))?;

        debug!(key = %key, bytes = size, "Uploaded object");
        Ok(StoredBlob {
            url: format!("{}/{}", self.public_base, key),
            key,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::storage(format!("Failed to delete object {key}: {e}")))?;
        debug!(key, "Deleted object");
        Ok(())
    }
}
