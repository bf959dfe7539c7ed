//! Blob storage provider configuration.

use serde::{Deserialize, Serialize};

/// Which blob store persists uploaded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderKind {
    /// Files under a local directory, served by the API itself.
    #[default]
    Local,
    /// An S3-compatible object store (AWS S3, Cloudflare R2, MinIO).
    S3,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Active provider.
    #[serde(default)]
    pub provider: StorageProviderKind,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Directory that receives uploaded files.
    #[serde(default = "default_local_root")]
    pub root_path: String,
    /// URL path prefix under which the directory is served.
    #[serde(default = "default_public_prefix")]
    pub public_prefix: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
            public_prefix: default_public_prefix(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3StorageConfig {
    /// Endpoint URL (required for R2 and MinIO).
    #[serde(default)]
    pub endpoint: String,
    /// Region; R2 expects `"auto"`.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name.
    #[serde(default)]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Public base URL for stored objects. Falls back to
    /// `<endpoint>/<bucket>` when empty.
    #[serde(default)]
    pub public_url: String,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: default_region(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            public_url: String::new(),
        }
    }
}

impl S3StorageConfig {
    /// Base URL that object keys are appended to.
    pub fn public_base(&self) -> String {
        let public = self.public_url.trim();
        if public.is_empty() {
            format!("{}/{}", self.endpoint.trim_end_matches('/'), self.bucket)
        } else {
            public.trim_end_matches('/').to_string()
        }
    }
}

fn default_local_root() -> String {
    "./uploads".to_string()
}

fn default_public_prefix() -> String {
    "/uploads".to_string()
}

fn default_region() -> String {
    "auto".to_string()
}
