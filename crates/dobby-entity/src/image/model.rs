//! Image entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::access::Shareable;

/// An uploaded image registered in the drive.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Unique image identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// The uploader.
    pub owner_id: Uuid,
    /// Containing folder, if any.
    pub folder_id: Option<Uuid>,
    /// Blob key returned by the blob store.
    pub filename: String,
    /// Retrievable URL returned by the blob store.
    pub url: String,
    /// Users granted view access.
    pub shared_with: Vec<Uuid>,
    /// Soft-delete marker. `None` means active.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the image was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the image was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Shareable for Image {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn shared_with(&self) -> &[Uuid] {
        &self.shared_with
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

/// Data required to register an uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateImage {
    /// Display name, already trimmed.
    pub name: String,
    /// The uploader.
    pub owner_id: Uuid,
    /// Containing folder.
    pub folder_id: Option<Uuid>,
    /// Blob key.
    pub filename: String,
    /// Blob URL.
    pub url: String,
}
