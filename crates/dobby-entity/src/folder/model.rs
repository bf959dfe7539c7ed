//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::access::Shareable;
use crate::image::Image;

/// A folder in a user's forest of folders.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// The folder owner. Never changes after creation.
    pub owner_id: Uuid,
    /// Parent folder ID (null for root folders).
    pub parent_id: Option<Uuid>,
    /// Ancestor IDs from the root down to the parent, excluding self.
    pub path: Vec<Uuid>,
    /// Users granted view access.
    pub shared_with: Vec<Uuid>,
    /// Soft-delete marker. `None` means active.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The path a child of this folder inherits.
    pub fn child_path(&self) -> Vec<Uuid> {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(self.id);
        path
    }

    /// This folder as a breadcrumb element.
    pub fn breadcrumb(&self) -> Breadcrumb {
        Breadcrumb {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl Shareable for Folder {
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

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name, already trimmed.
    pub name: String,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
    /// Materialized ancestor path.
    pub path: Vec<Uuid>,
}

/// One element of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
}

/// A folder together with its active children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderListing {
    /// The folder being listed.
    pub current: Folder,
    /// Child folders, by name ascending.
    pub folders: Vec<Folder>,
    /// Child images, newest first.
    pub images: Vec<Image>,
}

/// The caller's root-level folders and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootListing {
    /// Root folders, by name ascending.
    pub folders: Vec<Folder>,
    /// Root images, newest first.
    pub images: Vec<Image>,
}
