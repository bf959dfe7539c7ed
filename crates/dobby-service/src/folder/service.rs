//! Folder creation, listing, breadcrumbs, and soft-delete with ownership
//! checks.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use dobby_auth::acl::{can_mutate, require_active, require_found, require_mutate, require_view};
use dobby_core::error::AppError;
use dobby_database::store::{FolderStore, ImageStore};
use dobby_entity::access::Shareable;
use dobby_entity::folder::{Breadcrumb, CreateFolder, Folder, FolderListing, RootListing};

use crate::context::RequestContext;

/// Manages the folder forest.
#[derive(Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Image store, for folder listings.
    images: Arc<dyn ImageStore>,
}

/// Request to create a new folder.
#[derive(Debug, Clone, Default)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<Uuid>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<dyn FolderStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { folders, images }
    }

    /// Creates a folder at the root or under a parent the caller owns.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> Result<Folder, AppError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name required"));
        }

        let path = match req.parent_id {
            Some(parent_id) => {
                let parent =
                    require_active(self.folders.find_by_id(parent_id).await?, "Parent not found")?;
                require_mutate(&parent, ctx.user_id)?;
                parent.child_path()
            }
            None => Vec::new(),
        };

        let folder = self
            .folders
            .create(&CreateFolder {
                name: name.to_string(),
                owner_id: ctx.user_id,
                parent_id: req.parent_id,
                path,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id,
            "Folder created"
        );
        Ok(folder)
    }

    /// Returns a folder the caller can view with its active children.
    pub async fn get_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<FolderListing, AppError> {
        let current = self.get_viewable(ctx, folder_id).await?;
        let folders = self.folders.find_children(folder_id).await?;
        let images = self.images.find_in_folder(folder_id).await?;
        Ok(FolderListing {
            current,
            folders,
            images,
        })
    }

    /// Returns the caller's root folders and images, owned or shared.
    pub async fn list_root(&self, ctx: &RequestContext) -> Result<RootListing, AppError> {
        let folders = self.folders.find_root(ctx.user_id).await?;
        let images = self.images.find_root(ctx.user_id).await?;
        Ok(RootListing { folders, images })
    }

    /// Returns the trail from the root to `folder_id`.
    ///
    /// Shared viewers only see the folder itself. Owners see every active
    /// ancestor in path order followed by the folder.
    pub async fn breadcrumbs(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<Vec<Breadcrumb>, AppError> {
        let folder = self.get_viewable(ctx, folder_id).await?;
        if !can_mutate(&folder, ctx.user_id) {
            return Ok(vec![folder.breadcrumb()]);
        }

        let ancestors: HashMap<Uuid, Folder> = self
            .folders
            .find_by_ids(&folder.path)
            .await?
            .into_iter()
            .filter(|f| f.is_active())
            .map(|f| (f.id, f))
            .collect();

        let mut crumbs: Vec<Breadcrumb> = folder
            .path
            .iter()
            .filter_map(|id| ancestors.get(id).map(Folder::breadcrumb))
            .collect();
        crumbs.push(folder.breadcrumb());
        Ok(crumbs)
    }

    /// Soft-deletes a folder. Children are left untouched.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<(), AppError> {
        let folder = require_active(self.folders.find_by_id(folder_id).await?, "Not found")?;
        require_mutate(&folder, ctx.user_id)?;

        self.folders.soft_delete(folder_id).await?;
        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder deleted");
        Ok(())
    }

    /// Clears the soft-delete marker. Restoring an active folder succeeds.
    pub async fn restore_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> Result<(), AppError> {
        let folder = require_found(self.folders.find_by_id(folder_id).await?, "Not found")?;
        require_mutate(&folder, ctx.user_id)?;

        self.folders.restore(folder_id).await?;
        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder restored");
        Ok(())
    }

    async fn get_viewable(&self, ctx: &RequestContext, folder_id: Uuid) -> Result<Folder, AppError> {
        let folder = require_active(self.folders.find_by_id(folder_id).await?, "Not found")?;
        require_view(&folder, ctx.user_id)?;
        Ok(folder)
    }
}
