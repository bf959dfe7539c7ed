//! Image upload, soft-delete, and restore.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use dobby_auth::acl::{can_mutate, require_active, require_found, require_mutate};
use dobby_core::error::AppError;
use dobby_core::traits::BlobStore;
use dobby_database::store::{FolderStore, ImageStore};
use dobby_entity::image::{CreateImage, Image};

use crate::context::RequestContext;

/// File payload received with an upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Client-supplied file name, used for the stored extension.
    pub original_name: String,
    /// Raw bytes.
    pub data: Bytes,
}

/// Request to upload an image.
#[derive(Debug, Clone, Default)]
pub struct UploadImageRequest {
    /// Display name.
    pub name: String,
    /// Target folder id as sent by the client. Blank means root.
    pub folder_id: Option<String>,
    /// The file part, if one was sent.
    pub file: Option<UploadedFile>,
}

/// Manages the image registry and its blobs.
#[derive(Clone)]
pub struct ImageService {
    images: Arc<dyn ImageStore>,
    folders: Arc<dyn FolderStore>,
    blobs: Arc<dyn BlobStore>,
}

impl ImageService {
    /// Creates a new image service.
    pub fn new(
        images: Arc<dyn ImageStore>,
        folders: Arc<dyn FolderStore>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            images,
            folders,
            blobs,
        }
    }

    /// Validates the request, stores the blob, and registers the image.
    ///
    /// Nothing reaches the blob store until every check has passed. If the
    /// registry insert fails the blob is removed again.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        req: UploadImageRequest,
    ) -> Result<Image, AppError> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name required"));
        }
        let file = match req.file {
            Some(file) if !file.data.is_empty() => file,
            _ => return Err(AppError::validation("Image file required")),
        };

        let folder_id = match parse_folder_id(req.folder_id.as_deref())? {
            Some(folder_id) => {
                let folder =
                    require_active(self.folders.find_by_id(folder_id).await?, "Folder not found")?;
                if !can_mutate(&folder, ctx.user_id) {
                    warn!(user_id = %ctx.user_id, folder_id = %folder_id, "Upload into foreign folder denied");
                    return Err(AppError::forbidden("Not allowed"));
                }
                Some(folder_id)
            }
            None => None,
        };

        let size = file.data.len();
        let blob = self.blobs.save(file.data, &file.original_name).await?;

        let created = self
            .images
            .create(&CreateImage {
                name: name.to_string(),
                owner_id: ctx.user_id,
                folder_id,
                filename: blob.key.clone(),
                url: blob.url,
            })
            .await;

        match created {
            Ok(image) => {
                info!(
                    user_id = %ctx.user_id,
                    image_id = %image.id,
                    folder_id = ?folder_id,
                    bytes = size,
                    "Image uploaded"
                );
                Ok(image)
            }
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&blob.key).await {
                    warn!(key = %blob.key, error = %cleanup, "Failed to remove orphaned blob");
                }
                Err(e)
            }
        }
    }

    /// Soft-deletes an image.
    pub async fn delete_image(&self, ctx: &RequestContext, image_id: Uuid) -> Result<(), AppError> {
        let image = require_active(self.images.find_by_id(image_id).await?, "Not found")?;
        require_mutate(&image, ctx.user_id)?;

        self.images.soft_delete(image_id).await?;
        info!(user_id = %ctx.user_id, image_id = %image_id, "Image deleted");
        Ok(())
    }

    /// Clears the soft-delete marker. Restoring an active image succeeds.
    pub async fn restore_image(
        &self,
        ctx: &RequestContext,
        image_id: Uuid,
    ) -> Result<(), AppError> {
        let image = require_found(self.images.find_by_id(image_id).await?, "Not found")?;
        require_mutate(&image, ctx.user_id)?;

        self.images.restore(image_id).await?;
        info!(user_id = %ctx.user_id, image_id = %image_id, "Image restored");
        Ok(())
    }
}

fn parse_folder_id(raw: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match raw.map(str::trim) {
        None | Some("") | Some("null") => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(|_| AppError::validation("Invalid folder id")),
    }
}
