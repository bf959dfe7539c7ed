//! Share-list management. Only owners may change a share list, and the
//! list only ever grants view access.

use std::fmt;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use dobby_auth::acl::{require_active, require_mutate};
use dobby_core::error::AppError;
use dobby_database::store::{FolderStore, ImageStore, UserStore};
use dobby_entity::user::User;

use crate::context::RequestContext;

/// The kind of entity being shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// A folder.
    Folder,
    /// An image.
    Image,
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Adds and removes users on folder and image share lists.
#[derive(Clone)]
pub struct ShareService {
    users: Arc<dyn UserStore>,
    folders: Arc<dyn FolderStore>,
    images: Arc<dyn ImageStore>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        users: Arc<dyn UserStore>,
        folders: Arc<dyn FolderStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            users,
            folders,
            images,
        }
    }

    /// Grants view access to the user registered under `email`.
    pub async fn share(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
        email: &str,
    ) -> Result<(), AppError> {
        let target = self.authorize(ctx, resource_type, resource_id, email).await?;
        match resource_type {
            ResourceType::Folder => {
                self.folders.add_share(resource_id, target.id).await?;
            }
            ResourceType::Image => {
                self.images.add_share(resource_id, target.id).await?;
            }
        }
        info!(
            user_id = %ctx.user_id,
            resource = %resource_type,
            resource_id = %resource_id,
            target_id = %target.id,
            "Shared"
        );
        Ok(())
    }

    /// Revokes view access from the user registered under `email`.
    pub async fn unshare(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
        email: &str,
    ) -> Result<(), AppError> {
        let target = self.authorize(ctx, resource_type, resource_id, email).await?;
        match resource_type {
            ResourceType::Folder => {
                self.folders.remove_share(resource_id, target.id).await?;
            }
            ResourceType::Image => {
                self.images.remove_share(resource_id, target.id).await?;
            }
        }
        info!(
            user_id = %ctx.user_id,
            resource = %resource_type,
            resource_id = %resource_id,
            target_id = %target.id,
            "Unshared"
        );
        Ok(())
    }

    /// Checks the resource is active and owned by the caller, then resolves
    /// the target user.
    async fn authorize(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
        email: &str,
    ) -> Result<User, AppError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::validation("Email required"));
        }

        match resource_type {
            ResourceType::Folder => {
                let folder =
                    require_active(self.folders.find_by_id(resource_id).await?, "Not found")?;
                require_mutate(&folder, ctx.user_id)?;
            }
            ResourceType::Image => {
                let image =
                    require_active(self.images.find_by_id(resource_id).await?, "Not found")?;
                require_mutate(&image, ctx.user_id)?;
            }
        }

        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
