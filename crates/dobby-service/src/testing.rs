//! Fixtures shared by the service tests.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;
use uuid::Uuid;

use dobby_core::error::AppError;
use dobby_core::result::AppResult;
use dobby_core::traits::{BlobStore, StoredBlob};
use dobby_database::store::{ImageStore, UserStore};
use dobby_database::{MemoryStore, Stores};
use dobby_entity::image::{CreateImage, Image};
use dobby_entity::user::CreateUser;

use crate::context::RequestContext;
use crate::folder::FolderService;
use crate::image::ImageService;
use crate::share::{ResourceType, ShareService};

/// Blob store that remembers keys instead of writing bytes.
#[derive(Debug, Default)]
pub struct RecordingBlobStore {
    saved: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
}

impl RecordingBlobStore {
    pub async fn saved(&self) -> Vec<String> {
        self.saved.lock().await.clone()
    }

    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.lock().await.clone()
    }
}

#[async_trait]
impl BlobStore for RecordingBlobStore {
    fn provider_type(&self) -> &str {
        "recording"
    }

    async fn save(&self, _data: Bytes, original_name: &str) -> AppResult<StoredBlob> {
        let key = format!("{}-{original_name}", Uuid::new_v4().simple());
        self.saved.lock().await.push(key.clone());
        Ok(StoredBlob {
            url: format!("/uploads/{key}"),
            key,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.deleted.lock().await.push(key.to_string());
        Ok(())
    }
}

/// Image store whose inserts always fail.
struct FailingInserts(Arc<MemoryStore>);

#[async_trait]
impl ImageStore for FailingInserts {
    async fn create(&self, _data: &CreateImage) -> AppResult<Image> {
        Err(AppError::database("insert rejected"))
    }
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Image>> {
        ImageStore::find_by_id(&*self.0, id).await
    }
    async fn find_in_folder(&self, folder_id: Uuid) -> AppResult<Vec<Image>> {
        self.0.find_in_folder(folder_id).await
    }
    async fn find_root(&self, user_id: Uuid) -> AppResult<Vec<Image>> {
        ImageStore::find_root(&*self.0, user_id).await
    }
    async fn search(&self, user_id: Uuid, query: &str) -> AppResult<Vec<Image>> {
        self.0.search(user_id, query).await
    }
    async fn add_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Image> {
        ImageStore::add_share(&*self.0, id, user_id).await
    }
    async fn remove_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Image> {
        ImageStore::remove_share(&*self.0, id, user_id).await
    }
    async fn soft_delete(&self, id: Uuid) -> AppResult<Image> {
        ImageStore::soft_delete(&*self.0, id).await
    }
    async fn restore(&self, id: Uuid) -> AppResult<Image> {
        ImageStore::restore(&*self.0, id).await
    }
}

/// Memory-backed stores plus a recording blob store.
pub struct Harness {
    pub stores: Stores,
    pub blobs: Arc<RecordingBlobStore>,
}

impl Harness {
    pub async fn new() -> Self {
        Self {
            stores: Stores::memory(),
            blobs: Arc::new(RecordingBlobStore::default()),
        }
    }

    pub async fn with_failing_images() -> Self {
        let arena = Arc::new(MemoryStore::new());
        Self {
            stores: Stores {
                users: arena.clone(),
                folders: arena.clone(),
                images: Arc::new(FailingInserts(arena)),
            },
            blobs: Arc::new(RecordingBlobStore::default()),
        }
    }

    /// Registers a user and returns a context acting as them.
    pub async fn user(&self, email: &str) -> RequestContext {
        let user = UserStore::create(
            &*self.stores.users,
            &CreateUser {
                name: email.to_string(),
                email: email.to_string(),
                password_hash: "unused".into(),
            },
        )
        .await
        .unwrap();
        RequestContext::new(user.id)
    }

    pub fn folder_service(&self) -> FolderService {
        FolderService::new(self.stores.folders.clone(), self.stores.images.clone())
    }

    pub fn image_service(&self) -> ImageService {
        ImageService::new(
            self.stores.images.clone(),
            self.stores.folders.clone(),
            self.blobs.clone(),
        )
    }

    pub fn share_service(&self) -> ShareService {
        ShareService::new(
            self.stores.users.clone(),
            self.stores.folders.clone(),
            self.stores.images.clone(),
        )
    }

    pub async fn share_folder(&self, owner: &RequestContext, id: Uuid, email: &str) {
        self.share_service()
            .share(owner, ResourceType::Folder, id, email)
            .await
            .unwrap();
    }

    pub async fn share_image(&self, owner: &RequestContext, id: Uuid, email: &str) {
        self.share_service()
            .share(owner, ResourceType::Image, id, email)
            .await
            .unwrap();
    }
}
