//! Store traits shared by the PostgreSQL repositories and the in-memory
//! store.
//!
//! Lookups by id return soft-deleted rows too; callers decide what a
//! deleted row means. Listing and search methods return active rows only.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use dobby_core::result::AppResult;
use dobby_entity::folder::{CreateFolder, Folder};
use dobby_entity::image::{CreateImage, Image};
use dobby_entity::user::{CreateUser, User};

use crate::memory::MemoryStore;
use crate::repositories::{FolderRepository, ImageRepository, UserRepository};

/// Maximum number of rows returned by [`ImageStore::search`].
pub const SEARCH_LIMIT: i64 = 50;

/// Identity store.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Insert a user. A taken email yields a conflict.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email, case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// All users, oldest first.
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Folder tree store.
#[async_trait]
pub trait FolderStore: Send + Sync + 'static {
    /// Insert a folder. An active sibling with the same name and owner
    /// yields a conflict.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Find a folder by id, deleted or not.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// Fetch several folders at once, deleted or not, in no particular order.
    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Folder>>;

    /// Active children of `parent_id`, by name ascending.
    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Active root folders owned by or shared with `user_id`, by name
    /// ascending.
    async fn find_root(&self, user_id: Uuid) -> AppResult<Vec<Folder>>;

    /// Add `user_id` to the share list if absent.
    async fn add_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Folder>;

    /// Remove `user_id` from the share list.
    async fn remove_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Folder>;

    /// Stamp `deleted_at` with the current time.
    async fn soft_delete(&self, id: Uuid) -> AppResult<Folder>;

    /// Clear `deleted_at`. Collides with an active sibling as a conflict.
    async fn restore(&self, id: Uuid) -> AppResult<Folder>;
}

/// Image registry store.
#[async_trait]
pub trait ImageStore: Send + Sync + 'static {
    /// Register an uploaded image.
    async fn create(&self, data: &CreateImage) -> AppResult<Image>;

    /// Find an image by id, deleted or not.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Image>>;

    /// Active images in `folder_id`, newest first.
    async fn find_in_folder(&self, folder_id: Uuid) -> AppResult<Vec<Image>>;

    /// Active images without a folder owned by or shared with `user_id`,
    /// newest first.
    async fn find_root(&self, user_id: Uuid) -> AppResult<Vec<Image>>;

    /// Active images visible to `user_id` whose name contains `query`
    /// case-insensitively, newest first, at most [`SEARCH_LIMIT`].
    async fn search(&self, user_id: Uuid, query: &str) -> AppResult<Vec<Image>>;

    /// Add `user_id` to the share list if absent.
    async fn add_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Image>;

    /// Remove `user_id` from the share list.
    async fn remove_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Image>;

    /// Stamp `deleted_at` with the current time.
    async fn soft_delete(&self, id: Uuid) -> AppResult<Image>;

    /// Clear `deleted_at`.
    async fn restore(&self, id: Uuid) -> AppResult<Image>;
}

/// The three store handles, constructed once by the process entry point.
#[derive(Clone)]
pub struct Stores {
    /// Identity store.
    pub users: Arc<dyn UserStore>,
    /// Folder tree store.
    pub folders: Arc<dyn FolderStore>,
    /// Image registry store.
    pub images: Arc<dyn ImageStore>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            folders: Arc::new(FolderRepository::new(pool.clone())),
            images: Arc::new(ImageRepository::new(pool)),
        }
    }

    /// Stores backed by a single in-memory arena.
    pub fn memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            folders: store.clone(),
            images: store,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

/// Escape `%`, `_`, and `\` so `query` matches literally inside `LIKE`.
pub fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
