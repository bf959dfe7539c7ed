//! In-process store backed by an arena of records.
//!
//! Each collection is a `Vec` in insertion order plus an id index. Every
//! mutation happens under one write lock, so the folder uniqueness check
//! and the insert are atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use dobby_core::error::AppError;
use dobby_core::result::AppResult;
use dobby_entity::access::Shareable;
use dobby_entity::folder::{CreateFolder, Folder};
use dobby_entity::image::{CreateImage, Image};
use dobby_entity::user::{CreateUser, User, normalize_email};

use crate::store::{FolderStore, ImageStore, SEARCH_LIMIT, UserStore};

const DUPLICATE_NAME: &str = "Folder with same name already exists here";

/// A collection of records addressable by id.
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    index: HashMap<Uuid, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert(&mut self, id: Uuid, row: T) {
        self.index.insert(id, self.rows.len());
        self.rows.push(row);
    }

    fn get(&self, id: Uuid) -> Option<&T> {
        self.index.get(&id).map(|&i| &self.rows[i])
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        self.index.get(&id).map(|&i| &mut self.rows[i])
    }

    /// Rows matching `pred`, newest insertion first.
    fn newest_first(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.iter().rev().filter(|r| pred(r)).cloned().collect()
    }
}

#[derive(Debug, Default)]
struct Arena {
    users: Table<User>,
    folders: Table<Folder>,
    images: Table<Image>,
}

impl Arena {
    fn has_active_sibling(
        &self,
        except: Option<Uuid>,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> bool {
        self.folders.rows.iter().any(|f| {
            Some(f.id) != except
                && f.is_active()
                && f.owner_id == owner_id
                && f.parent_id == parent_id
                && f.name == name
        })
    }

    fn folder_mut(&mut self, id: Uuid) -> AppResult<&mut Folder> {
        self.folders
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    fn image_mut(&mut self, id: Uuid) -> AppResult<&mut Image> {
        self.images
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Image {id} not found")))
    }
}

/// Store implementation that keeps every record in process memory.
///
/// Implements [`UserStore`], [`FolderStore`], and [`ImageStore`]. Contents
/// are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    arena: RwLock<Arena>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn visible_to<T: Shareable>(row: &T, user_id: Uuid) -> bool {
    row.is_owned_by(user_id) || row.is_shared_with(user_id)
}

fn by_created_desc(a: &DateTime<Utc>, b: &DateTime<Utc>) -> std::cmp::Ordering {
    b.cmp(a)
}

fn add_unique(list: &mut Vec<Uuid>, user_id: Uuid) {
    if !list.contains(&user_id) {
        list.push(user_id);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let email = normalize_email(&data.email);
        let mut arena = self.arena.write().await;
        if arena.users.rows.iter().any(|u| u.email == email) {
            return Err(AppError::conflict("Email already in use"));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            email,
            password_hash: data.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        arena.users.insert(user.id, user.clone());
        debug!(user_id = %user.id, "Inserted user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.arena.read().await.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = normalize_email(email);
        let arena = self.arena.read().await;
        Ok(arena.users.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.arena.read().await.users.rows.clone())
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut arena = self.arena.write().await;
        if arena.has_active_sibling(None, data.owner_id, data.parent_id, &data.name) {
            return Err(AppError::conflict(DUPLICATE_NAME));
        }
        let now = Utc::now();
        let folder = Folder {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            owner_id: data.owner_id,
            parent_id: data.parent_id,
            path: data.path.clone(),
            shared_with: Vec::new(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        arena.folders.insert(folder.id, folder.clone());
        debug!(folder_id = %folder.id, "Inserted folder");
        Ok(folder)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.arena.read().await.folders.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Folder>> {
        let arena = self.arena.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| arena.folders.get(*id).cloned())
            .collect())
    }

    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
        let arena = self.arena.read().await;
        let mut folders = arena
            .folders
            .newest_first(|f| f.parent_id == Some(parent_id) && f.is_active());
        // Byte order, matching `COLLATE "C"` in Postgres.
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    async fn find_root(&self, user_id: Uuid) -> AppResult<Vec<Folder>> {
        let arena = self.arena.read().await;
        let mut folders = arena
            .folders
            .newest_first(|f| f.is_root() && f.is_active() && visible_to(f, user_id));
        folders.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(folders)
    }

    async fn add_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Folder> {
        let mut arena = self.arena.write().await;
        let folder = arena.folder_mut(id)?;
        add_unique(&mut folder.shared_with, user_id);
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn remove_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Folder> {
        let mut arena = self.arena.write().await;
        let folder = arena.folder_mut(id)?;
        folder.shared_with.retain(|u| *u != user_id);
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<Folder> {
        let mut arena = self.arena.write().await;
        let folder = arena.folder_mut(id)?;
        let now = Utc::now();
        folder.deleted_at = Some(now);
        folder.updated_at = now;
        Ok(folder.clone())
    }

    async fn restore(&self, id: Uuid) -> AppResult<Folder> {
        let mut arena = self.arena.write().await;
        let (owner_id, parent_id, name, was_deleted) = {
            let folder = arena.folder_mut(id)?;
            (
                folder.owner_id,
                folder.parent_id,
                folder.name.clone(),
                folder.deleted_at.is_some(),
            )
        };
        if was_deleted && arena.has_active_sibling(Some(id), owner_id, parent_id, &name) {
            return Err(AppError::conflict(DUPLICATE_NAME));
        }
        let folder = arena.folder_mut(id)?;
        folder.deleted_at = None;
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn create(&self, data: &CreateImage) -> AppResult<Image> {
        let mut arena = self.arena.write().await;
        let now = Utc::now();
        let image = Image {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            owner_id: data.owner_id,
            folder_id: data.folder_id,
            filename: data.filename.clone(),
            url: data.url.clone(),
            shared_with: Vec::new(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        arena.images.insert(image.id, image.clone());
        debug!(image_id = %image.id, "Inserted image");
        Ok(image)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Image>> {
        Ok(self.arena.read().await.images.get(id).cloned())
    }

    async fn find_in_folder(&self, folder_id: Uuid) -> AppResult<Vec<Image>> {
        let arena = self.arena.read().await;
        let mut images = arena
            .images
            .newest_first(|i| i.folder_id == Some(folder_id) && i.is_active());
        images.sort_by(|a, b| by_created_desc(&a.created_at, &b.created_at));
        Ok(images)
    }

    async fn find_root(&self, user_id: Uuid) -> AppResult<Vec<Image>> {
        let arena = self.arena.read().await;
        let mut images = arena
            .images
            .newest_first(|i| i.folder_id.is_none() && i.is_active() && visible_to(i, user_id));
        images.sort_by(|a, b| by_created_desc(&a.created_at, &b.created_at));
        Ok(images)
    }

    async fn search(&self, user_id: Uuid, query: &str) -> AppResult<Vec<Image>> {
        let needle = query.to_lowercase();
        let arena = self.arena.read().await;
        let mut images = arena.images.newest_first(|i| {
            i.is_active() && visible_to(i, user_id) && i.name.to_lowercase().contains(&needle)
        });
        images.sort_by(|a, b| by_created_desc(&a.created_at, &b.created_at));
        images.truncate(SEARCH_LIMIT as usize);
        Ok(images)
    }

    async fn add_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Image> {
        let mut arena = self.arena.write().await;
        let image = arena.image_mut(id)?;
        add_unique(&mut image.shared_with, user_id);
        image.updated_at = Utc::now();
        Ok(image.clone())
    }

    async fn remove_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Image> {
        let mut arena = self.arena.write().await;
        let image = arena.image_mut(id)?;
        image.shared_with.retain(|u| *u != user_id);
        image.updated_at = Utc::now();
        Ok(image.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<Image> {
        let mut arena = self.arena.write().await;
        let image = arena.image_mut(id)?;
        let now = Utc::now();
        image.deleted_at = Some(now);
        image.updated_at = now;
        Ok(image.clone())
    }

    async fn restore(&self, id: Uuid) -> AppResult<Image> {
        let mut arena = self.arena.write().await;
        let image = arena.image_mut(id)?;
        image.deleted_at = None;
        image.updated_at = Utc::now();
        Ok(image.clone())
    }
}
