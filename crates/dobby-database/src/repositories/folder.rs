//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use dobby_core::error::{AppError, ErrorKind};
use dobby_core::result::AppResult;
use dobby_entity::folder::{CreateFolder, Folder};

use crate::store::FolderStore;

const DUPLICATE_NAME: &str = "Folder with same name already exists here";

/// Repository for the folder forest.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn update_returning(
        &self,
        sql: &'static str,
        id: Uuid,
        user_id: Option<Uuid>,
        action: &'static str,
    ) -> AppResult<Folder> {
        let mut query = sqlx::query_as::<_, Folder>(sql).bind(id);
        if let Some(user_id) = user_id {
            query = query.bind(user_id);
        }
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, action))?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }
}

fn map_write_error(e: sqlx::Error, action: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("folders_active_name_key") =>
        {
            AppError::conflict(DUPLICATE_NAME)
        }
        _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action}"), e),
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        debug!(owner_id = %data.owner_id, parent_id = ?data.parent_id, "Inserting folder");

        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, name, owner_id, parent_id, path) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.parent_id)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create folder"))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Folder>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folders", e))
    }

    async fn find_children(&self, parent_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE parent_id = $1 AND deleted_at IS NULL \
             ORDER BY name COLLATE \"C\" ASC",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list child folders", e))
    }

    async fn find_root(&self, user_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE parent_id IS NULL AND deleted_at IS NULL \
               AND (owner_id = $1 OR $1 = ANY(shared_with)) \
             ORDER BY name COLLATE \"C\" ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list root folders", e))
    }

    async fn add_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Folder> {
        self.update_returning(
            "UPDATE folders SET shared_with = CASE \
                 WHEN $2 = ANY(shared_with) THEN shared_with \
                 ELSE array_append(shared_with, $2) END, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
            id,
            Some(user_id),
            "share folder",
        )
        .await
    }

    async fn remove_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Folder> {
        self.update_returning(
            "UPDATE folders SET shared_with = array_remove(shared_with, $2), \
             updated_at = NOW() WHERE id = $1 RETURNING *",
            id,
            Some(user_id),
            "unshare folder",
        )
        .await
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<Folder> {
        self.update_returning(
            "UPDATE folders SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
            id,
            None,
            "delete folder",
        )
        .await
    }

    async fn restore(&self, id: Uuid) -> AppResult<Folder> {
        self.update_returning(
            "UPDATE folders SET deleted_at = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
            id,
            None,
            "restore folder",
        )
        .await
    }
}
