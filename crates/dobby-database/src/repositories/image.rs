//! Image repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use dobby_core::error::{AppError, ErrorKind};
use dobby_core::result::AppResult;
use dobby_entity::image::{CreateImage, Image};

use crate::store::{ImageStore, SEARCH_LIMIT, escape_like};

/// Repository for the image registry.
#[derive(Debug, Clone)]
pub struct ImageRepository {
    pool: PgPool,
}

impl ImageRepository {
    /// Create a new image repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn update_returning(
        &self,
        sql: &'static str,
        id: Uuid,
        user_id: Option<Uuid>,
        action: &'static str,
    ) -> AppResult<Image> {
        let mut query = sqlx::query_as::<_, Image>(sql).bind(id);
        if let Some(user_id) = user_id {
            query = query.bind(user_id);
        }
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, format!("Failed to {action}"), e))?
            .ok_or_else(|| AppError::not_found(format!("Image {id} not found")))
    }
}

#[async_trait]
impl ImageStore for ImageRepository {
    async fn create(&self, data: &CreateImage) -> AppResult<Image> {
        debug!(owner_id = %data.owner_id, folder_id = ?data.folder_id, "Inserting image");

        sqlx::query_as::<_, Image>(
            "INSERT INTO images (id, name, owner_id, folder_id, filename, url) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(data.owner_id)
        .bind(data.folder_id)
        .bind(&data.filename)
        .bind(&data.url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create image", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Image>> {
        sqlx::query_as::<_, Image>("SELECT * FROM images WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find image", e))
    }

    async fn find_in_folder(&self, folder_id: Uuid) -> AppResult<Vec<Image>> {
        sqlx::query_as::<_, Image>(
            "SELECT * FROM images WHERE folder_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folder images", e))
    }

    async fn find_root(&self, user_id: Uuid) -> AppResult<Vec<Image>> {
        sqlx::query_as::<_, Image>(
            "SELECT * FROM images \
             WHERE folder_id IS NULL AND deleted_at IS NULL \
               AND (owner_id = $1 OR $1 = ANY(shared_with)) \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list root images", e))
    }

    async fn search(&self, user_id: Uuid, query: &str) -> AppResult<Vec<Image>> {
        let pattern = format!("%{}%", escape_like(query));
        sqlx::query_as::<_, Image>(
            "SELECT * FROM images \
             WHERE deleted_at IS NULL \
               AND name ILIKE $2 ESCAPE '\\' \
               AND (owner_id = $1 OR $1 = ANY(shared_with)) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3",
        )
        .bind(user_id)
        .bind(pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search images", e))
    }

    async fn add_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Image> {
        self.update_returning(
            "UPDATE images SET shared_with = CASE \
                 WHEN $2 = ANY(shared_with) THEN shared_with \
                 ELSE array_append(shared_with, $2) END, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
            id,
            Some(user_id),
            "share image",
        )
        .await
    }

    async fn remove_share(&self, id: Uuid, user_id: Uuid) -> AppResult<Image> {
        self.update_returning(
            "UPDATE images SET shared_with = array_remove(shared_with, $2), \
             updated_at = NOW() WHERE id = $1 RETURNING *",
            id,
            Some(user_id),
            "unshare image",
        )
        .await
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<Image> {
        self.update_returning(
            "UPDATE images SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
            id,
            None,
            "delete image",
        )
        .await
    }

    async fn restore(&self, id: Uuid) -> AppResult<Image> {
        self.update_returning(
            "UPDATE images SET deleted_at = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
            id,
            None,
            "restore image",
        )
        .await
    }
}
