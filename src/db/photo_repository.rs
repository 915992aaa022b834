// src/db/photo_repository.rs
// DOCUMENTATION: Photo database operations
// PURPOSE: PostgreSQL implementation of PhotoStore

use crate::db::{parse_photo_id, validate_payload, PhotoStore};
use crate::errors::ModelError;
use crate::models::{page_offset, NewPhoto, Photo, PhotoPatch};
use async_trait::async_trait;
use sqlx::PgPool;

/// Table definition, applied at startup
pub const PHOTOS_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS photos (
        id UUID PRIMARY KEY,
        price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
        url TEXT NOT NULL,
        date TIMESTAMPTZ NOT NULL,
        theme TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
"#;

/// Photo store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgPhotoStore {
    pool: PgPool,
}

impl PgPhotoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the photos table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), ModelError> {
        sqlx::query(PHOTOS_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log::error!("Failed to create photos table: {}", e);
                ModelError::DatabaseError(format!("Create schema failed: {}", e))
            })?;
        Ok(())
    }
}

/// Column guarded by a photos check constraint
/// DOCUMENTATION: Postgres names column check constraints `<table>_<column>_check`
fn constraint_field(constraint: &str) -> Option<&str> {
    constraint
        .strip_prefix("photos_")
        .and_then(|rest| rest.strip_suffix("_check"))
        .filter(|field| !field.is_empty())
}

/// Translate constraint violations to the column they guard
fn map_db_error(context: &str, e: sqlx::Error) -> ModelError {
    if let Some(db_err) = e.as_database_error() {
        if let Some(field) = db_err.constraint().and_then(constraint_field) {
            return ModelError::Validation {
                field: field.to_string(),
                message: db_err.message().to_string(),
            };
        }
    }

    log::error!("{} failed: {}", context, e);
    ModelError::DatabaseError(format!("{} failed: {}", context, e))
}

#[async_trait]
impl PhotoStore for PgPhotoStore {
    async fn create(&self, req: NewPhoto) -> Result<Photo, ModelError> {
        validate_payload(&req)?;

        let photo = sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO photos (id, price, url, date, theme, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(uuid::Uuid::new_v4())
        .bind(req.price)
        .bind(&req.url)
        .bind(req.date)
        .bind(&req.theme)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("Create photo", e))?;

        log::info!("Created photo with id: {}", photo.id);
        Ok(photo)
    }

    async fn get_filtered(&self, page: i64, limit: i64) -> Result<Vec<Photo>, ModelError> {
        let photos = sqlx::query_as::<_, Photo>(
            r#"
            SELECT * FROM photos
            ORDER BY created_at ASC, id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit.max(1))
        .bind(page_offset(page, limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("Fetch photos", e))?;

        Ok(photos)
    }

    async fn get_one(&self, id: &str) -> Result<Photo, ModelError> {
        let photo_id = parse_photo_id(id)?;

        sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(photo_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_error("Fetch photo", e))?
            .ok_or_else(|| ModelError::NotFound(photo_id.to_string()))
    }

    async fn update_one(&self, id: &str, patch: PhotoPatch) -> Result<Photo, ModelError> {
        let photo_id = parse_photo_id(id)?;
        validate_payload(&patch)?;

        sqlx::query_as::<_, Photo>(
            r#"
            UPDATE photos
            SET price = COALESCE($2, price),
                url = COALESCE($3, url),
                date = COALESCE($4, date),
                theme = COALESCE($5, theme),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(photo_id)
        .bind(patch.price)
        .bind(&patch.url)
        .bind(patch.date)
        .bind(&patch.theme)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Update photo", e))?
        .ok_or_else(|| ModelError::NotFound(photo_id.to_string()))
    }

    async fn replace_one(&self, id: &str, req: NewPhoto) -> Result<Photo, ModelError> {
        let photo_id = parse_photo_id(id)?;
        validate_payload(&req)?;

        sqlx::query_as::<_, Photo>(
            r#"
            UPDATE photos
            SET price = $2, url = $3, date = $4, theme = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(photo_id)
        .bind(req.price)
        .bind(&req.url)
        .bind(req.date)
        .bind(&req.theme)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("Replace photo", e))?
        .ok_or_else(|| ModelError::NotFound(photo_id.to_string()))
    }

    async fn delete_one(&self, id: &str) -> Result<(), ModelError> {
        let photo_id = parse_photo_id(id)?;

        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(photo_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("Delete photo", e))?;

        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound(photo_id.to_string()));
        }

        log::info!("Deleted photo with id: {}", photo_id);
        Ok(())
    }
}
