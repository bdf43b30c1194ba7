// src/db/photo_repository.rs
// DOCUMENTATION: Photo database operations
// PURPOSE: Handle CRUD operations and filtered queries for photo records

use crate::errors::PhotosError;
use crate::models::{NormalizedFilter, Photo};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PhotoRepository;

impl PhotoRepository {
    /// Insert a new photo record
    /// DOCUMENTATION: Values arrive already validated and trimmed by the
    /// service layer; created_at and updated_at are both set to NOW().
    pub async fn create_photo(
        pool: &PgPool,
        storage_key: &str,
        public_url: &str,
        description: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Photo, PhotosError> {
        let photo = sqlx::query_as::<_, Photo>(
            r#"
            INSERT INTO photos (
                id, storage_key, public_url, description,
                latitude, longitude, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(storage_key)
        .bind(public_url)
        .bind(description)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create photo: {}", e);
            PhotosError::DatabaseError(format!("Create photo failed: {}", e))
        })?;

        Ok(photo)
    }

    /// Get a photo by id; None for a miss
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Photo>, PhotosError> {
        let photo = sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch photo {}: {}", id, e);
                PhotosError::DatabaseError(format!("Fetch photo failed: {}", e))
            })?;

        Ok(photo)
    }

    /// List photos matching the filter
    /// DOCUMENTATION: Description matching is a case-insensitive substring
    /// (ILIKE). Ordering is created_at descending, newest first - a hard
    /// guarantee for the endpoint. Pagination applies after filter + order.
    pub async fn list(
        pool: &PgPool,
        filter: &NormalizedFilter,
    ) -> Result<Vec<Photo>, PhotosError> {
        let query = match &filter.description {
            Some(term) => sqlx::query_as::<_, Photo>(
                r#"
                SELECT * FROM photos
                WHERE description ILIKE $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(like_pattern(term))
            .bind(filter.limit)
            .bind(filter.offset),
            None => sqlx::query_as::<_, Photo>(
                r#"
                SELECT * FROM photos
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(filter.limit)
            .bind(filter.offset),
        };

        let photos = query.fetch_all(pool).await.map_err(|e| {
            log::error!("Failed to list photos: {}", e);
            PhotosError::DatabaseError(format!("List photos failed: {}", e))
        })?;

        Ok(photos)
    }

    /// Count photos matching the filter, ignoring pagination
    pub async fn count(pool: &PgPool, filter: &NormalizedFilter) -> Result<i64, PhotosError> {
        let query = match &filter.description {
            Some(term) => {
                sqlx::query_as::<_, (i64,)>(
                    "SELECT COUNT(*) FROM photos WHERE description ILIKE $1",
                )
                .bind(like_pattern(term))
            }
            None => sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM photos"),
        };

        let (count,) = query.fetch_one(pool).await.map_err(|e| {
            log::error!("Failed to count photos: {}", e);
            PhotosError::DatabaseError(format!("Count photos failed: {}", e))
        })?;

        Ok(count)
    }

    /// Apply a partial update to a photo
    /// DOCUMENTATION: NULL bind values leave the column untouched via
    /// COALESCE; updated_at is always refreshed. Returns None for a miss.
    pub async fn update_photo(
        pool: &PgPool,
        id: Uuid,
        description: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Option<Photo>, PhotosError> {
        let photo = sqlx::query_as::<_, Photo>(
            r#"
            UPDATE photos
            SET description = COALESCE($2, description),
                latitude = COALESCE($3, latitude),
                longitude = COALESCE($4, longitude),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(description)
        .bind(latitude)
        .bind(longitude)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to update photo {}: {}", id, e);
            PhotosError::DatabaseError(format!("Update photo failed: {}", e))
        })?;

        Ok(photo)
    }

    /// Delete a photo row; true when a row was removed
    pub async fn delete_photo(pool: &PgPool, id: Uuid) -> Result<bool, PhotosError> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete photo {}: {}", id, e);
                PhotosError::DatabaseError(format!("Delete photo failed: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Build an ILIKE pattern for a substring search
/// DOCUMENTATION: LIKE metacharacters in user input are escaped so they
/// match literally (Postgres default escape character is backslash).
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
