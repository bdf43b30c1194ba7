// src/services/photo_service.rs
// DOCUMENTATION: Business logic for photo records
// PURPOSE: Intermediary between handlers and repository; owns validation and
// the record lifecycle

use crate::db::PhotoRepository;
use crate::errors::PhotosError;
use crate::models::{
    validate_description, validate_latitude, validate_longitude, validate_storage_key,
    CreatePhotoRequest, Photo, PhotoFilter, UpdatePhotoRequest,
};
use crate::services::StorageService;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PhotoService;

impl PhotoService {
    /// Register metadata for an uploaded photo
    /// DOCUMENTATION: Validates bounds before any write; the public URL is
    /// derived from the storage key through the gateway and persisted
    /// redundantly for fast reads. The object's existence is not verified -
    /// upload and registration are deliberately decoupled.
    pub async fn create_photo(
        pool: &PgPool,
        storage: &StorageService,
        req: CreatePhotoRequest,
    ) -> Result<Photo, PhotosError> {
        let description = validate_description(&req.description)?;
        let latitude = validate_latitude(req.latitude)?;
        let longitude = validate_longitude(req.longitude)?;
        let storage_key = validate_storage_key(&req.storage_key)?;

        let public_url = storage.public_url(&storage_key);

        let photo = PhotoRepository::create_photo(
            pool,
            &storage_key,
            &public_url,
            &description,
            latitude,
            longitude,
        )
        .await?;

        log::info!("Created photo {}", photo.id);
        Ok(photo)
    }

    /// Fetch one photo; None is a normal miss, not an error
    pub async fn get_photo(pool: &PgPool, id: Uuid) -> Result<Option<Photo>, PhotosError> {
        PhotoRepository::get_by_id(pool, id).await
    }

    /// List photos matching the filter, newest first
    pub async fn get_photos(pool: &PgPool, filter: &PhotoFilter) -> Result<Vec<Photo>, PhotosError> {
        PhotoRepository::list(pool, &filter.normalized()).await
    }

    /// Count photos matching the filter (pagination ignored)
    pub async fn count_photos(pool: &PgPool, filter: &PhotoFilter) -> Result<i64, PhotosError> {
        PhotoRepository::count(pool, &filter.normalized()).await
    }

    /// Apply a partial update
    /// DOCUMENTATION: Provided fields are validated with the same bounds as
    /// registration; omitted fields stay untouched. updated_at is refreshed
    /// only when the patch carries at least one field.
    pub async fn update_photo(
        pool: &PgPool,
        id: Uuid,
        patch: UpdatePhotoRequest,
    ) -> Result<Option<Photo>, PhotosError> {
        if patch.is_empty() {
            return PhotoRepository::get_by_id(pool, id).await;
        }

        let description = match &patch.description {
            Some(d) => Some(validate_description(d)?),
            None => None,
        };
        let latitude = patch.latitude.map(validate_latitude).transpose()?;
        let longitude = patch.longitude.map(validate_longitude).transpose()?;

        let updated =
            PhotoRepository::update_photo(pool, id, description.as_deref(), latitude, longitude)
                .await?;

        if updated.is_some() {
            log::info!("Updated photo {}", id);
        }
        Ok(updated)
    }

    /// Delete a photo record and, best-effort, its backing object
    /// DOCUMENTATION: The metadata delete is authoritative. The gateway
    /// delete is attempted exactly once and its outcome only logged - a
    /// failed object delete never blocks removal of the record. Returns
    /// false for an unknown id without touching the gateway.
    pub async fn delete_photo(
        pool: &PgPool,
        storage: &StorageService,
        id: Uuid,
    ) -> Result<bool, PhotosError> {
        let photo = match PhotoRepository::get_by_id(pool, id).await? {
            Some(photo) => photo,
            None => return Ok(false),
        };

        if !storage.delete(&photo.storage_key).await {
            log::warn!(
                "Object delete failed for photo {} (key: {}), removing record anyway",
                id,
                photo.storage_key
            );
        }

        PhotoRepository::delete_photo(pool, id).await?;
        log::info!("Deleted photo {}", id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ensure_schema;
    use crate::services::LocalStorage;
    use std::time::Duration;
    use tempfile::tempdir;

    fn mock_storage(dir: &tempfile::TempDir) -> StorageService {
        StorageService::Mock(
            LocalStorage::with_root(dir.path(), "http://localhost:8000").unwrap(),
        )
    }

    fn create_request(storage_key: &str) -> CreatePhotoRequest {
        CreatePhotoRequest {
            description: "Pothole on Road".to_string(),
            latitude: -1.25,
            longitude: 36.8,
            storage_key: storage_key.to_string(),
        }
    }

    #[sqlx::test(migrations = false)]
    async fn test_create_derives_public_url_and_trims(pool: PgPool) {
        ensure_schema(&pool).await.unwrap();
        let dir = tempdir().unwrap();
        let storage = mock_storage(&dir);

        let mut req = create_request("photos/2024/01/02/abc.jpg");
        req.description = "  Pothole on Road  ".to_string();

        let photo = PhotoService::create_photo(&pool, &storage, req).await.unwrap();
        assert_eq!(photo.description, "Pothole on Road");
        assert_eq!(photo.public_url, storage.public_url(&photo.storage_key));

        let fetched = PhotoService::get_photo(&pool, photo.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.storage_key, photo.storage_key);
        assert_eq!(fetched.public_url, photo.public_url);
    }

    #[sqlx::test(migrations = false)]
    async fn test_delete_removes_backing_object(pool: PgPool) {
        ensure_schema(&pool).await.unwrap();
        let dir = tempdir().unwrap();
        let storage = mock_storage(&dir);
        let key = "photos/2024/01/02/abc.jpg";

        let photo = PhotoService::create_photo(&pool, &storage, create_request(key))
            .await
            .unwrap();
        if let StorageService::Mock(local) = &storage {
            local.store(key, b"bytes").unwrap();
        }

        assert!(PhotoService::delete_photo(&pool, &storage, photo.id)
            .await
            .unwrap());
        assert!(PhotoService::get_photo(&pool, photo.id)
            .await
            .unwrap()
            .is_none());

        // The object delete actually ran against the gateway
        if let StorageService::Mock(local) = &storage {
            assert!(local.load(key).is_none());
        }
    }

    #[sqlx::test(migrations = false)]
    async fn test_delete_unknown_id_skips_gateway(pool: PgPool) {
        ensure_schema(&pool).await.unwrap();
        let dir = tempdir().unwrap();
        let storage = mock_storage(&dir);
        let key = "photos/2024/01/02/abc.jpg";

        if let StorageService::Mock(local) = &storage {
            local.store(key, b"bytes").unwrap();
        }

        let deleted = PhotoService::delete_photo(&pool, &storage, Uuid::new_v4())
            .await
            .unwrap();
        assert!(!deleted);

        // No gateway call happened: the stored object is untouched
        if let StorageService::Mock(local) = &storage {
            assert_eq!(local.load(key).unwrap(), b"bytes");
        }
    }

    #[sqlx::test(migrations = false)]
    async fn test_empty_patch_leaves_record_unchanged(pool: PgPool) {
        ensure_schema(&pool).await.unwrap();
        let dir = tempdir().unwrap();
        let storage = mock_storage(&dir);

        let photo = PhotoService::create_photo(
            &pool,
            &storage,
            create_request("photos/2024/01/02/abc.jpg"),
        )
        .await
        .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        let unchanged = PhotoService::update_photo(&pool, photo.id, UpdatePhotoRequest::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.updated_at, photo.updated_at);
        assert_eq!(unchanged.description, photo.description);
    }
}
