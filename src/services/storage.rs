// src/services/storage.rs
// DOCUMENTATION: Object storage gateway
// PURPOSE: One contract, two backends - S3 in deployment, local filesystem
// in development. The backend is chosen once at startup from configuration,
// never per request.

use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::config::Config;
use crate::errors::PhotosError;
use crate::services::local_storage::LocalStorage;
use crate::services::s3_storage::S3Storage;

/// Extension used when the client filename has none
const DEFAULT_EXTENSION: &str = "jpg";

/// Startup-selected storage backend
pub enum StorageService {
    Cloud(S3Storage),
    Mock(LocalStorage),
}

impl StorageService {
    /// Construct the backend implied by configuration
    /// DOCUMENTATION: Real AWS credentials select the S3 backend; otherwise
    /// the local mock is used (development, CI).
    pub async fn from_config(config: &Config) -> Result<Self, PhotosError> {
        if config.has_aws_credentials() {
            let storage = S3Storage::new(config).await;
            log::info!(
                "Using S3 storage backend (bucket: {})",
                config.s3_bucket_name
            );
            Ok(StorageService::Cloud(storage))
        } else {
            let storage = LocalStorage::new(config)?;
            log::info!(
                "Using local mock storage backend (root: {})",
                config.local_storage_path
            );
            Ok(StorageService::Mock(storage))
        }
    }

    /// Short backend label for health reporting
    pub fn backend_name(&self) -> &'static str {
        match self {
            StorageService::Cloud(_) => "s3",
            StorageService::Mock(_) => "local",
        }
    }

    /// Generate a collision-resistant object key for an upload
    /// DOCUMENTATION: photos/yyyy/mm/dd/{uuid}.{ext} with the UTC date and
    /// the extension taken from the client filename. Identical for both
    /// backends.
    pub fn generate_key(&self, filename: &str) -> String {
        generate_key(filename)
    }

    /// Produce an upload authorization URL for the given key
    pub async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        ttl_secs: u64,
    ) -> Result<String, PhotosError> {
        match self {
            StorageService::Cloud(s3) => s3.presign_upload(key, content_type, ttl_secs).await,
            StorageService::Mock(local) => Ok(local.presign_upload(key)),
        }
    }

    /// Resolve the public-read URL for a stored object
    /// DOCUMENTATION: Pure string construction; no network call.
    pub fn public_url(&self, key: &str) -> String {
        match self {
            StorageService::Cloud(s3) => s3.public_url(key),
            StorageService::Mock(local) => local.public_url(key),
        }
    }

    /// Remove an object; true on success
    /// DOCUMENTATION: A missing object counts as success. Failures and
    /// timeouts are reported as false, never as an error - callers decide
    /// whether the outcome matters.
    pub async fn delete(&self, key: &str) -> bool {
        match self {
            StorageService::Cloud(s3) => s3.delete(key).await,
            StorageService::Mock(local) => local.delete(key),
        }
    }

    /// Side-effect-free readiness probe of the backend
    pub async fn bucket_reachable(&self) -> bool {
        match self {
            StorageService::Cloud(s3) => s3.bucket_reachable().await,
            StorageService::Mock(local) => local.bucket_reachable(),
        }
    }
}

/// Build a date-partitioned object key from a client filename
pub fn generate_key(filename: &str) -> String {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_EXTENSION);

    let now = Utc::now();
    format!(
        "photos/{}/{:02}/{:02}/{}.{}",
        now.year(),
        now.month(),
        now.day(),
        Uuid::new_v4(),
        ext
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    #[test]
    fn test_generate_key_shape() {
        let key = generate_key("report.png");
        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[0], "photos");
        assert!(parts[4].ends_with(".png"));

        // Date segments form a valid calendar date
        let year: i32 = parts[1].parse().unwrap();
        let month: u32 = parts[2].parse().unwrap();
        let day: u32 = parts[3].parse().unwrap();
        assert!(NaiveDate::from_ymd_opt(year, month, day).is_some());

        // Random segment parses back as a UUID
        let stem = parts[4].strip_suffix(".png").unwrap();
        assert!(Uuid::parse_str(stem).is_ok());
    }

    #[test]
    fn test_generate_key_default_extension() {
        assert!(generate_key("noextension").ends_with(".jpg"));
        assert!(generate_key("trailingdot.").ends_with(".jpg"));
    }

    #[test]
    fn test_generate_key_keeps_last_extension() {
        assert!(generate_key("archive.tar.gz").ends_with(".gz"));
    }

    #[test]
    fn test_generate_key_unique_over_many_calls() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate_key("photo.jpg")));
        }
    }
}
