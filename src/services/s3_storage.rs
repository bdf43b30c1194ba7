// src/services/s3_storage.rs
// DOCUMENTATION: S3-backed storage gateway
// PURPOSE: Presigned uploads, public URLs and best-effort deletes against
// the configured photo bucket

use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use tokio::time::timeout;

use crate::config::Config;
use crate::errors::PhotosError;

/// S3 storage gateway
pub struct S3Storage {
    client: Client,
    bucket: String,
    region: String,
    delete_timeout: Duration,
}

impl S3Storage {
    /// Build the S3 client from explicit credentials in configuration
    pub async fn new(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "nairobi-reports",
        );

        let sdk_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .credentials_provider(credentials)
            .build();

        S3Storage {
            client: Client::from_conf(sdk_config),
            bucket: config.s3_bucket_name.clone(),
            region: config.aws_region.clone(),
            delete_timeout: Duration::from_secs(config.storage_delete_timeout_secs),
        }
    }

    /// Presign a single PUT of the given content type
    pub async fn presign_upload(
        &self,
        key: &str,
        content_type: &str,
        ttl_secs: u64,
    ) -> Result<String, PhotosError> {
        let presign_config = PresigningConfig::expires_in(Duration::from_secs(ttl_secs))
            .map_err(|e| PhotosError::StorageError(format!("Invalid presign expiry: {}", e)))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presign_config)
            .await
            .map_err(|e| {
                log::error!("Failed to presign upload for {}: {}", key, e);
                PhotosError::StorageError(format!("Failed to generate upload URL: {}", e))
            })?;

        Ok(presigned.uri().to_string())
    }

    /// Public-read URL for an object; no network call
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }

    /// Delete an object under a bounded timeout
    /// DOCUMENTATION: S3 DeleteObject succeeds for missing keys, so "not
    /// found" never surfaces here. Errors and timeouts are logged and
    /// reported as false.
    pub async fn delete(&self, key: &str) -> bool {
        let request = self
            .client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send();

        match timeout(self.delete_timeout, request).await {
            Ok(Ok(_)) => {
                log::info!("Deleted S3 object: {}", key);
                true
            }
            Ok(Err(e)) => {
                log::error!("Error deleting S3 object {}: {}", key, e);
                false
            }
            Err(_) => {
                log::error!(
                    "Timed out deleting S3 object {} after {:?}",
                    key,
                    self.delete_timeout
                );
                false
            }
        }
    }

    /// Check the bucket exists and is accessible
    pub async fn bucket_reachable(&self) -> bool {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => true,
            Err(e) => {
                log::error!("Error accessing bucket {}: {}", self.bucket, e);
                false
            }
        }
    }
}
