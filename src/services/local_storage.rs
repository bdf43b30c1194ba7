// src/services/local_storage.rs
// DOCUMENTATION: Local-filesystem mock storage gateway
// PURPOSE: Development/CI stand-in for S3; stores objects under a root
// directory and points upload/download URLs at the mock endpoints

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::errors::PhotosError;

/// Local mock storage gateway
pub struct LocalStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create the storage root and the gateway
    pub fn new(config: &Config) -> Result<Self, PhotosError> {
        Self::with_root(&config.local_storage_path, &config.public_base_url)
    }

    /// Create a gateway rooted at an explicit directory
    pub fn with_root(root: impl AsRef<Path>, base_url: &str) -> Result<Self, PhotosError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            PhotosError::StorageError(format!(
                "Failed to create local storage root {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            root,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Synthetic upload URL pointing at the mock upload endpoint
    pub fn presign_upload(&self, key: &str) -> String {
        format!("{}/mock-upload/{}", self.base_url, key)
    }

    /// Synthetic public URL pointing at the mock download endpoint
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/mock-photos/{}", self.base_url, key)
    }

    /// Remove a stored object
    /// DOCUMENTATION: A missing file is a logged no-op that still counts as
    /// success; only a real filesystem failure or a malformed key reports
    /// false.
    pub fn delete(&self, key: &str) -> bool {
        let path = match self.object_path(key) {
            Ok(path) => path,
            Err(e) => {
                log::error!("Rejected delete for key {}: {}", key, e);
                return false;
            }
        };
        if !path.exists() {
            log::info!("Local delete no-op, object missing: {}", key);
            return true;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Deleted local object: {}", key);
                true
            }
            Err(e) => {
                log::error!("Error deleting local object {}: {}", key, e);
                false
            }
        }
    }

    /// Readiness probe: the storage root exists
    pub fn bucket_reachable(&self) -> bool {
        self.root.is_dir()
    }

    /// Filesystem path for a key, mapping key separators to directories
    /// DOCUMENTATION: Keys arrive from percent-decoded URL paths, so every
    /// segment is checked before touching the filesystem. Empty segments
    /// (leading separators, doubled slashes), `.`, `..` and backslashes are
    /// rejected - the resolved path can never leave the storage root.
    pub fn object_path(&self, key: &str) -> Result<PathBuf, PhotosError> {
        if key.is_empty() {
            return Err(PhotosError::ValidationError(
                "Object key cannot be empty".to_string(),
            ));
        }

        let mut path = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return Err(PhotosError::ValidationError(format!(
                    "Object key contains an invalid segment: {}",
                    key
                )));
            }
            path.push(segment);
        }
        Ok(path)
    }

    /// Store object bytes for the mock upload endpoint
    pub fn store(&self, key: &str, bytes: &[u8]) -> Result<(), PhotosError> {
        let path = self.object_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PhotosError::StorageError(format!("Failed to create object directory: {}", e))
            })?;
        }
        fs::write(&path, bytes)
            .map_err(|e| PhotosError::StorageError(format!("Failed to write object: {}", e)))
    }

    /// Read object bytes for the mock download endpoint; None for a miss
    /// or a malformed key
    pub fn load(&self, key: &str) -> Option<Vec<u8>> {
        fs::read(self.object_path(key).ok()?).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn gateway(dir: &tempfile::TempDir) -> LocalStorage {
        LocalStorage::with_root(dir.path(), "http://localhost:8000/").unwrap()
    }

    #[test]
    fn test_urls_embed_key_and_trim_slash() {
        let dir = tempdir().unwrap();
        let storage = gateway(&dir);
        assert_eq!(
            storage.presign_upload("photos/2024/01/02/abc.jpg"),
            "http://localhost:8000/mock-upload/photos/2024/01/02/abc.jpg"
        );
        assert_eq!(
            storage.public_url("photos/2024/01/02/abc.jpg"),
            "http://localhost:8000/mock-photos/photos/2024/01/02/abc.jpg"
        );
    }

    #[test]
    fn test_store_load_delete_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = gateway(&dir);
        let key = "photos/2024/01/02/abc.jpg";

        storage.store(key, b"bytes").unwrap();
        assert_eq!(storage.load(key).unwrap(), b"bytes");

        assert!(storage.delete(key));
        assert!(storage.load(key).is_none());
    }

    #[test]
    fn test_delete_missing_object_is_success() {
        let dir = tempdir().unwrap();
        let storage = gateway(&dir);
        assert!(storage.delete("photos/2024/01/02/missing.jpg"));
    }

    #[test]
    fn test_traversal_key_cannot_escape_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("objects");
        let storage = LocalStorage::with_root(&root, "http://localhost:8000").unwrap();

        assert!(storage.store("../escaped.txt", b"owned").is_err());
        assert!(!dir.path().join("escaped.txt").exists());

        assert!(storage
            .store("photos/../../escaped.txt", b"owned")
            .is_err());
        assert!(storage.load("../../etc/passwd").is_none());
    }

    #[test]
    fn test_malformed_keys_rejected() {
        let dir = tempdir().unwrap();
        let storage = gateway(&dir);

        assert!(storage.object_path("").is_err());
        assert!(storage.object_path("/photos/a.jpg").is_err());
        assert!(storage.object_path("photos//a.jpg").is_err());
        assert!(storage.object_path("photos/./a.jpg").is_err());
        assert!(storage.object_path("photos\\a.jpg").is_err());
        assert!(!storage.delete("../escaped.txt"));
    }

    #[test]
    fn test_bucket_reachable_after_construction() {
        let dir = tempdir().unwrap();
        let storage = gateway(&dir);
        assert!(storage.bucket_reachable());
    }
}
