// src/models/photo.rs
// DOCUMENTATION: Core data structures for photo reports
// PURPOSE: Defines serialization/deserialization models for API and database

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::errors::PhotosError;

/// Accepted report locations are constrained to the Nairobi bounding box.
/// Fixed deployment constants, not configurable per-request.
pub const LATITUDE_MIN: f64 = -1.5;
pub const LATITUDE_MAX: f64 = -1.0;
pub const LONGITUDE_MIN: f64 = 36.5;
pub const LONGITUDE_MAX: f64 = 37.2;

/// Maximum description length after trimming
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// Default and maximum page sizes for list queries
pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// Photo report record as stored in the photos table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub storage_key: String,
    pub public_url: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for registering an uploaded photo
/// DOCUMENTATION: Data transfer object for POST /photos endpoint.
/// The object itself is uploaded out-of-band with a presigned URL; this
/// request only registers its metadata. Existence of the object is not
/// verified here, by contract.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePhotoRequest {
    /// Report description (trimmed before persisting; length bounds are
    /// enforced post-trim by validate_description)
    pub description: String,

    /// Latitude within the Nairobi bounding box
    #[validate(range(min = -1.5, max = -1.0))]
    pub latitude: f64,

    /// Longitude within the Nairobi bounding box
    #[validate(range(min = 36.5, max = 37.2))]
    pub longitude: f64,

    /// Object key returned by the presigned-URL endpoint
    #[validate(length(min = 1, max = 255))]
    pub storage_key: String,
}

/// Request DTO for partially updating a photo record
/// DOCUMENTATION: Omitted fields are left untouched; there is no
/// clear-to-null path for any field.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdatePhotoRequest {
    pub description: Option<String>,

    #[validate(range(min = -1.5, max = -1.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = 36.5, max = 37.2))]
    pub longitude: Option<f64>,
}

impl UpdatePhotoRequest {
    /// True when the patch carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.latitude.is_none() && self.longitude.is_none()
    }
}

/// Photo DTO for API responses
#[derive(Debug, Clone, Serialize)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub storage_key: String,
    pub public_url: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Photo {
    /// Convert database record into API response DTO
    pub fn to_response(&self) -> PhotoResponse {
        PhotoResponse {
            id: self.id,
            storage_key: self.storage_key.clone(),
            public_url: self.public_url.clone(),
            description: self.description.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Query parameters for GET /photos and GET /photos/count
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PhotoFilter {
    /// Case-insensitive substring match against the description
    pub description: Option<String>,

    /// Page size, clamped to [1, 1000]
    pub limit: Option<i64>,

    /// Rows to skip, clamped to >= 0
    pub offset: Option<i64>,
}

impl PhotoFilter {
    /// Normalize raw query parameters into effective filter values
    /// DOCUMENTATION: A blank-after-trim description filter is treated as
    /// absent. Limit defaults to 100 and is clamped to [1, 1000]; offset
    /// defaults to 0 and is clamped to >= 0.
    pub fn normalized(&self) -> NormalizedFilter {
        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        NormalizedFilter {
            description,
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

/// Effective filter after normalization, consumed by the repository
#[derive(Debug, Clone)]
pub struct NormalizedFilter {
    pub description: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Validate and trim a description
/// DOCUMENTATION: Empty or whitespace-only descriptions are rejected;
/// surrounding whitespace is stripped before persisting.
pub fn validate_description(description: &str) -> Result<String, PhotosError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(PhotosError::ValidationError(
            "Description cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(PhotosError::ValidationError(format!(
            "Description exceeds {} characters",
            DESCRIPTION_MAX_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate latitude against the bounding box
pub fn validate_latitude(latitude: f64) -> Result<f64, PhotosError> {
    if !(LATITUDE_MIN..=LATITUDE_MAX).contains(&latitude) {
        return Err(PhotosError::ValidationError(format!(
            "Latitude {} outside bounds [{}, {}]",
            latitude, LATITUDE_MIN, LATITUDE_MAX
        )));
    }
    Ok(latitude)
}

/// Validate longitude against the bounding box
pub fn validate_longitude(longitude: f64) -> Result<f64, PhotosError> {
    if !(LONGITUDE_MIN..=LONGITUDE_MAX).contains(&longitude) {
        return Err(PhotosError::ValidationError(format!(
            "Longitude {} outside bounds [{}, {}]",
            longitude, LONGITUDE_MIN, LONGITUDE_MAX
        )));
    }
    Ok(longitude)
}

/// Validate and trim a storage key
pub fn validate_storage_key(storage_key: &str) -> Result<String, PhotosError> {
    let trimmed = storage_key.trim();
    if trimmed.is_empty() {
        return Err(PhotosError::ValidationError(
            "Storage key cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_trimmed() {
        assert_eq!(validate_description("  x  ").unwrap(), "x");
    }

    #[test]
    fn test_description_blank_rejected() {
        assert!(validate_description("").is_err());
        assert!(validate_description("   \t\n").is_err());
    }

    #[test]
    fn test_description_length_checked_after_trim() {
        let long = "a".repeat(DESCRIPTION_MAX_LEN);
        assert!(validate_description(&long).is_ok());
        let too_long = "a".repeat(DESCRIPTION_MAX_LEN + 1);
        assert!(validate_description(&too_long).is_err());

        // Padding does not count against the cap
        let padded = format!("   {}   ", "a".repeat(DESCRIPTION_MAX_LEN));
        assert_eq!(
            validate_description(&padded).unwrap().chars().count(),
            DESCRIPTION_MAX_LEN
        );
    }

    #[test]
    fn test_padded_max_length_description_passes_request_validation() {
        let req = CreatePhotoRequest {
            description: format!("   {}   ", "a".repeat(DESCRIPTION_MAX_LEN)),
            latitude: -1.25,
            longitude: 36.8,
            storage_key: "photos/2024/01/02/abc.jpg".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_latitude_bounds() {
        assert!(validate_latitude(-1.25).is_ok());
        assert!(validate_latitude(LATITUDE_MIN).is_ok());
        assert!(validate_latitude(LATITUDE_MAX).is_ok());
        assert!(validate_latitude(-1.6).is_err());
        assert!(validate_latitude(-0.9).is_err());
        assert!(validate_latitude(0.0).is_err());
    }

    #[test]
    fn test_longitude_bounds() {
        assert!(validate_longitude(36.8).is_ok());
        assert!(validate_longitude(LONGITUDE_MIN).is_ok());
        assert!(validate_longitude(LONGITUDE_MAX).is_ok());
        assert!(validate_longitude(36.4).is_err());
        assert!(validate_longitude(37.3).is_err());
    }

    #[test]
    fn test_storage_key_blank_rejected() {
        assert!(validate_storage_key("  ").is_err());
        assert_eq!(
            validate_storage_key(" photos/2024/01/02/x.jpg ").unwrap(),
            "photos/2024/01/02/x.jpg"
        );
    }

    #[test]
    fn test_filter_blank_description_treated_as_absent() {
        let filter = PhotoFilter {
            description: Some("   ".to_string()),
            limit: None,
            offset: None,
        };
        let normalized = filter.normalized();
        assert!(normalized.description.is_none());
        assert_eq!(normalized.limit, DEFAULT_LIMIT);
        assert_eq!(normalized.offset, 0);
    }

    #[test]
    fn test_filter_description_trimmed() {
        let filter = PhotoFilter {
            description: Some("  road  ".to_string()),
            limit: None,
            offset: None,
        };
        assert_eq!(filter.normalized().description.as_deref(), Some("road"));
    }

    #[test]
    fn test_filter_limit_clamped() {
        let filter = PhotoFilter {
            description: None,
            limit: Some(5000),
            offset: Some(-3),
        };
        let normalized = filter.normalized();
        assert_eq!(normalized.limit, MAX_LIMIT);
        assert_eq!(normalized.offset, 0);

        let filter = PhotoFilter {
            description: None,
            limit: Some(0),
            offset: None,
        };
        assert_eq!(filter.normalized().limit, 1);
    }

    #[test]
    fn test_empty_patch_detected() {
        assert!(UpdatePhotoRequest::default().is_empty());
        let patch = UpdatePhotoRequest {
            description: Some("new".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
