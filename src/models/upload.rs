// src/models/upload.rs
// DOCUMENTATION: DTOs for the presigned-upload endpoint
// PURPOSE: Validate filename/content-type input before touching storage

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::PhotosError;

/// MIME types accepted for photo uploads
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Request DTO for POST /upload/presigned-url
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PresignedUrlRequest {
    /// Original filename on the client; only used for its extension
    #[validate(length(min = 1, max = 255))]
    pub filename: String,

    /// MIME type the upload will be constrained to
    #[validate(length(min = 1))]
    pub content_type: String,
}

impl PresignedUrlRequest {
    /// Strip path segments and check the remaining filename characters
    /// DOCUMENTATION: Clients may send full paths; only the final segment
    /// is kept. Letters, digits, '.', '_' and '-' are allowed, nothing else.
    pub fn sanitized_filename(&self) -> Result<String, PhotosError> {
        let trimmed = self.filename.trim();
        if trimmed.is_empty() {
            return Err(PhotosError::ValidationError(
                "Filename cannot be empty".to_string(),
            ));
        }

        // Drop any path components, both separator styles
        let name = trimmed
            .rsplit('/')
            .next()
            .and_then(|s| s.rsplit('\\').next())
            .unwrap_or_default();

        if name.is_empty() {
            return Err(PhotosError::ValidationError(
                "Filename cannot be empty".to_string(),
            ));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
        {
            return Err(PhotosError::ValidationError(
                "Filename contains invalid characters".to_string(),
            ));
        }

        Ok(name.to_string())
    }

    /// Validate the content type against the image allow-list
    /// DOCUMENTATION: Case-insensitive; returned value is lowercased.
    pub fn normalized_content_type(&self) -> Result<String, PhotosError> {
        let lowered = self.content_type.trim().to_ascii_lowercase();
        if !ALLOWED_CONTENT_TYPES.contains(&lowered.as_str()) {
            return Err(PhotosError::ValidationError(format!(
                "Content type must be one of: {}",
                ALLOWED_CONTENT_TYPES.join(", ")
            )));
        }
        Ok(lowered)
    }
}

/// Response DTO for POST /upload/presigned-url
#[derive(Debug, Clone, Serialize)]
pub struct PresignedUrlResponse {
    /// URL authorizing a single PUT of the photo bytes
    pub upload_url: String,
    /// Object key to register with POST /photos after the upload
    pub key: String,
    /// URL lifetime in seconds
    pub expires_in: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(filename: &str, content_type: &str) -> PresignedUrlRequest {
        PresignedUrlRequest {
            filename: filename.to_string(),
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn test_plain_filename_accepted() {
        let req = request("report_photo-01.jpg", "image/jpeg");
        assert_eq!(req.sanitized_filename().unwrap(), "report_photo-01.jpg");
    }

    #[test]
    fn test_path_segments_stripped() {
        let req = request("../uploads/pic.png", "image/png");
        assert_eq!(req.sanitized_filename().unwrap(), "pic.png");

        let req = request("C:\\Users\\me\\pic.png", "image/png");
        assert_eq!(req.sanitized_filename().unwrap(), "pic.png");
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(request("pic name.jpg", "image/jpeg")
            .sanitized_filename()
            .is_err());
        assert!(request("pic;rm.jpg", "image/jpeg")
            .sanitized_filename()
            .is_err());
    }

    #[test]
    fn test_blank_filename_rejected() {
        assert!(request("   ", "image/jpeg").sanitized_filename().is_err());
        assert!(request("dir/", "image/jpeg").sanitized_filename().is_err());
    }

    #[test]
    fn test_content_type_allow_list() {
        assert_eq!(
            request("a.jpg", "image/jpeg")
                .normalized_content_type()
                .unwrap(),
            "image/jpeg"
        );
        assert!(request("a.pdf", "application/pdf")
            .normalized_content_type()
            .is_err());
        assert!(request("a.svg", "image/svg+xml")
            .normalized_content_type()
            .is_err());
    }

    #[test]
    fn test_content_type_case_insensitive() {
        assert_eq!(
            request("a.png", "IMAGE/PNG")
                .normalized_content_type()
                .unwrap(),
            "image/png"
        );
    }
}
