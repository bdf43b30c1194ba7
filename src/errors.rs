// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and error response
#[derive(Error, Debug)]
pub enum PhotosError {
    #[error("Photo not found with id: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    #[allow(dead_code)]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal server error")]
    #[allow(dead_code)]
    InternalError,
}

/// Convert PhotosError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for PhotosError {
    fn error_response(&self) -> HttpResponse {
        let (status, error_code) = match self {
            PhotosError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            PhotosError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            PhotosError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            PhotosError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            PhotosError::StorageError(_) => (StatusCode::BAD_GATEWAY, "STORAGE_ERROR"),
            PhotosError::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(status).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PhotosError::NotFound(_) => StatusCode::NOT_FOUND,
            PhotosError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PhotosError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PhotosError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PhotosError::StorageError(_) => StatusCode::BAD_GATEWAY,
            PhotosError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
