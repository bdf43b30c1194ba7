// src/handlers/upload.rs
// DOCUMENTATION: HTTP handlers for upload authorization
// PURPOSE: Presigned-URL issuing plus the mock object endpoints that back
// the local storage variant

use crate::config::Config;
use crate::errors::PhotosError;
use crate::models::{PresignedUrlRequest, PresignedUrlResponse};
use crate::services::StorageService;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// POST /upload/presigned-url
/// Issue a time-limited upload authorization for one photo
pub async fn presigned_url(
    config: web::Data<Config>,
    storage: web::Data<Arc<StorageService>>,
    req: web::Json<PresignedUrlRequest>,
) -> Result<impl Responder, PhotosError> {
    if let Err(e) = req.validate() {
        return Err(PhotosError::ValidationError(e.to_string()));
    }

    let filename = req.sanitized_filename()?;
    let content_type = req.normalized_content_type()?;

    let key = storage.generate_key(&filename);
    let upload_url = storage
        .presign_upload(&key, &content_type, config.upload_url_ttl_secs)
        .await?;

    Ok(HttpResponse::Ok().json(PresignedUrlResponse {
        upload_url,
        key,
        expires_in: config.upload_url_ttl_secs,
    }))
}

/// PUT /mock-upload/{key}
/// Upload sink for the local storage variant; the presigned URLs it issues
/// point here. Unavailable when the S3 backend is active.
pub async fn mock_upload(
    storage: web::Data<Arc<StorageService>>,
    path: web::Path<String>,
    body: web::Bytes,
) -> Result<impl Responder, PhotosError> {
    let key = path.into_inner();
    match storage.get_ref().as_ref() {
        StorageService::Mock(local) => {
            local.store(&key, &body)?;
            log::info!("Mock upload stored: {}", key);
            Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Upload successful" })))
        }
        StorageService::Cloud(_) => Err(PhotosError::NotFound(key)),
    }
}

/// GET /mock-photos/{key}
/// Download endpoint for objects stored by the local variant
pub async fn mock_download(
    storage: web::Data<Arc<StorageService>>,
    path: web::Path<String>,
) -> Result<impl Responder, PhotosError> {
    let key = path.into_inner();
    match storage.get_ref().as_ref() {
        StorageService::Mock(local) => match local.load(&key) {
            Some(bytes) => Ok(HttpResponse::Ok()
                .content_type("application/octet-stream")
                .body(bytes)),
            None => Err(PhotosError::NotFound(key)),
        },
        StorageService::Cloud(_) => Err(PhotosError::NotFound(key)),
    }
}

/// Configuration for upload routes
/// The mock routes tail-match so generated keys keep their slashes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload/presigned-url", web::post().to(presigned_url))
        .route("/mock-upload/{key:.*}", web::put().to(mock_upload))
        .route("/mock-photos/{key:.*}", web::get().to(mock_download));
}
