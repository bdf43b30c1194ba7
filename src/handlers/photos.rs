// src/handlers/photos.rs
// DOCUMENTATION: HTTP handlers for photo record operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::PhotosError;
use crate::models::{CreatePhotoRequest, PhotoFilter, PhotoResponse, UpdatePhotoRequest};
use crate::services::{PhotoService, StorageService};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// POST /photos
/// Register metadata for a photo already uploaded through a presigned URL
pub async fn create_photo(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<StorageService>>,
    req: web::Json<CreatePhotoRequest>,
) -> Result<impl Responder, PhotosError> {
    if let Err(e) = req.validate() {
        return Err(PhotosError::ValidationError(e.to_string()));
    }

    let photo = PhotoService::create_photo(pool.get_ref(), storage.get_ref(), req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(photo.to_response()))
}

/// GET /photos
/// List photos, optionally filtered by description substring, newest first
pub async fn get_photos(
    pool: web::Data<PgPool>,
    query: web::Query<PhotoFilter>,
) -> Result<impl Responder, PhotosError> {
    let photos = PhotoService::get_photos(pool.get_ref(), &query).await?;
    let responses: Vec<PhotoResponse> = photos.iter().map(|p| p.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /photos/count
/// Total number of photos matching the filter (limit/offset ignored)
pub async fn count_photos(
    pool: web::Data<PgPool>,
    query: web::Query<PhotoFilter>,
) -> Result<impl Responder, PhotosError> {
    let count = PhotoService::count_photos(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// GET /photos/{id}
/// Fetch one photo record
pub async fn get_photo(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, PhotosError> {
    let id = path.into_inner();
    match PhotoService::get_photo(pool.get_ref(), id).await? {
        Some(photo) => Ok(HttpResponse::Ok().json(photo.to_response())),
        None => Err(PhotosError::NotFound(id.to_string())),
    }
}

/// PUT /photos/{id}
/// Partially update a photo record; omitted fields stay untouched
pub async fn update_photo(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePhotoRequest>,
) -> Result<impl Responder, PhotosError> {
    if let Err(e) = req.validate() {
        return Err(PhotosError::ValidationError(e.to_string()));
    }

    let id = path.into_inner();
    match PhotoService::update_photo(pool.get_ref(), id, req.into_inner()).await? {
        Some(photo) => Ok(HttpResponse::Ok().json(photo.to_response())),
        None => Err(PhotosError::NotFound(id.to_string())),
    }
}

/// DELETE /photos/{id}
/// Delete a photo record and, best-effort, its stored object
pub async fn delete_photo(
    pool: web::Data<PgPool>,
    storage: web::Data<Arc<StorageService>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, PhotosError> {
    let id = path.into_inner();
    let deleted = PhotoService::delete_photo(pool.get_ref(), storage.get_ref(), id).await?;
    if !deleted {
        return Err(PhotosError::NotFound(id.to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Photo deleted successfully" })))
}

/// Configuration for photo routes
/// /photos/count is registered before /photos/{id} so it is not shadowed by
/// the id matcher.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/photos")
            .route("", web::post().to(create_photo))
            .route("", web::get().to(get_photos))
            .route("/count", web::get().to(count_photos))
            .route("/{id}", web::get().to(get_photo))
            .route("/{id}", web::put().to(update_photo))
            .route("/{id}", web::delete().to(delete_photo)),
    );
}
