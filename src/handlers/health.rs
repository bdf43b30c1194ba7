// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Report service status and storage backend reachability

use crate::services::StorageService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use std::sync::Arc;

pub async fn health_check(storage: web::Data<Arc<StorageService>>) -> impl Responder {
    let reachable = storage.bucket_reachable().await;

    HttpResponse::Ok().json(json!({
        "status": if reachable { "ok" } else { "degraded" },
        "service": "nairobi-reports",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": {
            "backend": storage.backend_name(),
            "reachable": reachable
        }
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
