// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, storage backend, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::StorageService;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting nairobi-reports service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool and schema
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config::ensure_schema(&pool).await {
        log::error!("Failed to bootstrap database schema: {}", e);
        std::process::exit(1);
    }

    // 5. Select the storage backend once, from configuration
    let storage = match StorageService::from_config(&config).await {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            log::error!("Failed to initialize storage backend: {}", e);
            std::process::exit(1);
        }
    };

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let config_clone = config.clone();

    HttpServer::new(move || {
        App::new()
            // Application state (database pool, config, and storage backend)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_clone.clone()))
            .app_data(web::Data::new(storage.clone()))
            // Mock upload sink receives raw photo bytes
            .app_data(web::PayloadConfig::new(10 * 1024 * 1024))
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::upload_config)
            .configure(handlers::photos_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
