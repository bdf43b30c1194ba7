// src/config/db.rs
// DOCUMENTATION: Database connection pool initialization
// PURPOSE: Setup PostgreSQL connection pool and bootstrap the schema

use crate::config::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Creates connection pool with optimal settings
/// Called once during application startup in main.rs
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!("Initializing database pool: {}", config.database_url);

    let pool = PgPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}

/// Create the photos table and its indexes if they are missing
/// DOCUMENTATION: Idempotent schema bootstrap run at startup.
/// Indexes cover storage-key lookup, created_at range scans and
/// description filtering.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS photos (
            id UUID PRIMARY KEY,
            storage_key VARCHAR(255) NOT NULL,
            public_url VARCHAR(500) NOT NULL,
            description TEXT NOT NULL,
            latitude DOUBLE PRECISION NOT NULL,
            longitude DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_storage_key ON photos (storage_key)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_created_at ON photos (created_at)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_location ON photos (latitude, longitude)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_description ON photos (description)")
        .execute(pool)
        .await?;

    log::info!("Database schema verified");
    Ok(())
}
