// src/config/db.rs
// DOCUMENTATION: Photo store initialization
// PURPOSE: Setup the PostgreSQL pool or the in-memory store

use crate::config::{Config, StoreKind};
use crate::db::{MemoryPhotoStore, PgPhotoStore, PhotoStore};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Creates connection pool with optimal settings
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!("Initializing database pool");

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

/// Build the configured photo store
/// DOCUMENTATION: Called once during startup; the result is shared by all workers
pub async fn init_photo_store(config: &Config) -> Result<Arc<dyn PhotoStore>, String> {
    match config.photo_store {
        StoreKind::Memory => {
            log::warn!("Using in-memory photo store - data is lost on restart");
            Ok(Arc::new(MemoryPhotoStore::new()))
        }
        StoreKind::Postgres => {
            let pool = init_db_pool(config)
                .await
                .map_err(|e| format!("Failed to connect to database: {}", e))?;

            let store = PgPhotoStore::new(pool);
            store.ensure_schema().await.map_err(|e| e.to_string())?;
            Ok(Arc::new(store))
        }
    }
}
