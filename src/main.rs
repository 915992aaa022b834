// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, photo store, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info,sqlx=warn"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting photo-service...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize photo store
    let store = match config::init_photo_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            log::error!("Failed to initialize photo store: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("Photo store ready ({:?})", config.photo_store);

    if config.enable_fake_endpoint {
        log::info!("Fake data endpoint enabled at POST /photos/fake");
    }

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let store = web::Data::from(store);
    let enable_fake = config.enable_fake_endpoint;

    HttpServer::new(move || {
        App::new()
            // Application state (shared photo store)
            .app_data(store.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(|cfg| handlers::photos_config(cfg, enable_fake))
    })
    .bind(&server_addr)?
    .run()
    .await
}
