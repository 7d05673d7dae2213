//! Taskboard server binary
//!
//! Standalone REST server for tasks and subtasks.

use anyhow::Context;
use std::net::SocketAddr;
use taskboard::api::create_router;
use taskboard::config::{SecurityState, ServerConfig};
use taskboard::db::DatabaseConnection;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing/logging
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(rust_log).init();

    tracing::info!("Loading server configuration...");
    let config = ServerConfig::load().context("Failed to load server configuration")?;

    tracing::info!("Server name: {}", config.server.name);
    tracing::info!("Database Path: {}", config.database.path);
    tracing::info!("API key header: {}", config.security.api_key_header);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.bind_address()))?;

    let security = SecurityState::new(&config.security)?;

    let database_url = config.database_url();
    tracing::info!("Connecting to database: {}", database_url);
    let db = DatabaseConnection::with_max_connections(&database_url, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", database_url))?;

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Performing database health check");
    db.health_check().await.context("Database health check failed")?;

    tracing::info!("Building API router");
    let app = create_router(db.clone(), security);

    tracing::info!("Starting taskboard server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Taskboard server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL-C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
