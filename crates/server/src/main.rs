//! HTTP server for the movie ratings API.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};

use server::{MovieService, ServerConfig, router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::parse();

    match &config.data_dir {
        Some(dir) => info!("Opening catalog in {}", dir.display()),
        None => warn!("No data directory configured; serving demo data, ratings are not persisted"),
    }
    let store = config.open_store().context("Failed to open movie catalog")?;
    let (users, movies, ratings) = store.read().counts();
    info!("Catalog ready: {} users, {} movies, {} ratings", users, movies, ratings);

    let app = router(MovieService::new(Arc::new(store)));

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
