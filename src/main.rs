//! Food delivery API proxy server
//!
//! Serves the proxy router over TCP until interrupted

use anyhow::{Context, Result};
use foodproxy::utils::logging::init_logging;
use foodproxy::{create_router, version_info, Settings};
use std::net::SocketAddr;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", version_info());

    if settings.is_dev_mode() {
        warn!("Development mode enabled, error details will be returned to clients");
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let upstream = settings.upstream.base_url.clone();

    let app = create_router(settings).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Food delivery proxy started!");
    info!("📝 Health check: http://{}/", addr);
    info!("🔄 Upstream: {}", upstream);

    // Peer addresses feed the rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
