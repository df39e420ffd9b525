use crate::config::Config;
use crate::storage::Storage;
use crate::web::{app_router, AppState};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Build the full application for `storage`, serving assets from the configured static dir.
pub fn create_server(storage: Arc<dyn Storage>, config: &Config) -> Router {
    app_router(AppState::new(storage), &config.server.static_dir)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn start_server(
    storage: Arc<dyn Storage>,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_server(storage, config);
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    let port = listener.local_addr()?.port();

    info!("Fyyur listening on {}", addr);
    println!("🚀 Fyyur running on http://localhost:{port}");
    println!("💚 Health check:  http://localhost:{port}/health");
    println!("📈 Metrics:       http://localhost:{port}/metrics");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        // serve until killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
