//! Axum server setup
//!
//! Server skeleton with:
//! - One listener for every subdomain
//! - Tracing middleware (request timeouts are applied per view)
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use botsite_core::SiteConfig;

use crate::db::SiteStore;
use crate::state::AppState;
use crate::views::{RouteManager, SetupError};

/// Build the full application router for the given state.
pub fn build_app(state: Arc<AppState>) -> Result<Router, ServerError> {
    let manager = RouteManager::new(state.config.clone())?;
    Ok(manager.into_router(state).layer(TraceLayer::new_for_http()))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let config = Arc::new(SiteConfig::from_env()?);
/// let store = Arc::new(PgStore::connect(config.require_database_url()?).await?);
/// run_server(config, store).await?;
/// ```
pub async fn run_server(
    config: Arc<SiteConfig>,
    store: Arc<dyn SiteStore>,
) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new(config.clone(), store)?);
    let app = build_app(state)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        server_name = %config.server_name,
        "Server listening on {}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid route table: {0}")]
    Setup(#[from] SetupError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
