//! HTTP Transport
//!
//! Endpoints:
//! - POST /recommend: ranked matches of every record type
//! - GET /health: per-collection reachability
//! - GET /debug-query: query parsing and sample scores
//! - GET /collections-info: record counts and descriptions

pub mod handlers;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::{ConfigError, ServerConfig};
use state::AppState;

/// Build the axum router with all API routes
pub fn build_router(state: AppState, max_concurrency: usize) -> Router {
    Router::new()
        .route("/recommend", post(handlers::recommend))
        .route("/health", get(handlers::health))
        .route("/debug-query", get(handlers::debug_query))
        .route("/collections-info", get(handlers::collections_info))
        .layer(
            ServiceBuilder::new()
                .concurrency_limit(max_concurrency.max(1))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Server startup or runtime failure
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), ServeError> {
    config.validate()?;
    let addr = config.socket_addr()?;
    let app = build_router(state, config.max_concurrency);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("CollabUp API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("CollabUp API shutting down");
    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
