//! HTTP control surface for the playback gate
//!
//! REST endpoints for transport control and block management, plus an SSE
//! stream of gate events.

pub mod handlers;
pub mod sse;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::playback::{PlaybackGate, TransportEngine};
use crate::state::SharedState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Gate wired to the in-memory transport and the shared state store
pub type HostGate = PlaybackGate<Arc<TransportEngine>, Arc<SharedState>>;

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    pub gate: Arc<HostGate>,
}

/// Create the API router
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        // Service endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))

        // Transport control
        .route("/playback/state", get(handlers::get_state))
        .route("/playback/play", post(handlers::play))
        .route("/playback/pause", post(handlers::pause))
        .route("/playback/time", post(handlers::set_time))
        .route("/playback/row", post(handlers::set_row))

        // Block management
        .route("/playback/block", post(handlers::block))
        .route("/playback/release", post(handlers::release))

        // SSE event stream
        .route("/events", get(sse::event_stream))

        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}

/// Run HTTP API server until Ctrl+C or SIGTERM
pub async fn run(config: &Config, ctx: AppContext) -> Result<()> {
    let app = create_router(ctx);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| Error::Http(format!("Failed to bind to {}:{}: {}", config.host, config.port, e)))?;

    let local_addr = listener.local_addr()?;
    info!("Starting HTTP server on {}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Http(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
