//! HTTP server setup and routing.
//!
//! A thin JSON adapter over [`MoodTune`]: every route validates its input,
//! calls into the engine, and serializes the result. CORS is permissive so a
//! browser front-end served from anywhere can call it.

mod error;
mod routes;

pub use error::{AppError, ErrorResponse};

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::ServerConfig;
use crate::engine::MoodTune;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub engine: Arc<MoodTune>,
}

impl AppState {
    pub fn new(config: ServerConfig, engine: MoodTune) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}

/// Builds the router with all routes and layers attached.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/analyze", post(routes::analyze))
        .route("/moods", get(routes::moods))
        .route("/recommend/:mood", get(routes::recommend))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Binds to the configured address and serves until Ctrl-C.
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.bind_address();
    let source = state.engine.source_name();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    info!("MoodTune API listening on http://{addr} (song source: {source})");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("MoodTune API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
