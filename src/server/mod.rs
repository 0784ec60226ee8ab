//! Web surface
//!
//! Minimal axum app: a single form page that runs the calculation, a
//! health probe, and a data-source validation endpoint.

mod handlers;
mod pages;

use crate::resolver::PositionResolver;
use crate::source::DataSource;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<PositionResolver>,
    pub source: Arc<dyn DataSource>,
    /// Confidence used when the form leaves the field blank
    pub default_confidence: f64,
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::compute))
        .route("/health", get(handlers::health))
        .route("/api/validate", get(handlers::validate))
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn serve(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Web server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
