//! REST API for forecast parameters, results and summary.
//!
//! Provides the following endpoints:
//! - `GET /parameters`: parameter record of the loaded scenario
//! - `GET /forecast`: per-year records with optional year range filtering
//! - `GET /summary`: horizon summary of the loaded scenario
//! - `POST /forecast`: forecast for posted parameters

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::model::params::ForecastParameters;
use crate::model::summary::ForecastSummary;
use crate::model::types::ForecastResult;

pub use types::{ErrorResponse, ForecastQuery, ForecastResponse};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the forecast completes and wrapped in `Arc`; no
/// locks needed since all data is read-only.
pub struct AppState {
    /// Parameters the loaded forecast was computed from.
    pub parameters: ForecastParameters,
    /// Forecast table of the loaded scenario.
    pub result: ForecastResult,
    /// Summary of the loaded scenario.
    pub summary: ForecastSummary,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/parameters", get(handlers::get_parameters))
        .route(
            "/forecast",
            get(handlers::get_forecast).post(handlers::post_forecast),
        )
        .route("/summary", get(handlers::get_summary))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
