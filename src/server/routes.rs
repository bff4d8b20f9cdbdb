//! Route table for the forecast service

use axum::{routing::get, Router};

use super::handlers;
use super::state::AppState;

/// Builds the API route table. The caller nests this under its base path.
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/weatherforecast", get(handlers::get_forecast))
        .route("/weatherforecast/stats", get(handlers::get_forecast_stats))
        .with_state(state)
}
