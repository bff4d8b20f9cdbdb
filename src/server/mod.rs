//! Embedded forecast service
//!
//! An axum service that generates synthetic forecast data on demand. The
//! forecast-listing endpoint sits behind a declarative response-cache policy;
//! health and stats are always computed fresh.

pub mod errors;
pub mod generate;
pub mod handlers;
pub mod output_cache;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub use routes::create_api_routes;
pub use state::{AppState, ForecastOptions};

/// Builds the full application router: API routes nested under `/api`,
/// request tracing and a permissive CORS layer for dashboard clients.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", create_api_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds and serves until the process is stopped.
pub async fn serve(addr: SocketAddr, options: ForecastOptions) -> std::io::Result<()> {
    let state = AppState::new(options);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, default_days = options.default_days, max_days = options.max_days, "forecast service listening");
    axum::serve(listener, app(state)).await
}
