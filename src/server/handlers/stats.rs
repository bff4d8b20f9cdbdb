//! Forecast statistics handler
//!
//! Aggregates a fresh generator draw. Deliberately outside the response
//! cache policy: stats and a contemporaneous forecast request are
//! independent draws, never a shared cache entry.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::data::{compute_stats, ForecastStats};
use crate::server::generate::generate_items;
use crate::server::state::AppState;

/// Query parameters accepted by the stats endpoint
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Requested day count; clamped server-side
    pub days: Option<i64>,
}

#[instrument(skip(state), name = "api_get_forecast_stats")]
pub async fn get_forecast_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Json<ForecastStats> {
    let days = state.options.clamp_days(params.days);
    let items = generate_items(days);
    let stats = compute_stats(&items);

    debug!(days, count = stats.count, "forecast stats computed");
    Json(stats)
}
