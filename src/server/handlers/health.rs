//! Health handler

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::instrument;

use crate::data::HealthReport;
use crate::server::state::AppState;

#[instrument(skip(state), name = "api_health")]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthReport> {
    let now = Utc::now();
    Json(HealthReport {
        status: "ok".to_string(),
        time_utc: now,
        uptime_seconds: now.signed_duration_since(state.started_at).num_seconds(),
        runtime: concat!("rust/skycast ", env!("CARGO_PKG_VERSION")).to_string(),
    })
}
