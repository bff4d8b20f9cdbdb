//! Forecast-listing handler
//!
//! The only handler subject to the response cache policy. Parameter
//! validation runs before the cache lookup, so an invalid request is
//! rejected without touching the cache or the generator, and is never
//! stored.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::data::{normalize_unit, ForecastResponse};
use crate::server::errors::ApiError;
use crate::server::generate::generate_items;
use crate::server::output_cache::FORECAST_POLICY;
use crate::server::state::AppState;

/// Query parameters accepted by the forecast endpoint
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Requested day count; clamped server-side
    pub days: Option<i64>,
    /// Requested unit; "c" or "f", case-insensitive
    pub unit: Option<String>,
}

fn json_body(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

#[instrument(skip(state), name = "api_get_forecast")]
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastQuery>,
) -> Result<Response, ApiError> {
    let unit = normalize_unit(params.unit.as_deref())
        .ok_or_else(|| ApiError::InvalidUnit(params.unit.clone().unwrap_or_default()))?;
    let days = state.options.clamp_days(params.days);

    let key = FORECAST_POLICY.cache_key(&[&days.to_string(), unit.as_str()]);
    if let Some(body) = state.output_cache.read(&key, FORECAST_POLICY.ttl) {
        debug!(%key, "forecast served from output cache");
        return Ok(json_body(body));
    }

    let response = ForecastResponse {
        generated_at: Utc::now(),
        unit,
        items: generate_items(days),
    };
    let body = serde_json::to_string(&response)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    state.output_cache.write(&key, body.clone());
    debug!(%key, days, %unit, "forecast generated and cached");
    Ok(json_body(body))
}
