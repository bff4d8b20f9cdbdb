//! Endpoint tests for the forecast service
//!
//! Probes the router directly, covering parameter validation, days
//! clamping, the response cache policy on the forecast listing, and the
//! always-fresh stats and health endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Days, Local};
use http_body_util::BodyExt;
use serde_json::Value;
use skycast::data::temperature_f_from_c;
use skycast::server::output_cache::OutputCache;
use skycast::server::{self, AppState, ForecastOptions};
use tower::ServiceExt;

/// Builds the app router plus a handle on its shared output cache.
fn test_app() -> (Router, Arc<OutputCache>) {
    let state = AppState::new(ForecastOptions::default());
    let cache = state.output_cache.clone();
    (server::app(state), cache)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_reports_ok() {
    let (router, _) = test_app();
    let (status, json) = get_json(&router, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["uptimeSeconds"].as_i64().unwrap() >= 0);
    assert!(json["timeUtc"].is_string());
    assert!(json["runtime"].as_str().unwrap().contains("rust"));
}

#[tokio::test]
async fn test_forecast_defaults_to_five_days_celsius() {
    let (router, _) = test_app();
    let (status, json) = get_json(&router, "/api/weatherforecast").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["unit"], "c");
    assert_eq!(json["items"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_forecast_items_are_sequential_and_consistent() {
    let (router, _) = test_app();
    let (_, json) = get_json(&router, "/api/weatherforecast?days=7").await;

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 7);

    let tomorrow = (Local::now().date_naive() + Days::new(1)).to_string();
    assert_eq!(items[0]["date"], tomorrow);

    for item in items {
        let c = item["temperatureC"].as_i64().unwrap() as i32;
        let f = item["temperatureF"].as_i64().unwrap() as i32;
        assert!((-20..=54).contains(&c));
        assert_eq!(f, temperature_f_from_c(c));
        assert!(item["summary"].is_string());
    }
}

#[tokio::test]
async fn test_forecast_days_clamped_at_both_bounds() {
    let (router, _) = test_app();

    let (_, json) = get_json(&router, "/api/weatherforecast?days=99").await;
    assert_eq!(json["items"].as_array().unwrap().len(), 14);

    let (_, json) = get_json(&router, "/api/weatherforecast?days=0").await;
    assert_eq!(json["items"].as_array().unwrap().len(), 1);

    let (_, json) = get_json(&router, "/api/weatherforecast?days=-3").await;
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_forecast_unit_normalized_on_the_wire() {
    let (router, _) = test_app();

    let (status, json) = get_json(&router, "/api/weatherforecast?unit=F").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["unit"], "f");

    // Whitespace around the value is trimmed before matching.
    let (status, json) = get_json(&router, "/api/weatherforecast?unit=%20f%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["unit"], "f");
}

#[tokio::test]
async fn test_invalid_unit_is_rejected_and_never_cached() {
    let (router, cache) = test_app();

    let (status, json) = get_json(&router, "/api/weatherforecast?days=3&unit=kelvin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("unit"));
    assert_eq!(cache.entry_count(), 0);
}

#[tokio::test]
async fn test_repeated_forecast_request_serves_identical_cached_body() {
    let (router, cache) = test_app();

    let (_, first) = get(&router, "/api/weatherforecast?days=3&unit=f").await;
    let (_, second) = get(&router, "/api/weatherforecast?days=3&unit=f").await;

    // Same vary-key values within the window: the stored body verbatim.
    assert_eq!(first, second);
    assert_eq!(cache.entry_count(), 1);
}

#[tokio::test]
async fn test_forecast_cache_varies_on_days_and_unit() {
    let (router, cache) = test_app();

    let (_, f3) = get(&router, "/api/weatherforecast?days=3&unit=f").await;
    let (_, c3) = get(&router, "/api/weatherforecast?days=3&unit=c").await;
    let (_, f4) = get(&router, "/api/weatherforecast?days=4&unit=f").await;

    assert_ne!(f3, c3);
    assert_ne!(f3, f4);
    assert_eq!(cache.entry_count(), 3);
}

#[tokio::test]
async fn test_equivalent_parameter_spellings_share_one_entry() {
    let (router, cache) = test_app();

    // "F" and " f " normalize to the same vary-key value as "f".
    let (_, a) = get(&router, "/api/weatherforecast?days=3&unit=f").await;
    let (_, b) = get(&router, "/api/weatherforecast?days=3&unit=F").await;
    let (_, c) = get(&router, "/api/weatherforecast?unit=%20f%20&days=3").await;

    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(cache.entry_count(), 1);
}

#[tokio::test]
async fn test_stats_endpoint_bypasses_output_cache() {
    let (router, cache) = test_app();

    let (status, json) = get_json(&router, "/api/weatherforecast/stats?days=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 3);
    assert_eq!(cache.entry_count(), 0);

    let (status, _) = get_json(&router, "/api/weatherforecast/stats?days=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cache.entry_count(), 0);
}

#[tokio::test]
async fn test_stats_values_are_internally_consistent() {
    let (router, _) = test_app();
    let (_, json) = get_json(&router, "/api/weatherforecast/stats?days=10").await;

    let avg_c = json["avgC"].as_f64().unwrap();
    let min_c = json["minC"].as_i64().unwrap() as f64;
    let max_c = json["maxC"].as_i64().unwrap() as f64;
    assert!(min_c <= avg_c && avg_c <= max_c);

    let avg_f = json["avgF"].as_f64().unwrap();
    let min_f = json["minF"].as_i64().unwrap() as f64;
    let max_f = json["maxF"].as_i64().unwrap() as f64;
    assert!(min_f <= avg_f && avg_f <= max_f);
}

#[tokio::test]
async fn test_stats_days_clamped_like_forecast() {
    let (router, _) = test_app();

    let (_, json) = get_json(&router, "/api/weatherforecast/stats?days=99").await;
    assert_eq!(json["count"], 14);

    let (_, json) = get_json(&router, "/api/weatherforecast/stats").await;
    assert_eq!(json["count"], 5);
}
