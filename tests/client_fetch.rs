//! End-to-end tests for the forecast client
//!
//! Runs the real service on an ephemeral port with a request counter in
//! front of it, then drives the client's fetch path: session cache hits and
//! misses, validation failures, status mapping, and both cancellation
//! sources.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use skycast::data::{ForecastClient, ForecastError};
use skycast::server::{self, AppState, ForecastOptions};
use tokio_util::sync::CancellationToken;

async fn count_requests(
    State(counter): State<Arc<AtomicUsize>>,
    request: Request,
    next: Next,
) -> Response {
    counter.fetch_add(1, Ordering::SeqCst);
    next.run(request).await
}

/// Serves the given router on an ephemeral port and returns its address.
async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Spawns the real forecast service wrapped in a request counter.
async fn spawn_service() -> (SocketAddr, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let router = server::app(AppState::new(ForecastOptions::default()))
        .layer(middleware::from_fn_with_state(counter.clone(), count_requests));
    let addr = spawn(router).await;
    (addr, counter)
}

fn client_for(addr: SocketAddr) -> ForecastClient {
    ForecastClient::new(format!("http://{addr}/api"))
}

#[tokio::test]
async fn test_second_identical_fetch_is_served_from_session_cache() {
    let (addr, counter) = spawn_service().await;
    let mut client = client_for(addr);

    let first = client.fetch_forecast(Some(3), Some("f"), None).await.unwrap();
    let second = client.fetch_forecast(Some(3), Some("f"), None).await.unwrap();

    // The second call returns the stored payload and makes no network call.
    assert_eq!(first, second);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(client.cached_entries(), 1);
}

#[tokio::test]
async fn test_differing_unit_uses_an_independent_cache_entry() {
    let (addr, counter) = spawn_service().await;
    let mut client = client_for(addr);

    client.fetch_forecast(Some(3), Some("f"), None).await.unwrap();
    client.fetch_forecast(Some(3), Some("c"), None).await.unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert_eq!(client.cached_entries(), 2);
}

#[tokio::test]
async fn test_defaults_are_seven_days_celsius() {
    let (addr, _) = spawn_service().await;
    let mut client = client_for(addr);

    let response = client.fetch_forecast(None, None, None).await.unwrap();
    assert_eq!(response.items.len(), 7);
    assert_eq!(response.unit.as_str(), "c");
}

#[tokio::test]
async fn test_unit_spelling_variants_share_a_cache_entry() {
    let (addr, counter) = spawn_service().await;
    let mut client = client_for(addr);

    client.fetch_forecast(Some(3), Some("f"), None).await.unwrap();
    client.fetch_forecast(Some(3), Some(" F "), None).await.unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(client.cached_entries(), 1);
}

#[tokio::test]
async fn test_invalid_unit_fails_without_network_or_cache_activity() {
    let (addr, counter) = spawn_service().await;
    let mut client = client_for(addr);

    let result = client.fetch_forecast(Some(3), Some("kelvin"), None).await;
    assert!(matches!(result, Err(ForecastError::ValidationFailed(_))));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(client.cached_entries(), 0);
}

#[tokio::test]
async fn test_server_error_status_is_carried_to_the_caller() {
    async fn fail() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
    let addr = spawn(Router::new().route("/api/weatherforecast", get(fail))).await;
    let mut client = client_for(addr);

    let result = client.fetch_forecast(Some(3), Some("c"), None).await;
    match result {
        Err(ForecastError::RequestFailed { status }) => assert_eq!(status, 500),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    // Failed fetches never populate the cache.
    assert_eq!(client.cached_entries(), 0);
}

async fn hang() -> &'static str {
    tokio::time::sleep(Duration::from_secs(60)).await;
    "too late"
}

#[tokio::test]
async fn test_caller_cancellation_ends_the_fetch() {
    let addr = spawn(Router::new().route("/api/weatherforecast", get(hang))).await;
    let mut client = client_for(addr);

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let result = client.fetch_forecast(Some(3), Some("c"), Some(&token)).await;
    assert!(matches!(result, Err(ForecastError::Cancelled)));
    // A cancelled fetch leaves no pending cache write behind.
    assert_eq!(client.cached_entries(), 0);
}

#[tokio::test]
async fn test_timeout_cancels_without_caller_action() {
    let addr = spawn(Router::new().route("/api/weatherforecast", get(hang))).await;
    let mut client = client_for(addr).with_timeout(Duration::from_millis(100));

    let result = client.fetch_forecast(Some(3), Some("c"), None).await;
    assert!(matches!(result, Err(ForecastError::Cancelled)));
    assert_eq!(client.cached_entries(), 0);
}

#[tokio::test]
async fn test_stats_endpoint_is_fetched_fresh_each_time() {
    let (addr, counter) = spawn_service().await;
    let client = client_for(addr);

    let first = client.fetch_stats(Some(4), None).await.unwrap();
    let second = client.fetch_stats(Some(4), None).await.unwrap();

    assert_eq!(first.count, 4);
    assert_eq!(second.count, 4);
    // Stats are never served from the session cache.
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert_eq!(client.cached_entries(), 0);
}

#[tokio::test]
async fn test_health_roundtrip() {
    let (addr, _) = spawn_service().await;
    let client = client_for(addr);

    let health = client.fetch_health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert!(health.uptime_seconds >= 0);
}

#[tokio::test]
async fn test_two_clients_within_server_window_see_identical_payloads() {
    let (addr, counter) = spawn_service().await;
    let mut first_client = client_for(addr);
    let mut second_client = client_for(addr);

    // Separate session caches, so both hit the network; the server's
    // response cache hands the second client the same stored body.
    let first = first_client.fetch_forecast(Some(3), Some("f"), None).await.unwrap();
    let second = second_client.fetch_forecast(Some(3), Some("f"), None).await.unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert_eq!(first, second);
}
