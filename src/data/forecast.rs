//! Forecast API client
//!
//! This module provides the fetch orchestrator for the forecast service: it
//! normalizes request URLs, consults the session cache, performs the network
//! call under a composed cancellation signal and writes successful payloads
//! back through the cache.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::cancel::{FetchCancellation, DEFAULT_FETCH_TIMEOUT};
use super::{normalize_unit, ForecastResponse, ForecastStats, HealthReport, Unit};
use crate::cache::SessionCache;

/// Days requested when the caller does not specify a count
pub const DEFAULT_DAYS: u16 = 7;

/// Freshness window for cached forecast responses, matching the server's
/// advertised window so both sides agree on staleness
pub const FORECAST_CACHE_TTL: Duration = Duration::from_millis(20_000);

const FORECAST_PATH: &str = "/weatherforecast";
const STATS_PATH: &str = "/weatherforecast/stats";
const HEALTH_PATH: &str = "/health";

/// Errors surfaced by the fetch orchestrator.
///
/// This is the complete reportable taxonomy: every failure of the fetch path
/// is translated into exactly one of these three kinds. Cache faults never
/// appear here; they degrade to cache misses.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// A query parameter was malformed; reported before any network call
    #[error("unit must be 'c' or 'f' (got '{0}')")]
    ValidationFailed(String),

    /// The transport answered with a non-success status, or failed before
    /// producing one (status 0)
    #[error("request failed with status {status}")]
    RequestFailed { status: u16 },

    /// The caller cancelled or the fetch deadline elapsed
    #[error("request was cancelled")]
    Cancelled,
}

impl ForecastError {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ForecastError::Cancelled;
        }
        // Status 0 marks a transport-level failure with no HTTP status,
        // including an unparseable success body.
        ForecastError::RequestFailed {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
        }
    }
}

/// Joins a base URL and an endpoint path without doubling or dropping the
/// separating slash.
fn join_url(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Builds a normalized request URL with query parameters in stable sorted
/// order, so that two logically identical requests always produce the same
/// string (and therefore the same cache key).
fn build_url(base: &str, path: &str, params: &[(&str, String)]) -> String {
    let mut params: Vec<_> = params.to_vec();
    params.sort_by(|a, b| a.0.cmp(b.0));

    let query = params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let url = join_url(base, path);
    if query.is_empty() {
        url
    } else {
        format!("{url}?{query}")
    }
}

/// Client for the forecast service.
///
/// Owns the session cache for forecast payloads. Concurrent identical
/// requests are not deduplicated: two simultaneous misses each perform their
/// own network call and the second write wins.
#[derive(Debug)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
    cache: SessionCache,
    timeout: Duration,
}

impl ForecastClient {
    /// Creates a client for the service at `base_url` (e.g.
    /// `http://127.0.0.1:5170/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            cache: SessionCache::new(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Replaces the fetch deadline; mainly useful in tests
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the underlying HTTP client
    #[allow(dead_code)]
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Number of entries currently held in the session cache
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Fetches a forecast, preferring a fresh cached payload.
    ///
    /// `days` defaults to 7; `unit` defaults to "c" and is normalized
    /// (trimmed, case-insensitive) before use. An unrecognized value fails
    /// with [`ForecastError::ValidationFailed`] before any network activity.
    /// A cache hit returns the stored payload without a network call; a miss
    /// performs one GET under the composed cancellation signal and writes the
    /// parsed payload back on success.
    pub async fn fetch_forecast(
        &mut self,
        days: Option<u16>,
        unit: Option<&str>,
        cancel: Option<&CancellationToken>,
    ) -> Result<ForecastResponse, ForecastError> {
        let unit = normalize_unit(unit)
            .ok_or_else(|| ForecastError::ValidationFailed(unit.unwrap_or_default().to_string()))?;
        let days = days.unwrap_or(DEFAULT_DAYS);

        let url = self.forecast_url(days, unit);
        if let Some(cached) = self.cache.read::<ForecastResponse>(&url, FORECAST_CACHE_TTL) {
            debug!(%url, "forecast served from session cache");
            return Ok(cached);
        }

        let response: ForecastResponse = self.get_json(&url, cancel).await?;
        self.cache.write(&url, &response);
        Ok(response)
    }

    /// Fetches server-side statistics over a fresh generator draw.
    ///
    /// Never cached: the stats endpoint is an independent randomness draw,
    /// so a stored copy would misrepresent it.
    pub async fn fetch_stats(
        &self,
        days: Option<u16>,
        cancel: Option<&CancellationToken>,
    ) -> Result<ForecastStats, ForecastError> {
        let days = days.unwrap_or(DEFAULT_DAYS);
        let url = build_url(
            &self.base_url,
            STATS_PATH,
            &[("days", days.to_string())],
        );
        self.get_json(&url, cancel).await
    }

    /// Fetches the service health report. Never cached.
    pub async fn fetch_health(&self) -> Result<HealthReport, ForecastError> {
        let url = join_url(&self.base_url, HEALTH_PATH);
        self.get_json(&url, None).await
    }

    /// Normalized forecast URL for the given parameters; doubles as the
    /// cache key (the store adds its namespace prefix).
    fn forecast_url(&self, days: u16, unit: Unit) -> String {
        build_url(
            &self.base_url,
            FORECAST_PATH,
            &[
                ("days", days.to_string()),
                ("unit", unit.as_str().to_string()),
            ],
        )
    }

    /// Performs one GET and parses the JSON body, racing the composed
    /// cancellation signal. Cancelling drops the request future before any
    /// caller-visible state is touched.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<T, ForecastError> {
        let cancellation = FetchCancellation::new(cancel, self.timeout);

        let request = async {
            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(ForecastError::from_transport)?;

            let status = response.status();
            if !status.is_success() {
                return Err(ForecastError::RequestFailed {
                    status: status.as_u16(),
                });
            }

            response
                .json::<T>()
                .await
                .map_err(ForecastError::from_transport)
        };

        tokio::select! {
            _ = cancellation.cancelled() => {
                debug!(%url, "fetch cancelled");
                Err(ForecastError::Cancelled)
            }
            result = request => result,
        }
    }
}
