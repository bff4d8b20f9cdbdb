//! Core data models for Skycast
//!
//! This module contains the wire-level data types shared by the forecast
//! service and the dashboard client, along with the temperature conversion
//! used everywhere a Fahrenheit value is derived.

pub mod cancel;
pub mod forecast;
pub mod stats;

pub use cancel::FetchCancellation;
pub use forecast::{ForecastClient, ForecastError};
pub use stats::compute_stats;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Temperature unit selector carried on the wire as "c" or "f"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Degrees Celsius
    C,
    /// Degrees Fahrenheit
    F,
}

impl Unit {
    /// Returns the lowercase wire form of the unit
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::C => "c",
            Unit::F => "f",
        }
    }

    /// Toggles between Celsius and Fahrenheit
    pub fn toggled(&self) -> Unit {
        match self {
            Unit::C => Unit::F,
            Unit::F => Unit::C,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a raw unit query value into a `Unit`.
///
/// Absent or blank values default to Celsius. Other values are trimmed and
/// matched case-insensitively against "c" and "f"; anything else is `None`
/// and must be rejected by the caller as a validation failure.
pub fn normalize_unit(raw: Option<&str>) -> Option<Unit> {
    let raw = match raw {
        None => return Some(Unit::C),
        Some(s) => s.trim(),
    };
    if raw.is_empty() {
        return Some(Unit::C);
    }
    match raw.to_ascii_lowercase().as_str() {
        "c" => Some(Unit::C),
        "f" => Some(Unit::F),
        _ => None,
    }
}

/// Derives the Fahrenheit value for a Celsius temperature.
///
/// The divisor is 0.5556, not the exact 9/5 ratio. Changing it would alter
/// every generated Fahrenheit value, so it is kept as-is.
pub fn temperature_f_from_c(temperature_c: i32) -> i32 {
    (32.0 + f64::from(temperature_c) / 0.5556).round() as i32
}

/// A single forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastItem {
    /// Calendar date of the forecast (day granularity, no timezone)
    pub date: NaiveDate,
    /// Temperature in Celsius, within [-20, 54]
    pub temperature_c: i32,
    /// Temperature in Fahrenheit, derived from `temperature_c`
    pub temperature_f: i32,
    /// Optional short condition label
    pub summary: Option<String>,
}

/// A full forecast payload as served by the forecast endpoint
///
/// Items are ordered by date ascending, starting tomorrow. The payload is
/// immutable once produced; the caches hold it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    /// When the payload was generated
    pub generated_at: DateTime<Utc>,
    /// Unit the caller asked for
    pub unit: Unit,
    /// One entry per forecast day
    pub items: Vec<ForecastItem>,
}

/// Aggregated temperature statistics over a forecast series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastStats {
    /// Number of forecast days aggregated
    pub count: usize,
    /// Mean Celsius temperature, rounded to 1 decimal
    pub avg_c: f64,
    /// Lowest Celsius temperature
    pub min_c: i32,
    /// Highest Celsius temperature
    pub max_c: i32,
    /// Mean Fahrenheit temperature, rounded to 1 decimal
    pub avg_f: f64,
    /// Lowest Fahrenheit temperature
    pub min_f: i32,
    /// Highest Fahrenheit temperature
    pub max_f: i32,
}

impl ForecastStats {
    /// All-zero stats, returned for an empty series
    pub fn zero() -> Self {
        Self {
            count: 0,
            avg_c: 0.0,
            min_c: 0,
            max_c: 0,
            avg_f: 0.0,
            min_f: 0,
            max_f: 0,
        }
    }
}

/// Service health report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Always "ok" when the service is able to answer
    pub status: String,
    /// Server time at the moment of the report
    pub time_utc: DateTime<Utc>,
    /// Seconds since the service started
    pub uptime_seconds: i64,
    /// Serving runtime identifier
    pub runtime: String,
}
