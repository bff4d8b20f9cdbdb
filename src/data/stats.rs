//! Forecast aggregation
//!
//! Computes count/avg/min/max statistics over a forecast series in both
//! temperature units. Pure and deterministic; the dashboard uses it to derive
//! the metric cards from whatever payload it is currently displaying, and the
//! stats endpoint uses it over a fresh generator draw.

use super::{ForecastItem, ForecastStats};

/// Rounds a mean to one decimal place.
fn round_1dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Computes aggregate statistics over a forecast series.
///
/// An empty series yields the all-zero stats object rather than an error.
/// The aggregation runs in a single pass over the items.
pub fn compute_stats(items: &[ForecastItem]) -> ForecastStats {
    let Some(first) = items.first() else {
        return ForecastStats::zero();
    };

    let mut sum_c: i64 = 0;
    let mut sum_f: i64 = 0;
    let mut min_c = first.temperature_c;
    let mut max_c = first.temperature_c;
    let mut min_f = first.temperature_f;
    let mut max_f = first.temperature_f;

    for item in items {
        sum_c += i64::from(item.temperature_c);
        sum_f += i64::from(item.temperature_f);
        min_c = min_c.min(item.temperature_c);
        max_c = max_c.max(item.temperature_c);
        min_f = min_f.min(item.temperature_f);
        max_f = max_f.max(item.temperature_f);
    }

    let count = items.len();
    ForecastStats {
        count,
        avg_c: round_1dp(sum_c as f64 / count as f64),
        min_c,
        max_c,
        avg_f: round_1dp(sum_f as f64 / count as f64),
        min_f,
        max_f,
    }
}
