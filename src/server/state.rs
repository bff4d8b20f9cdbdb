//! Shared state for the forecast service

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::output_cache::OutputCache;

/// Generator bounds for the forecast endpoints
#[derive(Debug, Clone, Copy)]
pub struct ForecastOptions {
    /// Days served when the request omits the parameter
    pub default_days: u16,
    /// Upper clamp for the days parameter
    pub max_days: u16,
}

impl Default for ForecastOptions {
    fn default() -> Self {
        Self {
            default_days: 5,
            max_days: 14,
        }
    }
}

impl ForecastOptions {
    /// Applies the default and clamps the requested day count to
    /// `[1, max_days]`.
    pub fn clamp_days(&self, requested: Option<i64>) -> u16 {
        let max = i64::from(self.max_days).max(1);
        requested
            .unwrap_or(i64::from(self.default_days))
            .clamp(1, max) as u16
    }
}

/// State shared by every request handler
#[derive(Clone)]
pub struct AppState {
    /// When the service started, for uptime reporting
    pub started_at: DateTime<Utc>,
    /// Generator bounds
    pub options: ForecastOptions,
    /// Shared response cache for the forecast-listing endpoint
    pub output_cache: Arc<OutputCache>,
}

impl AppState {
    /// Creates fresh state with an empty output cache
    pub fn new(options: ForecastOptions) -> Self {
        Self {
            started_at: Utc::now(),
            options,
            output_cache: Arc::new(OutputCache::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_days_applies_default() {
        let options = ForecastOptions::default();
        assert_eq!(options.clamp_days(None), 5);
    }

    #[test]
    fn test_clamp_days_bounds() {
        let options = ForecastOptions::default();
        assert_eq!(options.clamp_days(Some(0)), 1);
        assert_eq!(options.clamp_days(Some(-3)), 1);
        assert_eq!(options.clamp_days(Some(14)), 14);
        assert_eq!(options.clamp_days(Some(99)), 14);
        assert_eq!(options.clamp_days(Some(7)), 7);
    }
}
