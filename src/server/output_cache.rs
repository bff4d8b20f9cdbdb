//! Response-caching policy for the serving boundary
//!
//! A declarative policy (expiry window plus vary-key list) paired with a
//! shared store of rendered response bodies. The forecast-listing handler is
//! the only consumer; health and stats are always computed fresh.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Declarative response-cache rule for one endpoint.
///
/// Two requests agreeing on every vary key share one cached response within
/// the expiry window; differing in any vary key caches independently.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// How long a stored response stays servable
    pub ttl: Duration,
    /// Query parameters the cache key varies on, in declared order
    pub vary_keys: &'static [&'static str],
}

/// Policy applied to the forecast-listing endpoint: 20 second window,
/// varying on days and unit.
pub const FORECAST_POLICY: CachePolicy = CachePolicy {
    ttl: Duration::from_secs(20),
    vary_keys: &["days", "unit"],
};

impl CachePolicy {
    /// Builds the cache key from normalized vary values, given in the same
    /// order as `vary_keys`.
    pub fn cache_key(&self, values: &[&str]) -> String {
        debug_assert_eq!(values.len(), self.vary_keys.len());
        self.vary_keys
            .iter()
            .zip(values)
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[derive(Debug)]
struct StoredResponse {
    stored_at: DateTime<Utc>,
    body: String,
}

/// Shared store of rendered JSON bodies keyed by vary-key string.
///
/// Read-through/write-through with expiry evaluated at read time. The lock
/// covers single key operations only; a race to populate the same key
/// resolves last-writer-wins, which is acceptable for identical payload
/// shapes.
#[derive(Debug, Default)]
pub struct OutputCache {
    entries: Mutex<HashMap<String, StoredResponse>>,
}

impl OutputCache {
    /// Creates an empty output cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored body for `key` if it is younger than `ttl`.
    pub fn read(&self, key: &str, ttl: Duration) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        let stored = entries.get(key)?;

        let age = Utc::now()
            .signed_duration_since(stored.stored_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        if age > ttl {
            return None;
        }

        Some(stored.body.clone())
    }

    /// Stores a rendered body under `key`, stamped with the current time.
    pub fn write(&self, key: &str, body: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                StoredResponse {
                    stored_at: Utc::now(),
                    body,
                },
            );
        }
    }

    /// Number of stored responses, fresh or not
    pub fn entry_count(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}
