//! Session cache store keyed by normalized request URL
//!
//! Stores each entry as serialized JSON text (`{ storedAt, data }`) under a
//! fixed key prefix, mirroring how a browser session store would hold the
//! same payloads. Entries live for the process run; there is no eviction
//! sweep, expiry is evaluated when an entry is read.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Namespace prefix applied to every cache key
pub const CACHE_KEY_PREFIX: &str = "skycast.cache.";

/// Wrapper around a cached payload with its write timestamp
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry<T> {
    /// When the entry was written
    stored_at: DateTime<Utc>,
    /// The cached payload
    data: T,
}

/// In-memory store of serialized response entries for one session.
///
/// Owned by the fetch orchestrator rather than living in ambient global
/// state, so tests can hand a client a fresh store and inspect it afterward.
/// Reads never propagate an error: a missing, corrupted or expired entry is
/// indistinguishable from a miss. Writes drop the entry silently if the
/// payload cannot be serialized; callers must not depend on a write landing.
#[derive(Debug, Default)]
pub struct SessionCache {
    entries: HashMap<String, String>,
}

impl SessionCache {
    /// Creates an empty session cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held (fresh or not)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn namespaced(key: &str) -> String {
        format!("{CACHE_KEY_PREFIX}{key}")
    }

    /// Reads an entry, treating anything unreadable or older than `ttl` as
    /// absent.
    pub fn read<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<T> {
        let raw = self.entries.get(&Self::namespaced(key))?;
        let entry: CacheEntry<T> = serde_json::from_str(raw).ok()?;

        let age = Utc::now()
            .signed_duration_since(entry.stored_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        if age > ttl {
            return None;
        }

        Some(entry.data)
    }

    /// Writes an entry stamped with the current time, replacing any previous
    /// entry under the same key. A serialization failure drops the write.
    pub fn write<T: Serialize>(&mut self, key: &str, data: &T) {
        let entry = CacheEntry {
            stored_at: Utc::now(),
            data,
        };
        if let Ok(raw) = serde_json::to_string(&entry) {
            self.entries.insert(Self::namespaced(key), raw);
        }
    }
}
