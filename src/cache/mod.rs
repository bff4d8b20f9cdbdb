//! Session-scoped response cache
//!
//! This module provides the store the fetch layer keeps successful responses
//! in for the lifetime of one dashboard session. Entries carry a write
//! timestamp and are expired lazily at read time; the store is a latency
//! optimization only, so every read and write failure degrades to a miss.

mod store;

pub use store::{SessionCache, CACHE_KEY_PREFIX};
