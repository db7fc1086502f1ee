//! Cache Store Module
//!
//! Main cache engine: a sharded concurrent map with lazy TTL expiration.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats, Ttl};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Thread-safe key-value storage with per-entry TTL.
///
/// A `CacheStore` is a handle: clones share the same entries and statistics.
/// Every operation takes `&self` and locks at most one shard of the map, so
/// callers on different keys rarely contend.
pub struct CacheStore<V = Value> {
    inner: Arc<StoreInner<V>>,
}

struct StoreInner<V> {
    /// Key-value storage
    entries: DashMap<String, CacheEntry<V>>,
    /// Performance statistics
    stats: StatsCounters,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                entries: DashMap::with_capacity(capacity),
                stats: StatsCounters::default(),
            }),
        }
    }

    /// Creates an empty store sized from the configuration.
    pub fn with_config(config: &Config) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    // == Put ==
    /// Stores a value under `key` for `ttl_seconds` seconds.
    ///
    /// A TTL of 0 means the entry never expires. Writing an existing key
    /// replaces its value and restarts its TTL.
    ///
    /// # Errors
    /// `InvalidArgument` if the key is empty or the TTL is negative. The
    /// store is left untouched in that case.
    pub fn put(&self, key: impl Into<String>, value: V, ttl_seconds: i64) -> Result<()> {
        let ttl = Ttl::from_secs(ttl_seconds)?;
        self.put_with_ttl(key, value, ttl)
    }

    /// Stores a value under `key` with an explicit [`Ttl`].
    pub fn put_with_ttl(&self, key: impl Into<String>, value: V, ttl: Ttl) -> Result<()> {
        let key = key.into();
        validate_key(&key)?;

        trace!(key = %key, ?ttl, "cache put");
        self.inner.entries.insert(key, CacheEntry::new(value, ttl));
        Ok(())
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent or expired. An expired entry
    /// is removed before returning.
    ///
    /// # Errors
    /// `InvalidArgument` if the key is empty. Statistics are not touched.
    pub fn get(&self, key: &str) -> Result<Option<V>>
    where
        V: Clone,
    {
        validate_key(key)?;

        let expired = match self.inner.entries.get(key) {
            Some(entry) if entry.is_expired() => true,
            Some(entry) => {
                self.inner.stats.record_hit();
                return Ok(Some(entry.value.clone()));
            }
            None => false,
        };

        if expired {
            self.remove_if_expired(key);
        }
        self.inner.stats.record_miss();
        Ok(None)
    }

    // == Contains ==
    /// Checks whether a live entry exists, without touching statistics.
    ///
    /// An empty key is never stored, so it is reported as absent.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Time To Live ==
    /// Returns the remaining lifetime of a live entry.
    ///
    /// - `None` if the key is absent or expired
    /// - `Some(None)` if the entry never expires
    /// - `Some(Some(remaining))` otherwise
    pub fn ttl_remaining(&self, key: &str) -> Option<Option<Duration>> {
        self.inner
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.ttl_remaining())
    }

    // == Evict ==
    /// Removes an entry. Evicting an absent key is a no-op.
    ///
    /// # Errors
    /// `InvalidArgument` if the key is empty.
    pub fn evict(&self, key: &str) -> Result<()> {
        validate_key(key)?;

        if self.inner.entries.remove(key).is_some() {
            self.inner.stats.record_eviction();
            debug!(key = %key, "cache entry evicted");
        }
        Ok(())
    }

    // == Clear ==
    /// Removes every entry. Statistics are kept.
    pub fn clear(&self) {
        self.inner.entries.clear();
        debug!("cache cleared");
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Expired keys are collected first, then removed one at a time with a
    /// conditional remove, so an entry rewritten in between survives.
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .inner
            .entries
            .iter()
            .filter(|item| item.value().is_expired_at(now))
            .map(|item| item.key().clone())
            .collect();

        let removed = expired_keys
            .iter()
            .filter(|key| {
                self.inner
                    .entries
                    .remove_if(key.as_str(), |_, entry| entry.is_expired())
                    .is_some()
            })
            .count();

        self.inner.stats.record_expirations(removed as u64);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.stats.snapshot(self.len())
    }

    /// Zeroes the hit/miss/removal counters.
    pub fn reset_stats(&self) {
        self.inner.stats.reset();
    }

    // == Length ==
    /// Returns the number of stored entries, including expired entries that
    /// have not been purged yet.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    fn remove_if_expired(&self, key: &str) {
        if self
            .inner
            .entries
            .remove_if(key, |_, entry| entry.is_expired())
            .is_some()
        {
            self.inner.stats.record_expirations(1);
            debug!(key = %key, "expired cache entry removed on access");
        }
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::empty_key());
    }
    Ok(())
}

impl<V> Clone for CacheStore<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for CacheStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("entries", &self.len())
            .finish()
    }
}
