//! Cache Entry Module
//!
//! Defines individual cache entries and their time-to-live policy.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::error::{CacheError, Result};

// == Ttl ==
/// Expiration policy of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// The entry lives until it is overwritten, evicted or cleared
    Never,
    /// The entry expires this long after insertion
    After(Duration),
}

impl Ttl {
    /// Builds a TTL from a seconds count.
    ///
    /// `0` means the entry never expires. Negative values are rejected.
    pub fn from_secs(ttl_seconds: i64) -> Result<Self> {
        match ttl_seconds {
            n if n < 0 => Err(CacheError::negative_ttl(n)),
            0 => Ok(Ttl::Never),
            n => Ok(Ttl::After(Duration::from_secs(n as u64))),
        }
    }

    /// Builds a TTL from a duration. A zero duration never expires.
    pub fn after(duration: Duration) -> Self {
        if duration.is_zero() {
            Ttl::Never
        } else {
            Ttl::After(duration)
        }
    }

    /// Deadline for an entry inserted at `start`.
    ///
    /// Returns `None` for `Never`, and also when the deadline is beyond what
    /// the monotonic clock can represent.
    fn deadline_from(self, start: Instant) -> Option<Instant> {
        match self {
            Ttl::Never => None,
            Ttl::After(duration) => start.checked_add(duration),
        }
    }
}

// == Cache Entry ==
/// A single cache entry with its value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Wall-clock creation time
    pub inserted_at: DateTime<Utc>,
    /// Expiration policy the entry was written with
    pub ttl: Ttl,
    /// Monotonic expiration deadline, None = no expiration
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: V, ttl: Ttl) -> Self {
        Self {
            value,
            inserted_at: Utc::now(),
            ttl,
            expires_at: ttl.deadline_from(Instant::now()),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its deadline, so it is gone as soon as the TTL has fully elapsed.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, or None if the entry never expires.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}
