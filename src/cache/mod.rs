//! Cache Module
//!
//! Provides in-memory caching with TTL expiration.

mod entry;
mod json;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, Ttl};
pub use stats::CacheStats;
pub use store::CacheStore;
