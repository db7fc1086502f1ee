//! Shared Cache - A process-wide in-memory key-value cache
//!
//! Provides a lazily created, thread-safe cache with per-entry TTL
//! expiration, lazy eviction on access and an optional background sweep.
//!
//! ```
//! fn main() -> shared_cache::Result<()> {
//!     let cache = shared_cache::instance();
//!     cache.put("Test", "Working".into(), 1)?;
//!     assert_eq!(cache.get("Test")?, Some("Working".into()));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod service;
pub mod tasks;

pub use cache::{CacheStats, CacheStore, Ttl};
pub use config::Config;
pub use error::{CacheError, Result};
pub use service::{init, instance, start_sweep};
pub use tasks::spawn_sweep_task;
