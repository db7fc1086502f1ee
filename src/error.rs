//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// A lookup miss is never an error; `get` returns `None` for absent or
/// expired keys.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Empty key or negative TTL. The operation had no effect.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A JSON payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    pub(crate) fn empty_key() -> Self {
        CacheError::InvalidArgument("Key cannot be empty".to_string())
    }

    pub(crate) fn negative_ttl(ttl_seconds: i64) -> Self {
        CacheError::InvalidArgument(format!(
            "TTL must be non-negative, got {}",
            ttl_seconds
        ))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
