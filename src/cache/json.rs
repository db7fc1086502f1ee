//! Typed JSON access for the default store.
//!
//! The process-wide cache holds `serde_json::Value` payloads so unrelated
//! callers can share it. These helpers convert to and from concrete types.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheStore, Ttl};
use crate::error::Result;

impl CacheStore<Value> {
    /// Serializes `value` and stores it for `ttl_seconds` seconds (0 = forever).
    pub fn put_json<T>(&self, key: impl Into<String>, value: &T, ttl_seconds: i64) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let ttl = Ttl::from_secs(ttl_seconds)?;
        let value = serde_json::to_value(value)?;
        self.put_with_ttl(key, value, ttl)
    }

    /// Looks up `key` and deserializes the payload into `T`.
    ///
    /// A miss is `Ok(None)`. A payload of the wrong shape is a
    /// `Serialization` error.
    pub fn get_json<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let decoded = self.get(key)?.map(serde_json::from_value).transpose()?;
        Ok(decoded)
    }
}
