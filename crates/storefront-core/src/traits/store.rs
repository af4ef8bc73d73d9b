//! Key-value store trait with per-entry expiry.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for durable string key-value backends (file jar, in-memory).
///
/// Every entry carries its own TTL. Once the TTL has elapsed the entry
/// behaves exactly as if it had been removed. The trait is defined here in
/// `storefront-core` and implemented in `storefront-cache`.
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend name (e.g., "file", "memory").
    fn backend(&self) -> &'static str;

    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value that expires after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Remove several keys in one operation.
    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }
}
