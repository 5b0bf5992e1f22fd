//! Key-value store abstraction trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Key-value store Trait
///
/// Each key is a domain name holding a small map of string fields (`siteId`,
/// `landingPageId`). Every method is one logical operation: the implementation acquires its
/// connection, runs the command(s) and releases the connection on every exit path.
///
/// Platform implementation:
/// - `RedisKeyValueStore` (hash commands `HSET` / `HDEL` / `DEL`)
///
/// All failures surface as `CoreError::StorageError`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Upsert `field` on `key`. Idempotent.
    async fn set_field(&self, key: &str, field: &str, value: &str) -> CoreResult<()>;

    /// Remove `field` from `key`. Removing an absent field succeeds.
    async fn delete_field(&self, key: &str, field: &str) -> CoreResult<()>;

    /// Remove `key` with all of its fields. Removing an absent key succeeds.
    async fn delete_record(&self, key: &str) -> CoreResult<()>;
}
