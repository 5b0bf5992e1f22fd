//! Redis-backed routing store

use std::time::Duration;

use async_trait::async_trait;
use custom_domain_core::error::{CoreError, CoreResult};
use custom_domain_core::traits::KeyValueStore;
use redis::aio::MultiplexedConnection;

/// Routing store on Redis hashes.
///
/// Every call opens its own connection under `timeout` and drops it before returning.
pub struct RedisKeyValueStore {
    client: redis::Client,
    timeout: Duration,
}

impl RedisKeyValueStore {
    /// Validate `url` and build the store. No connection is made here.
    pub fn new(url: &str, timeout: Duration) -> CoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CoreError::StorageError(format!("Invalid Redis URL: {e}")))?;
        Ok(Self { client, timeout })
    }

    async fn connect(&self) -> CoreResult<MultiplexedConnection> {
        tokio::time::timeout(self.timeout, self.client.get_multiplexed_async_connection())
            .await
            .map_err(|_| CoreError::StorageError("Redis connection timed out".to_string()))?
            .map_err(|e| CoreError::StorageError(format!("Redis connection failed: {e}")))
    }

    async fn run(&self, label: &str, cmd: redis::Cmd) -> CoreResult<()> {
        let mut conn = self.connect().await?;
        let result: Result<(), redis::RedisError> =
            tokio::time::timeout(self.timeout, cmd.query_async(&mut conn))
                .await
                .map_err(|_| CoreError::StorageError(format!("Redis {label} timed out")))?;
        result.map_err(|e| {
            log::warn!("Redis {label} failed: {e}");
            CoreError::StorageError(format!("Redis {label} failed: {e}"))
        })
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn set_field(&self, key: &str, field: &str, value: &str) -> CoreResult<()> {
        log::debug!("HSET {key} {field}");
        let mut cmd = redis::cmd("HSET");
        cmd.arg(key).arg(field).arg(value);
        self.run("HSET", cmd).await
    }

    async fn delete_field(&self, key: &str, field: &str) -> CoreResult<()> {
        log::debug!("HDEL {key} {field}");
        let mut cmd = redis::cmd("HDEL");
        cmd.arg(key).arg(field);
        self.run("HDEL", cmd).await
    }

    async fn delete_record(&self, key: &str) -> CoreResult<()> {
        log::debug!("DEL {key}");
        let mut cmd = redis::cmd("DEL");
        cmd.arg(key);
        self.run("DEL", cmd).await
    }
}
