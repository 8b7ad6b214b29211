//! Redis / KeyDB cache store using `fred`.
//!
//! Every operation is a single command (`SET .. EX`, `GET`, `DEL`, `TTL`),
//! so there is nothing to keep atomic on our side. Reconnection is the
//! pool's job: it is built with an exponential reconnect policy and a
//! failed command surfaces as [`StoreError::Unavailable`] instead of
//! hanging the caller.

use std::time::Duration;

use fred::clients::Pool;
use fred::interfaces::{ClientLike, KeysInterface};
use fred::types::config::{Config, ReconnectPolicy};
use fred::types::{Builder, Expiration};

use crate::{CacheStore, StoreError};

/// A [`CacheStore`] backed by a `fred` connection pool.
#[derive(Clone)]
pub struct RedisCacheStore {
    pool: Pool,
}

impl RedisCacheStore {
    /// Wraps an already-initialized pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Connects to `url` (`redis://host:port/db`) with a pool of
    /// `pool_size` connections and verifies the connection with a PING.
    pub async fn connect(url: &str, pool_size: usize) -> Result<Self, StoreError> {
        let config = Config::from_url(url).map_err(unavailable)?;

        let mut builder = Builder::from_config(config);
        // Exponential reconnect: initial 0ms, base 100ms, max 30s, factor 2.
        builder.set_policy(ReconnectPolicy::new_exponential(0, 100, 30_000, 2));

        let pool = builder.build_pool(pool_size).map_err(unavailable)?;
        pool.init().await.map_err(unavailable)?;
        let _: String = pool.ping(None).await.map_err(unavailable)?;

        tracing::info!(pool_size, "redis cache store connected");
        Ok(Self { pool })
    }
}

impl CacheStore for RedisCacheStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let secs = ttl.as_secs();
        if secs == 0 {
            return Err(StoreError::InvalidTtl);
        }
        let expire = i64::try_from(secs).map_err(|_| StoreError::InvalidTtl)?;

        let _: () = self
            .pool
            .set(key, value, Some(Expiration::EX(expire)), None, false)
            .await
            .map_err(unavailable)?;
        tracing::trace!(key, ttl_secs = secs, "cache set");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.pool.get(key).await.map_err(unavailable)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let removed: i64 = self.pool.del(key).await.map_err(unavailable)?;
        Ok(removed > 0)
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, StoreError> {
        // TTL replies -2 for a missing key and -1 for a key without expiry.
        let secs: i64 = self.pool.ttl(key).await.map_err(unavailable)?;
        Ok(u64::try_from(secs).ok().map(Duration::from_secs))
    }
}

fn unavailable(err: fred::error::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}
