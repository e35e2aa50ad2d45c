use std::time::Duration;

use anyhow::Context;
use bb8_redis::{bb8::Pool, redis, RedisConnectionManager};
use chrono::{DateTime, Utc};
use portfolio_rate_limit_contracts::RateLimitStore;

/// Keeps rate limit records in Valkey.
///
/// Records expire on their own after the window, and `SET NX` makes the check
/// and the write a single atomic operation across all server instances.
#[derive(Debug, Clone)]
pub struct ValkeyRateLimitStore {
    pool: Pool<RedisConnectionManager>,
}

#[derive(Debug)]
pub struct ValkeyRateLimitStoreConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl ValkeyRateLimitStore {
    pub async fn connect(config: &ValkeyRateLimitStoreConfig) -> anyhow::Result<Self> {
        let manager = RedisConnectionManager::new(config.url.as_str())?;
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.min_connections)
            .connection_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .build(manager)
            .await?;

        Ok(Self { pool })
    }
}

impl RateLimitStore for ValkeyRateLimitStore {
    #[tracing::instrument(skip(self))]
    async fn acquire(
        &self,
        key: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let window_ms = u64::try_from(window.as_millis()).context("Rate limit window too large")?;
        if window_ms == 0 {
            return Ok(true);
        }

        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire valkey connection")?;

        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(now.timestamp_millis())
            .arg("NX")
            .arg("PX")
            .arg(window_ms)
            .query_async(&mut *conn)
            .await
            .context("Failed to write rate limit record")?;

        Ok(reply.is_some())
    }

    #[tracing::instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self
            .pool
            .get()
            .await
            .context("Failed to acquire valkey connection")?;

        redis::cmd("PING")
            .exec_async(&mut *conn)
            .await
            .context("Failed to ping valkey")
    }
}
