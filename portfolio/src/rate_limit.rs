use std::time::Duration;

use chrono::{DateTime, Utc};
use portfolio_config::RateLimitConfig;
use portfolio_rate_limit_contracts::RateLimitStore;
use portfolio_rate_limit_local::{FileRateLimitStore, MemoryRateLimitStore};
use portfolio_rate_limit_valkey::{ValkeyRateLimitStore, ValkeyRateLimitStoreConfig};

/// The rate limit store selected in the config.
#[derive(Debug, Clone)]
pub enum RateLimitBackend {
    Memory(MemoryRateLimitStore),
    File(FileRateLimitStore),
    Valkey(ValkeyRateLimitStore),
}

/// Open the configured rate limit store
pub async fn connect(config: &RateLimitConfig) -> anyhow::Result<RateLimitBackend> {
    Ok(match config {
        RateLimitConfig::Memory => RateLimitBackend::Memory(MemoryRateLimitStore::new()),
        RateLimitConfig::File { directory } => {
            RateLimitBackend::File(FileRateLimitStore::new(directory)?)
        }
        RateLimitConfig::Valkey(config) => {
            let store = ValkeyRateLimitStore::connect(&ValkeyRateLimitStoreConfig {
                url: config.url.clone(),
                max_connections: config.max_connections,
                min_connections: config.min_connections,
                acquire_timeout: config.acquire_timeout.into(),
                idle_timeout: config.idle_timeout.map(Into::into),
                max_lifetime: config.max_lifetime.map(Into::into),
            })
            .await?;
            RateLimitBackend::Valkey(store)
        }
    })
}

impl RateLimitStore for RateLimitBackend {
    async fn acquire(
        &self,
        key: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        match self {
            Self::Memory(store) => store.acquire(key, window, now).await,
            Self::File(store) => store.acquire(key, window, now).await,
            Self::Valkey(store) => store.acquire(key, window, now).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Memory(store) => store.ping().await,
            Self::File(store) => store.ping().await,
            Self::Valkey(store) => store.ping().await,
        }
    }
}
