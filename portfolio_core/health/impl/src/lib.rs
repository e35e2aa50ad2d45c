use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use portfolio_core_health_contracts::{HealthFeatureService, HealthStatus};
use portfolio_email_contracts::EmailService;
use portfolio_rate_limit_contracts::RateLimitStore;
use portfolio_shared_contracts::time::TimeService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Time, Email, RateLimit> {
    time: Time,
    email: Email,
    rate_limit: RateLimit,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl<Time, Email, RateLimit> HealthFeatureServiceImpl<Time, Email, RateLimit> {
    pub fn new(
        time: Time,
        email: Email,
        rate_limit: RateLimit,
        config: HealthFeatureConfig,
    ) -> Self {
        Self {
            time,
            email,
            rate_limit,
            config,
            state: Default::default(),
        }
    }
}

impl<Time, Email, RateLimit> HealthFeatureService for HealthFeatureServiceImpl<Time, Email, RateLimit>
where
    Time: TimeService,
    Email: EmailService,
    RateLimit: RateLimitStore,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let is_fresh = |cached: &&CachedStatus| now < cached.timestamp + self.config.cache_ttl;

        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard.as_ref().filter(is_fresh) {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(is_fresh) {
            return cached.status;
        }

        let email = self
            .email
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping smtp server: {err:#}"))
            .is_ok();

        let rate_limit = self
            .rate_limit
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping rate limit store: {err:#}"))
            .is_ok();

        let status = HealthStatus { email, rate_limit };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
