use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};

/// Storage for fixed-window rate limit records, keyed by an opaque string.
///
/// A record holds the time of the last accepted action for its key.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait RateLimitStore: Send + Sync + 'static {
    /// Atomically checks and records an action for `key`.
    ///
    /// Returns `true` and stores `now` as the new record if there is no record
    /// younger than `window`. Otherwise returns `false` and leaves the existing
    /// record untouched.
    fn acquire(
        &self,
        key: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Verify that the store is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockRateLimitStore {
    pub fn with_acquire(
        mut self,
        key: String,
        window: Duration,
        now: DateTime<Utc>,
        result: bool,
    ) -> Self {
        self.expect_acquire()
            .once()
            .with(
                mockall::predicate::eq(key),
                mockall::predicate::eq(window),
                mockall::predicate::eq(now),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_ping(mut self, result: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if result {
                Ok(())
            } else {
                Err(anyhow::anyhow!("rate limit store unreachable"))
            }))
        });
        self
    }
}
