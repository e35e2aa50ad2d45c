use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use portfolio_rate_limit_contracts::RateLimitStore;

use crate::within_window;

/// Keeps rate limit records in a process local map.
///
/// Records that no longer block anything are purged on every call, so the map
/// only ever holds the keys seen during the last window.
#[derive(Debug, Clone, Default)]
pub struct MemoryRateLimitStore {
    records: Arc<Mutex<HashMap<String, DateTime<Utc>>>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    #[tracing::instrument(skip(self))]
    async fn acquire(
        &self,
        key: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow!("Rate limit records lock is poisoned"))?;

        records.retain(|_, last| within_window(*last, window, now));

        if records.contains_key(key) {
            return Ok(false);
        }

        records.insert(key.into(), now);
        Ok(true)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[tokio::test]
    async fn first_acquire() {
        let sut = MemoryRateLimitStore::new();

        let result = sut.acquire("foo", WINDOW, t0()).await;

        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn second_acquire_within_window() {
        let sut = MemoryRateLimitStore::new();
        assert!(sut.acquire("foo", WINDOW, t0()).await.unwrap());

        let result = sut
            .acquire("foo", WINDOW, t0() + TimeDelta::seconds(30))
            .await;

        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn rejected_acquire_does_not_extend_window() {
        let sut = MemoryRateLimitStore::new();
        assert!(sut.acquire("foo", WINDOW, t0()).await.unwrap());
        assert!(!sut
            .acquire("foo", WINDOW, t0() + TimeDelta::seconds(59))
            .await
            .unwrap());

        let result = sut
            .acquire("foo", WINDOW, t0() + TimeDelta::seconds(60))
            .await;

        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let sut = MemoryRateLimitStore::new();
        assert!(sut.acquire("foo", WINDOW, t0()).await.unwrap());

        let result = sut.acquire("bar", WINDOW, t0()).await;

        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn purges_stale_records() {
        let sut = MemoryRateLimitStore::new();
        assert!(sut.acquire("foo", WINDOW, t0()).await.unwrap());
        assert!(sut.acquire("bar", WINDOW, t0()).await.unwrap());

        sut.acquire("baz", WINDOW, t0() + TimeDelta::minutes(5))
            .await
            .unwrap();

        let records = sut.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("baz"));
    }

    #[tokio::test]
    async fn concurrent_acquire() {
        let sut = MemoryRateLimitStore::new();

        let results = acquire_concurrently(&sut).await;

        assert_eq!(results.iter().filter(|&&ok| ok).count(), 1);
    }

    async fn acquire_concurrently(sut: &MemoryRateLimitStore) -> Vec<bool> {
        let tasks = (0..8)
            .map(|_| {
                let sut = sut.clone();
                tokio::spawn(async move { sut.acquire("foo", WINDOW, t0()).await.unwrap() })
            })
            .collect::<Vec<_>>();

        let mut results = Vec::new();
        for task in tasks {
            results.push(task.await.unwrap());
        }
        results
    }
}
