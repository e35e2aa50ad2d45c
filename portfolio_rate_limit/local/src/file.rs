use std::{
    fs::File,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::{Duration, SystemTime},
};

use anyhow::{anyhow, ensure, Context};
use chrono::{DateTime, Utc};
use portfolio_rate_limit_contracts::RateLimitStore;

use crate::within_window;

/// Keeps one file per key in a directory; the modification time of the file
/// is the time of the last accepted action.
///
/// Check and write happen under a process wide lock. Several processes sharing
/// the same directory are not coordinated.
#[derive(Debug, Clone)]
pub struct FileRateLimitStore {
    directory: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl FileRateLimitStore {
    pub fn new(directory: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory).with_context(|| {
            format!(
                "Failed to create rate limit directory at {}",
                directory.display()
            )
        })?;

        Ok(Self {
            directory: directory.into(),
            lock: Default::default(),
        })
    }

    fn path(&self, key: &str) -> PathBuf {
        let file_name = key
            .chars()
            .map(|c| match c {
                'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
                _ => '_',
            })
            .collect::<String>();
        self.directory.join(file_name)
    }
}

impl RateLimitStore for FileRateLimitStore {
    #[tracing::instrument(skip(self))]
    async fn acquire(
        &self,
        key: &str,
        window: Duration,
        now: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let path = self.path(key);
        let lock = Arc::clone(&self.lock);

        tokio::task::spawn_blocking(move || {
            let _guard = lock
                .lock()
                .map_err(|_| anyhow!("Rate limit directory lock is poisoned"))?;
            acquire_blocking(&path, window, now)
        })
        .await
        .context("Rate limit task failed")?
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let metadata = tokio::fs::metadata(&*self.directory)
            .await
            .context("Failed to access rate limit directory")?;
        ensure!(metadata.is_dir(), "Rate limit path is not a directory");
        Ok(())
    }
}

fn acquire_blocking(path: &Path, window: Duration, now: DateTime<Utc>) -> anyhow::Result<bool> {
    match std::fs::metadata(path) {
        Ok(metadata) => {
            let last = metadata
                .modified()
                .context("Failed to read rate limit record timestamp")?;
            if within_window(last.into(), window, now) {
                return Ok(false);
            }
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(err).context("Failed to read rate limit record"),
    }

    let mut file = File::create(path).context("Failed to create rate limit record")?;
    writeln!(file, "{}", now.timestamp()).context("Failed to write rate limit record")?;
    file.set_modified(SystemTime::from(now))
        .context("Failed to set rate limit record timestamp")?;

    Ok(true)
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
    async fn first_acquire_creates_record() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let sut = FileRateLimitStore::new(dir.path()).unwrap();

        // Act
        let result = sut.acquire("contact_rate_limit:abc", WINDOW, t0()).await;

        // Assert
        assert!(result.unwrap());
        let record = dir.path().join("contact_rate_limit_abc");
        let modified: DateTime<Utc> = std::fs::metadata(&record)
            .unwrap()
            .modified()
            .unwrap()
            .into();
        assert_eq!(modified, t0());
        assert_eq!(
            std::fs::read_to_string(record).unwrap(),
            "1700000000\n"
        );
    }

    #[tokio::test]
    async fn second_acquire_within_window() {
        let dir = tempfile::tempdir().unwrap();
        let sut = FileRateLimitStore::new(dir.path()).unwrap();
        assert!(sut.acquire("foo", WINDOW, t0()).await.unwrap());

        let result = sut
            .acquire("foo", WINDOW, t0() + TimeDelta::seconds(10))
            .await;

        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn acquire_after_window() {
        let dir = tempfile::tempdir().unwrap();
        let sut = FileRateLimitStore::new(dir.path()).unwrap();
        assert!(sut.acquire("foo", WINDOW, t0()).await.unwrap());

        let result = sut
            .acquire("foo", WINDOW, t0() + TimeDelta::seconds(61))
            .await;

        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rate_limit");

        let sut = FileRateLimitStore::new(&path).unwrap();

        assert!(path.is_dir());
        sut.ping().await.unwrap();
    }

    #[tokio::test]
    async fn ping_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sut = FileRateLimitStore::new(dir.path().join("gone")).unwrap();
        std::fs::remove_dir(dir.path().join("gone")).unwrap();

        let result = sut.ping().await;

        assert!(result.is_err());
    }
}
