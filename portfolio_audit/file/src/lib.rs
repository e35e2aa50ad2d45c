use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use portfolio_audit_contracts::AuditLogService;
use portfolio_models::audit::AuditLogEntry;
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};

/// Appends audit entries to a plain text file, creating it if necessary.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Default::default(),
        }
    }
}

impl AuditLogService for FileAuditLog {
    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    async fn append(&self, entry: &AuditLogEntry) -> anyhow::Result<()> {
        let line = format!("{entry}\n");

        let _guard = self.lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&*self.path)
            .await
            .with_context(|| format!("Failed to open audit log at {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .await
            .context("Failed to write audit log entry")?;
        file.flush().await.context("Failed to flush audit log")?;

        Ok(())
    }
}
