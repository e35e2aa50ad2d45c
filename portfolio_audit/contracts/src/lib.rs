use std::future::Future;

use portfolio_models::audit::AuditLogEntry;

/// Append-only log of contact submissions that reached the dispatch step.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait AuditLogService: Send + Sync + 'static {
    /// Append one entry as a single line.
    fn append(&self, entry: &AuditLogEntry) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockAuditLogService {
    pub fn with_append(mut self, entry: AuditLogEntry, result: bool) -> Self {
        self.expect_append()
            .once()
            .with(mockall::predicate::eq(entry))
            .return_once(move |_| {
                Box::pin(std::future::ready(if result {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("audit log is not writable"))
                }))
            });
        self
    }
}
