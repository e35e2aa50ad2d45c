use std::future::Future;

use portfolio_models::contact::ContactSubmission;

/// Client of the contact form endpoint.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactApiService: Send + Sync + 'static {
    /// Post a submission. Any response carrying the JSON result body is
    /// returned as `Ok`, whatever its status code.
    fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<ContactApiResponse>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactApiResponse {
    pub success: bool,
    pub message: String,
    pub errors: Vec<String>,
}

#[cfg(feature = "mock")]
impl MockContactApiService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Option<ContactApiResponse>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| {
                Box::pin(std::future::ready(
                    result.ok_or_else(|| anyhow::anyhow!("connection refused")),
                ))
            });
        self
    }
}
