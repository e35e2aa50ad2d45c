use std::future::Future;

use portfolio_models::contact::{
    ContactSubmission, ContactSubmissionOrigin, ContactValidationErrors,
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate a contact form submission and forward it to the site owner.
    ///
    /// The checks run in a fixed order: validation, honeypot, rate limit.
    /// Only a submission passing all of them is dispatched and written to the
    /// audit log.
    fn submit(
        &self,
        submission: ContactSubmission,
        origin: ContactSubmissionOrigin,
    ) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Invalid form data")]
    Validation(#[from] ContactValidationErrors),
    #[error("Spam detected")]
    Spam,
    #[error("Too many attempts")]
    RateLimited,
    #[error("Failed to send the notification email")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        origin: ContactSubmissionOrigin,
        result: Result<(), ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(
                mockall::predicate::eq(submission),
                mockall::predicate::eq(origin),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
