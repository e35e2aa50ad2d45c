use std::sync::Arc;

use anyhow::Context;
use portfolio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use portfolio_models::contact::ContactSubmission;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct ContactApiServiceImpl {
    client: HttpClient,
    endpoint: Arc<Url>,
}

impl ContactApiServiceImpl {
    pub fn new(client: HttpClient, endpoint: Url) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl ContactApiService for ContactApiServiceImpl {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn submit(&self, submission: &ContactSubmission) -> anyhow::Result<ContactApiResponse> {
        let response = self
            .client
            .post((*self.endpoint).clone())
            .form(&ContactRequest {
                name: &submission.name,
                email: &submission.email,
                subject: &submission.subject,
                message: &submission.message,
                website: &submission.website,
            })
            .send()
            .await
            .context("Failed to send contact request")?;

        let status = response.status();
        tracing::debug!(%status, "received contact response");

        response
            .json::<ContactResponse>()
            .await
            .map(Into::into)
            .with_context(|| format!("Failed to parse contact response (status {status})"))
    }
}

#[derive(Serialize)]
struct ContactRequest<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    website: &'a str,
}

#[derive(Deserialize)]
struct ContactResponse {
    success: bool,
    message: String,
    #[serde(default)]
    errors: Vec<String>,
}

impl From<ContactResponse> for ContactApiResponse {
    fn from(value: ContactResponse) -> Self {
        Self {
            success: value.success,
            message: value.message,
            errors: value.errors,
        }
    }
}
