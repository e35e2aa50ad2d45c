use portfolio_models::contact::ContactSubmission;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ApiResponse {
    pub fn success(message: &'static str) -> Self {
        Self {
            success: true,
            message,
            errors: None,
        }
    }

    pub fn error(message: &'static str) -> Self {
        Self {
            success: false,
            message,
            errors: None,
        }
    }
}

/// Form fields of the contact form. Missing fields are treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Honeypot, hidden from humans.
    pub website: String,
}

impl From<ApiContactSubmission> for ContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
            website: value.website,
        }
    }
}
