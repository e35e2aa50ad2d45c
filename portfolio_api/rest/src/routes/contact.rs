use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header::ALLOW, StatusCode},
    response::{IntoResponse, Response},
    routing, Extension, Form, Json, Router,
};
use portfolio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use portfolio_models::contact::ContactSubmissionOrigin;
use tracing::debug;

use crate::{
    errors::{error, internal_server_error},
    extractors::user_agent::UserAgent,
    middlewares::client_ip::ClientIp,
    models::{ApiContactSubmission, ApiResponse},
};

pub const SUCCESS: &str = "Message sent successfully! I will get back to you soon.";
pub const INVALID_FORM_DATA: &str = "Invalid form data";
pub const SPAM_DETECTED: &str = "Spam detected";
pub const TOO_MANY_ATTEMPTS: &str =
    "Too many attempts. Please wait a minute before sending another message.";
pub const SEND_FAILED: &str =
    "Failed to send the message. Please try again later or contact me directly by email.";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(
            "/contact",
            routing::post(submit).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Extension(ClientIp(client_ip)): Extension<ClientIp>,
    UserAgent(user_agent): UserAgent,
    form: Result<Form<ApiContactSubmission>, FormRejection>,
) -> Response {
    let Form(submission) = match form {
        Ok(form) => form,
        Err(rejection) => {
            debug!(%rejection, "rejected malformed contact form");
            return error(StatusCode::BAD_REQUEST, INVALID_FORM_DATA);
        }
    };

    let origin = ContactSubmissionOrigin {
        client_ip,
        user_agent,
    };

    match service.submit(submission.into(), origin).await {
        Ok(()) => Json(ApiResponse::success(SUCCESS)).into_response(),
        Err(ContactSubmitError::Validation(errors)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse {
                errors: Some(errors.messages()),
                ..ApiResponse::error(INVALID_FORM_DATA)
            }),
        )
            .into_response(),
        Err(ContactSubmitError::Spam) => error(StatusCode::BAD_REQUEST, SPAM_DETECTED),
        Err(ContactSubmitError::RateLimited) => {
            error(StatusCode::TOO_MANY_REQUESTS, TOO_MANY_ATTEMPTS)
        }
        Err(ContactSubmitError::Send) => error(StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED),
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}

async fn method_not_allowed() -> Response {
    (
        [(ALLOW, "POST")],
        error(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED),
    )
        .into_response()
}
