use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ApiResponse;

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again later.";

/// Log the error and respond with a generic message that leaks no detail.
pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_ERROR)
}

pub fn error(code: StatusCode, message: &'static str) -> Response {
    (code, Json(ApiResponse::error(message))).into_response()
}
