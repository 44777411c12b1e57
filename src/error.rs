//! Request error taxonomy and HTTP mapping.
//!
//! Every failure a request can hit is one of these variants; each maps to
//! a status code and a structured JSON body. None of them are fatal to the
//! process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::registration::ValidationError;

/// Delivery diagnostics attached to 500 responses when debug mode is on.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamDebug {
    pub http_code: Option<u16>,
    pub error: Option<String>,
    pub webhook_url: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Too many attempts. Try again in 1 minute.")]
    TooManyRequests { retry_after_secs: u64 },

    #[error("Invalid JSON data")]
    InvalidInput,

    #[error("validation failed")]
    ValidationFailed(Vec<ValidationError>),

    #[error("Failed to process registration. Please try again.")]
    UpstreamFailure { debug: Option<UpstreamDebug> },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::TooManyRequests { retry_after_secs } => json!({
                "error": self.to_string(),
                "retry_after": retry_after_secs,
            }),
            ApiError::ValidationFailed(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                json!({
                    "error": messages.join(", "),
                    "errors": messages,
                })
            }
            ApiError::UpstreamFailure { debug: Some(debug) } => json!({
                "error": self.to_string(),
                "debug": debug,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
