//! The registration request handler.
//!
//! One request walks: method check → rate-limit admission → JSON parse →
//! sanitize → validate → payload assembly → webhook delivery → response.
//! Every early exit maps to an `ApiError` variant; the happy path ends in
//! the success body.

use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, State},
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{ApiError, UpstreamDebug};
use crate::http::server::AppState;
use crate::http::session::{format_set_cookie, resolve_session, SessionToken};
use crate::observability::metrics;
use crate::registration::{validate, RawSubmission, Submission, WebhookPayload};
use crate::security::Admission;

/// Form submissions are tiny; anything larger is not a form.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Entry point for every request on the registration route.
pub async fn register_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    // CORS preflight: empty 200, headers come from the middleware layers.
    if request.method() == Method::OPTIONS {
        metrics::record_request(StatusCode::OK.as_u16());
        return StatusCode::OK.into_response();
    }

    let token = resolve_session(request.headers());

    let response = match process(&state, addr, &token, request).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(error) => error.into_response(),
    };

    metrics::record_request(response.status().as_u16());
    attach_session(response, &token)
}

async fn process(
    state: &AppState,
    addr: SocketAddr,
    token: &SessionToken,
    request: Request<Body>,
) -> Result<serde_json::Value, ApiError> {
    if request.method() != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    match state.limiter.admit(&token.value) {
        Admission::Rejected { retry_after_secs } => {
            tracing::warn!(
                session = %token.value,
                retry_after_secs,
                "Rate limit exceeded"
            );
            metrics::record_rate_limited();
            return Err(ApiError::TooManyRequests { retry_after_secs });
        }
        Admission::Allowed => {}
    }

    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let bytes = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| ApiError::InvalidInput)?;
    let raw: RawSubmission =
        serde_json::from_slice(&bytes).map_err(|_| ApiError::InvalidInput)?;

    let submission = Submission::sanitize(raw);
    let errors = validate(&submission, &state.config.validation);
    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "Submission failed validation");
        return Err(ApiError::ValidationFailed(errors));
    }

    let payload = WebhookPayload::new(submission, Some(addr.ip().to_string()), user_agent);
    let outcome = state.webhook.deliver(&payload).await;

    if outcome.is_success() {
        tracing::info!("Registration forwarded to webhook");
        Ok(json!({
            "success": true,
            "message": "Registration received successfully",
        }))
    } else {
        tracing::error!(
            status = ?outcome.status,
            error = ?outcome.error,
            "Webhook did not accept registration"
        );
        metrics::record_webhook_failure();

        let debug = state.config.debug_mode.then(|| UpstreamDebug {
            http_code: outcome.status,
            error: outcome.error,
            webhook_url: state.config.webhook.url.clone(),
        });
        Err(ApiError::UpstreamFailure { debug })
    }
}

/// Attach the Set-Cookie header when this request minted the token.
fn attach_session(mut response: Response, token: &SessionToken) -> Response {
    if token.is_new {
        response
            .headers_mut()
            .insert(header::SET_COOKIE, format_set_cookie(token));
    }
    response
}
