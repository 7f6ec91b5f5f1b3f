// src/logging_middleware.rs
//! Middleware for logging request and response bodies in debug mode

use axum::body::to_bytes;
use axum::http::{header::CONTENT_LENGTH, HeaderMap};
use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{debug, enabled, Level};

use crate::common::helpers::redact_secrets;

/// Largest body the logger will buffer
const MAX_LOGGED_BODY_BYTES: usize = 64 * 1024;

/// Middleware to log request and response bodies in debug mode.
/// Passwords are blanked and tokens masked before anything is written.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    if !fits_log_buffer(request.headers()) {
        debug!(
            method = %request.method(),
            uri = %request.uri(),
            "📥 Request (body not logged: unknown or oversized length)"
        );
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY_BYTES)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    if let Some(rendered) = render_body(&bytes) {
        debug!(
            method = %parts.method,
            uri = %parts.uri,
            request_body = %rendered,
            "📥 Request"
        );
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(rendered) = render_body(&bytes) {
        debug!(
            status = %parts.status,
            response_body = %rendered,
            "📤 Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

/// Only bodies with a declared length within the buffer limit are read
fn fits_log_buffer(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .map_or(false, |len| len <= MAX_LOGGED_BODY_BYTES)
}

/// Pretty JSON with secrets redacted. Non-JSON bodies are not logged since
/// they could carry credentials we cannot locate.
fn render_body(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let mut json = serde_json::from_slice::<serde_json::Value>(bytes).ok()?;
    redact_secrets(&mut json);
    serde_json::to_string_pretty(&json).ok()
}
