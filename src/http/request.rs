//! Request identification.
//!
//! # Responsibilities
//! - Read the request ID back for logging in handlers and spans
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing (`MakeRequestUuid`)
//! - An inbound `x-request-id` is kept and echoed back unchanged

use axum::http::HeaderMap;

pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID carried in `headers`, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
