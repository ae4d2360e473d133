//! Response shaping.
//!
//! # Responsibilities
//! - Map `RelayError` to a status code and a JSON `{ "error": ... }` body
//! - Relay upstream JSON bodies without re-encoding them
//! - Render caught panics as a generic 500
//! - Give middleware-produced 408/413 responses the same JSON body
//!
//! # Design Decisions
//! - Internal error details are logged, never returned to the caller
//! - Unmatched routes answer with a bare 404 and no body

use std::any::Any;

use axum::{
    body::{Body, Bytes},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{FieldError, RelayError};

const INTERNAL_MESSAGE: &str = "internal server error";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            RelayError::Validation(errors) => ErrorBody {
                error: "validation failed".to_string(),
                errors,
            },
            RelayError::Internal(detail) => {
                tracing::error!(detail = %detail, "Internal error");
                ErrorBody {
                    error: INTERNAL_MESSAGE.to_string(),
                    errors: Vec::new(),
                }
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(status = status.as_u16(), error = %other, "Lookup failed");
                }
                ErrorBody {
                    error: other.to_string(),
                    errors: Vec::new(),
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

/// A 200 response carrying an upstream JSON body untouched.
pub fn json_passthrough(body: Bytes) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Catch-all for any method or path the relay does not serve.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Rewrite bare timeout and body-limit responses from tower-http layers.
///
/// Responses that already carry JSON came from a handler and pass through.
pub async fn json_layer_errors(response: Response) -> Response {
    let error = match response.status() {
        StatusCode::REQUEST_TIMEOUT => RelayError::RequestTimeout,
        StatusCode::PAYLOAD_TOO_LARGE => RelayError::PayloadTooLarge,
        _ => return response,
    };
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }
    tracing::warn!(status = response.status().as_u16(), "Request rejected by middleware");
    error.into_response()
}

/// `CatchPanicLayer` hook.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");
    RelayError::Internal(detail.to_string()).into_response()
}
