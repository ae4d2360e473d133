//! Relay error taxonomy.

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::lookup::Jurisdiction;

/// A rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while relaying a lookup.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Inbound request was missing or malformed input.
    #[error("validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Upstream answered with a non-success status.
    #[error("{jurisdiction} upstream returned {}", describe_status(.status))]
    Upstream {
        jurisdiction: Jurisdiction,
        status: u16,
    },

    /// Upstream answered 2xx but the body was not what the registry promises.
    #[error("{jurisdiction} upstream returned an unreadable body: {reason}")]
    UpstreamBody {
        jurisdiction: Jurisdiction,
        reason: String,
    },

    /// Connection or protocol failure talking to the upstream.
    #[error("{jurisdiction} upstream request failed: {source}")]
    Transport {
        jurisdiction: Jurisdiction,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream did not answer within `timeouts.upstream_secs`.
    #[error("{jurisdiction} upstream timed out")]
    Timeout { jurisdiction: Jurisdiction },

    /// Inbound body exceeded `listener.max_body_bytes`.
    #[error("request body exceeds the size limit")]
    PayloadTooLarge,

    /// The whole request outlived `timeouts.request_secs`.
    #[error("request timed out")]
    RequestTimeout,

    /// A credential or setting the handler needs is absent.
    #[error("{0} is not configured")]
    NotConfigured(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

impl RelayError {
    /// Shorthand for a single-field validation failure.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        RelayError::Validation(vec![FieldError::new(field, message)])
    }

    /// Wrap a reqwest failure, separating timeouts from other transport errors.
    pub fn from_reqwest(jurisdiction: Jurisdiction, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            RelayError::Timeout { jurisdiction }
        } else {
            RelayError::Transport {
                jurisdiction,
                source,
            }
        }
    }

    /// HTTP status surfaced to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            RelayError::UpstreamBody { .. } | RelayError::Transport { .. } => {
                StatusCode::BAD_GATEWAY
            }
            RelayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            RelayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            RelayError::NotConfigured(_) | RelayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_status(status: &u16) -> String {
    match StatusCode::from_u16(*status) {
        Ok(code) => code.to_string(),
        Err(_) => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_propagated() {
        let err = RelayError::Upstream {
            jurisdiction: Jurisdiction::Illinois,
            status: 404,
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Illinois upstream returned 404 Not Found");
    }

    #[test]
    fn test_non_error_upstream_status_becomes_bad_gateway() {
        let err = RelayError::Upstream {
            jurisdiction: Jurisdiction::Colorado,
            status: 304,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_display() {
        let err = RelayError::Validation(vec![
            FieldError::new("name", "must not be empty"),
            FieldError::new("licenseNumbers", "must not be empty"),
        ]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "validation failed: name: must not be empty, licenseNumbers: must not be empty"
        );
    }

    #[test]
    fn test_not_configured() {
        let err = RelayError::NotConfigured("CALI_API_AUTH".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "CALI_API_AUTH is not configured");
    }

    #[test]
    fn test_inbound_limits() {
        assert_eq!(RelayError::PayloadTooLarge.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(RelayError::RequestTimeout.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(RelayError::RequestTimeout.to_string(), "request timed out");
    }
}
