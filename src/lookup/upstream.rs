//! Outbound calls to the government registries.
//!
//! # Responsibilities
//! - Build the shared reqwest client (timeouts, user agent)
//! - Execute one request per lookup, no retries
//! - Turn non-success statuses into `RelayError::Upstream`
//! - Record latency and status metrics per jurisdiction

use std::time::{Duration, Instant};

use axum::body::Bytes;
use reqwest::{Client, Request};
use serde::de::IgnoredAny;

use crate::config::TimeoutConfig;
use crate::error::{RelayError, RelayResult};
use crate::lookup::Jurisdiction;
use crate::observability::metrics;

/// Build the HTTP client shared by all lookups.
pub fn build_client(timeouts: &TimeoutConfig) -> RelayResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeouts.upstream_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| RelayError::Internal(format!("failed to build upstream client: {}", e)))
}

/// Send a prepared request and return the body of a successful answer.
pub async fn execute(
    client: &Client,
    jurisdiction: Jurisdiction,
    request: Request,
) -> RelayResult<Bytes> {
    let start = Instant::now();
    let method = request.method().clone();
    let host = request.url().host_str().unwrap_or_default().to_string();

    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(jurisdiction = %jurisdiction, host = %host, error = %e, "Upstream request failed");
            metrics::record_upstream(jurisdiction.code(), 0, start);
            return Err(RelayError::from_reqwest(jurisdiction, e));
        }
    };

    let status = response.status();
    metrics::record_upstream(jurisdiction.code(), status.as_u16(), start);

    if !status.is_success() {
        tracing::warn!(
            jurisdiction = %jurisdiction,
            host = %host,
            status = status.as_u16(),
            "Upstream returned non-success status"
        );
        return Err(RelayError::Upstream {
            jurisdiction,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| RelayError::from_reqwest(jurisdiction, e))?;

    tracing::debug!(
        jurisdiction = %jurisdiction,
        method = %method,
        host = %host,
        status = status.as_u16(),
        bytes = body.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Upstream responded"
    );

    Ok(body)
}

/// Confirm a pass-through body is well-formed JSON without re-encoding it.
pub fn ensure_json(jurisdiction: Jurisdiction, body: &[u8]) -> RelayResult<()> {
    serde_json::from_slice::<IgnoredAny>(body)
        .map(|_| ())
        .map_err(|e| RelayError::UpstreamBody {
            jurisdiction,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_json() {
        assert!(ensure_json(Jurisdiction::Illinois, br#"{"result":{"records":[]}}"#).is_ok());
        let err = ensure_json(Jurisdiction::Illinois, b"<html>").unwrap_err();
        assert!(matches!(err, RelayError::UpstreamBody { .. }));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(&TimeoutConfig::default()).is_ok());
    }
}
