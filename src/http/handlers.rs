//! Route handlers, one per jurisdiction.
//!
//! Each handler is a single pass: validate, build the upstream request, await
//! the call, shape the response. Extractor rejections are turned into
//! validation errors so every failure answers with the JSON error body.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::{RelayError, RelayResult};
use crate::http::request::request_id;
use crate::http::response::json_passthrough;
use crate::http::server::AppState;
use crate::lookup::{CaliforniaParams, ColoradoParams, IllinoisParams, Jurisdiction, SearchQuery};
use crate::observability::metrics;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /ill-api?q=<text>`
pub async fn illinois(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<IllinoisParams>, QueryRejection>,
) -> RelayResult<Response> {
    let query = validated(Jurisdiction::Illinois, params.map_err(query_rejected), |p| {
        p.0.into_query()
    })?;
    log_query(&headers, &query);

    let body = state.lookups.illinois.search(&query).await?;
    Ok(json_passthrough(body))
}

/// `GET /colo-api` and `GET /colorado-api`
pub async fn colorado(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<ColoradoParams>, QueryRejection>,
) -> RelayResult<Response> {
    let query = validated(Jurisdiction::Colorado, params.map_err(query_rejected), |p| {
        p.0.into_query()
    })?;
    log_query(&headers, &query);

    let records = state.lookups.colorado.search(&query).await?;
    tracing::debug!(
        request_id = %request_id(&headers),
        records = records.len(),
        "Colorado records normalized"
    );
    Ok(Json(records).into_response())
}

/// `POST /cali-api`
pub async fn california(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CaliforniaParams>, JsonRejection>,
) -> RelayResult<Response> {
    let query = validated(Jurisdiction::California, body.map_err(json_rejected), |b| {
        b.0.into_query()
    })?;
    log_query(&headers, &query);

    let body = state.lookups.california.search(&query).await?;
    Ok(json_passthrough(body))
}

/// Run extraction and validation, counting rejections per jurisdiction.
fn validated<T, F>(
    jurisdiction: Jurisdiction,
    extracted: RelayResult<T>,
    into_query: F,
) -> RelayResult<SearchQuery>
where
    F: FnOnce(T) -> RelayResult<SearchQuery>,
{
    extracted.and_then(into_query).inspect_err(|e| {
        if matches!(e, RelayError::Validation(_)) {
            metrics::record_validation_failure(jurisdiction.code());
            tracing::debug!(jurisdiction = %jurisdiction, error = %e, "Rejected query");
        }
    })
}

fn log_query(headers: &HeaderMap, query: &SearchQuery) {
    tracing::info!(
        request_id = %request_id(headers),
        jurisdiction = %query.jurisdiction,
        mode = ?query.mode(),
        "Relaying lookup"
    );
}

fn query_rejected(rejection: QueryRejection) -> RelayError {
    RelayError::invalid("query", rejection.body_text())
}

fn json_rejected(rejection: JsonRejection) -> RelayError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return RelayError::PayloadTooLarge;
    }
    RelayError::invalid("body", rejection.body_text())
}
