//! Illinois lookup against the state's CKAN `datastore_search` action.

use axum::body::Bytes;
use reqwest::{Client, Request};
use serde::Deserialize;

use crate::config::IllinoisConfig;
use crate::error::{RelayError, RelayResult};
use crate::lookup::query::required;
use crate::lookup::{upstream, Jurisdiction, SearchQuery, SearchTerm};

/// Query parameters accepted on `/ill-api`.
#[derive(Debug, Default, Deserialize)]
pub struct IllinoisParams {
    pub q: Option<String>,
}

impl IllinoisParams {
    pub fn into_query(self) -> RelayResult<SearchQuery> {
        let q = required("q", self.q.as_deref())?;
        Ok(SearchQuery::new(
            Jurisdiction::Illinois,
            SearchTerm::Text(q.to_string()),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct IllinoisLookup {
    client: Client,
    config: IllinoisConfig,
}

impl IllinoisLookup {
    pub fn new(client: Client, config: IllinoisConfig) -> Self {
        Self { client, config }
    }

    pub fn build_request(&self, query: &SearchQuery) -> RelayResult<Request> {
        let SearchTerm::Text(q) = &query.term else {
            return Err(query.unsupported());
        };
        self.client
            .get(&self.config.base_url)
            .query(&[("resource_id", self.config.resource_id.as_str()), ("q", q.as_str())])
            .build()
            .map_err(|e| RelayError::Internal(format!("invalid Illinois request: {}", e)))
    }

    /// Run the search. The upstream body is returned exactly as received.
    pub async fn search(&self, query: &SearchQuery) -> RelayResult<Bytes> {
        let request = self.build_request(query)?;
        let body = upstream::execute(&self.client, Jurisdiction::Illinois, request).await?;
        upstream::ensure_json(Jurisdiction::Illinois, &body)?;
        Ok(body)
    }
}
