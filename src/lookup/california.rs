//! California lookup against the DCA license search service.

use axum::body::Bytes;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Request};
use serde::{Deserialize, Serialize};

use crate::config::CaliforniaConfig;
use crate::error::{FieldError, RelayError, RelayResult};
use crate::lookup::names::last_name_first;
use crate::lookup::query::non_blank;
use crate::lookup::{upstream, Jurisdiction, SearchQuery, SearchTerm};

/// JSON body accepted on `/cali-api`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaliforniaParams {
    pub license_numbers: Option<Vec<String>>,
    pub name: Option<String>,
}

impl CaliforniaParams {
    /// License-number search is the default; a name switches to the name index.
    pub fn into_query(self) -> RelayResult<SearchQuery> {
        let term = match (self.name, self.license_numbers) {
            (Some(_), Some(_)) => {
                return Err(RelayError::Validation(vec![
                    FieldError::new("name", "cannot be combined with licenseNumbers"),
                    FieldError::new("licenseNumbers", "cannot be combined with name"),
                ]))
            }
            (Some(name), None) => match non_blank(Some(name.as_str())) {
                Some(name) => SearchTerm::Name(name.to_string()),
                None => return Err(RelayError::invalid("name", "must not be empty")),
            },
            (None, numbers) => SearchTerm::LicenseNumbers(validate_numbers(numbers)?),
        };
        Ok(SearchQuery::new(Jurisdiction::California, term))
    }
}

fn validate_numbers(numbers: Option<Vec<String>>) -> RelayResult<Vec<String>> {
    let numbers = match numbers {
        Some(numbers) if !numbers.is_empty() => numbers,
        Some(_) => return Err(RelayError::invalid("licenseNumbers", "must not be empty")),
        None => {
            return Err(RelayError::invalid(
                "licenseNumbers",
                "is required when no name is given",
            ))
        }
    };

    let mut errors = Vec::new();
    let mut cleaned = Vec::with_capacity(numbers.len());
    for (i, number) in numbers.iter().enumerate() {
        match non_blank(Some(number.as_str())) {
            Some(n) => cleaned.push(n.to_string()),
            None => errors.push(FieldError::new(
                format!("licenseNumbers[{}]", i),
                "must not be empty",
            )),
        }
    }

    if errors.is_empty() {
        Ok(cleaned)
    } else {
        Err(RelayError::Validation(errors))
    }
}

/// Search method selector understood by the DCA service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchMethod {
    #[serde(rename = "LIC_NBR")]
    LicenseNumber,
    #[serde(rename = "NAME_IDX")]
    NameIndex,
}

/// Upstream POST body. Only the field matching `search_method` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaliforniaSearchBody {
    pub client_code: Vec<String>,
    pub search_method: SearchMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_numbers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CaliforniaSearchBody {
    pub fn for_query(query: &SearchQuery, client_codes: &[String]) -> RelayResult<Self> {
        let client_code = client_codes.to_vec();
        match &query.term {
            SearchTerm::LicenseNumbers(numbers) => Ok(Self {
                client_code,
                search_method: SearchMethod::LicenseNumber,
                license_numbers: Some(numbers.clone()),
                name: None,
            }),
            SearchTerm::Name(name) => Ok(Self {
                client_code,
                search_method: SearchMethod::NameIndex,
                license_numbers: None,
                name: Some(last_name_first(name)),
            }),
            SearchTerm::Text(_) => Err(query.unsupported()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaliforniaLookup {
    client: Client,
    config: CaliforniaConfig,
}

impl CaliforniaLookup {
    pub fn new(client: Client, config: CaliforniaConfig) -> Self {
        Self { client, config }
    }

    pub fn build_request(&self, query: &SearchQuery) -> RelayResult<Request> {
        let credential = self
            .config
            .auth
            .as_deref()
            .ok_or_else(|| RelayError::NotConfigured("CALI_API_AUTH".into()))?;
        let body = CaliforniaSearchBody::for_query(query, &self.config.client_codes)?;

        self.client
            .post(&self.config.base_url)
            .header(AUTHORIZATION, basic_auth_header(credential)?)
            .json(&body)
            .build()
            .map_err(|e| RelayError::Internal(format!("invalid California request: {}", e)))
    }

    /// Run the search. The upstream body is returned exactly as received.
    pub async fn search(&self, query: &SearchQuery) -> RelayResult<Bytes> {
        let request = self.build_request(query)?;
        let body = upstream::execute(&self.client, Jurisdiction::California, request).await?;
        upstream::ensure_json(Jurisdiction::California, &body)?;
        Ok(body)
    }
}

/// `CALI_API_AUTH` holds the encoded credential; the scheme is added here
/// unless the operator already included it.
fn basic_auth_header(credential: &str) -> RelayResult<HeaderValue> {
    let credential = credential.trim();
    let value = if credential.starts_with("Basic ") {
        credential.to_string()
    } else {
        format!("Basic {}", credential)
    };
    let mut header = HeaderValue::from_str(&value)
        .map_err(|_| RelayError::Internal("CALI_API_AUTH is not a valid header value".into()))?;
    header.set_sensitive(true);
    Ok(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn lookup(auth: Option<&str>) -> CaliforniaLookup {
        CaliforniaLookup::new(
            Client::new(),
            CaliforniaConfig {
                auth: auth.map(String::from),
                client_codes: vec!["800".into(), "2000".into()],
                ..Default::default()
            },
        )
    }

    fn params(numbers: Option<Vec<&str>>, name: Option<&str>) -> CaliforniaParams {
        CaliforniaParams {
            license_numbers: numbers.map(|n| n.into_iter().map(String::from).collect()),
            name: name.map(String::from),
        }
    }

    fn body_of(request: &Request) -> Value {
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn test_license_number_body_omits_name() {
        let query = params(Some(vec!["A123"]), None).into_query().unwrap();
        let request = lookup(Some("dXNlcjpwYXNz")).build_request(&query).unwrap();

        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(request.headers()[AUTHORIZATION], "Basic dXNlcjpwYXNz");
        assert_eq!(
            body_of(&request),
            json!({
                "clientCode": ["800", "2000"],
                "searchMethod": "LIC_NBR",
                "licenseNumbers": ["A123"]
            })
        );
    }

    #[test]
    fn test_name_body_reordered_and_omits_numbers() {
        let query = params(None, Some("john smith")).into_query().unwrap();
        let request = lookup(Some("Basic abc")).build_request(&query).unwrap();

        assert_eq!(request.headers()[AUTHORIZATION], "Basic abc");
        assert_eq!(
            body_of(&request),
            json!({
                "clientCode": ["800", "2000"],
                "searchMethod": "NAME_IDX",
                "name": "smith, john"
            })
        );
    }

    #[test]
    fn test_single_token_name_passes_through() {
        let query = params(None, Some("smith")).into_query().unwrap();
        let body = CaliforniaSearchBody::for_query(&query, &[]).unwrap();
        assert_eq!(body.name.as_deref(), Some("smith"));
        assert!(body.license_numbers.is_none());
    }

    #[test]
    fn test_empty_license_numbers_rejected() {
        let err = params(Some(vec![]), None).into_query().unwrap_err();
        assert!(matches!(err, RelayError::Validation(_)));
    }

    #[test]
    fn test_blank_entries_reported_by_index() {
        let err = params(Some(vec!["A1", " ", ""]), None).into_query().unwrap_err();
        match err {
            RelayError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["licenseNumbers[1]", "licenseNumbers[2]"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nothing_supplied_rejected() {
        assert!(params(None, None).into_query().is_err());
        assert!(params(None, Some("   ")).into_query().is_err());
    }

    #[test]
    fn test_name_and_numbers_rejected() {
        assert!(params(Some(vec!["A1"]), Some("smith")).into_query().is_err());
    }

    #[test]
    fn test_missing_credential_fails_before_request() {
        let query = params(Some(vec!["A123"]), None).into_query().unwrap();
        let err = lookup(None).build_request(&query).unwrap_err();
        assert!(matches!(err, RelayError::NotConfigured(ref var) if var == "CALI_API_AUTH"));
    }
}
