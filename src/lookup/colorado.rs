//! Colorado lookup against the DORA professional license dataset (Socrata).
//!
//! Socrata filters columns by exact match, so names are capitalized the way
//! the dataset stores them before they are bound to `firstname`/`lastname`.
//! Returned records have their date columns rewritten to `MM/DD/YYYY`.

use reqwest::{Client, Request};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::config::ColoradoConfig;
use crate::error::{FieldError, RelayError, RelayResult};
use crate::lookup::dates::normalize_field;
use crate::lookup::names::split_person_name;
use crate::lookup::query::non_blank;
use crate::lookup::{upstream, Jurisdiction, SearchQuery, SearchTerm};

/// Socrata application token header.
pub const APP_TOKEN_HEADER: &str = "X-App-Token";

/// Query parameters accepted on `/colo-api` and `/colorado-api`.
#[derive(Debug, Default, Deserialize)]
pub struct ColoradoParams {
    /// `name` or `license`. When omitted the mode follows whichever field is set.
    #[serde(rename = "searchType")]
    pub search_type: Option<String>,
    pub name: Option<String>,
    pub licensenumber: Option<String>,
}

impl ColoradoParams {
    pub fn into_query(self) -> RelayResult<SearchQuery> {
        let name = non_blank(self.name.as_deref());
        let number = non_blank(self.licensenumber.as_deref());

        let term = match non_blank(self.search_type.as_deref()) {
            Some("name") => SearchTerm::Name(
                name.ok_or_else(|| RelayError::invalid("name", "is required for a name search"))?
                    .to_string(),
            ),
            Some("license") => SearchTerm::LicenseNumbers(vec![number
                .ok_or_else(|| {
                    RelayError::invalid("licensenumber", "is required for a license search")
                })?
                .to_string()]),
            Some(other) => {
                return Err(RelayError::invalid(
                    "searchType",
                    format!("'{}' is not one of 'name', 'license'", other),
                ))
            }
            None => match (name, number) {
                (Some(name), None) => SearchTerm::Name(name.to_string()),
                (None, Some(number)) => SearchTerm::LicenseNumbers(vec![number.to_string()]),
                (Some(_), Some(_)) => {
                    return Err(RelayError::Validation(vec![
                        FieldError::new("name", "cannot be combined with licensenumber"),
                        FieldError::new("licensenumber", "cannot be combined with name"),
                    ]))
                }
                (None, None) => {
                    return Err(RelayError::invalid(
                        "name",
                        "either name or licensenumber is required",
                    ))
                }
            },
        };

        Ok(SearchQuery::new(Jurisdiction::Colorado, term))
    }
}

/// A typed column: absent (`None`), explicit `null` (`Some(None)`) or a value.
pub type Column = Option<Option<String>>;

fn present<'de, D>(deserializer: D) -> Result<Column, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// One row of the Colorado license dataset.
///
/// Columns the relay touches are typed; every other column is carried
/// through as received. A column the upstream sent as `null` stays `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColoradoLicense {
    #[serde(
        rename = "lastname",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_name: Column,

    #[serde(
        rename = "firstname",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_name: Column,

    #[serde(
        rename = "licensenumber",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub license_number: Column,

    #[serde(
        rename = "licensetype",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub license_type: Column,

    #[serde(
        rename = "licensefirstissuedate",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_issue_date: Column,

    #[serde(
        rename = "licenselastreneweddate",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_renewed_date: Column,

    #[serde(
        rename = "licenseexpirationdate",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Column,

    #[serde(
        rename = "disciplineeffectivedate",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub discipline_effective_date: Column,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl ColoradoLicense {
    /// Rewrite every present date column to `MM/DD/YYYY`.
    pub fn normalize_dates(&mut self) {
        for (field, column) in [
            ("licensefirstissuedate", &mut self.first_issue_date),
            ("licenselastreneweddate", &mut self.last_renewed_date),
            ("licenseexpirationdate", &mut self.expiration_date),
            ("disciplineeffectivedate", &mut self.discipline_effective_date),
        ] {
            if let Some(value) = column {
                normalize_field(field, value);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColoradoLookup {
    client: Client,
    config: ColoradoConfig,
}

impl ColoradoLookup {
    pub fn new(client: Client, config: ColoradoConfig) -> Self {
        Self { client, config }
    }

    pub fn build_request(&self, query: &SearchQuery) -> RelayResult<Request> {
        let params: Vec<(&str, String)> = match &query.term {
            SearchTerm::Name(text) => {
                let name = split_person_name(text);
                let mut params = Vec::with_capacity(2);
                if let Some(first) = name.first {
                    params.push(("firstname", first));
                }
                params.push(("lastname", name.last));
                params
            }
            SearchTerm::LicenseNumbers(numbers) if numbers.len() == 1 => {
                vec![("licensenumber", numbers[0].clone())]
            }
            _ => return Err(query.unsupported()),
        };

        let mut builder = self.client.get(&self.config.base_url).query(&params);
        if let Some(token) = &self.config.app_token {
            builder = builder.header(APP_TOKEN_HEADER, token);
        }
        builder
            .build()
            .map_err(|e| RelayError::Internal(format!("invalid Colorado request: {}", e)))
    }

    /// Run the search and normalize every returned record.
    pub async fn search(&self, query: &SearchQuery) -> RelayResult<Vec<ColoradoLicense>> {
        let request = self.build_request(query)?;
        let body = upstream::execute(&self.client, Jurisdiction::Colorado, request).await?;
        let mut records = parse_records(&body)?;
        for record in &mut records {
            record.normalize_dates();
        }
        Ok(records)
    }
}

fn parse_records(body: &[u8]) -> RelayResult<Vec<ColoradoLicense>> {
    serde_json::from_slice(body).map_err(|e| RelayError::UpstreamBody {
        jurisdiction: Jurisdiction::Colorado,
        reason: e.to_string(),
    })
}
