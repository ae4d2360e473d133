//! Inbound search queries, validated and tagged with their jurisdiction.

use std::fmt;

use crate::error::{RelayError, RelayResult};

/// Licensing registry a query is bound for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Jurisdiction {
    Illinois,
    Colorado,
    California,
}

impl Jurisdiction {
    /// Two-letter state code, used as a metrics label.
    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::Illinois => "IL",
            Jurisdiction::Colorado => "CO",
            Jurisdiction::California => "CA",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jurisdiction::Illinois => write!(f, "Illinois"),
            Jurisdiction::Colorado => write!(f, "Colorado"),
            Jurisdiction::California => write!(f, "California"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Free text matched against every indexed column.
    Text,
    Number,
    Name,
}

/// What is being searched for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    Text(String),
    /// One or more license numbers. Colorado carries exactly one.
    LicenseNumbers(Vec<String>),
    Name(String),
}

impl SearchTerm {
    pub fn mode(&self) -> SearchMode {
        match self {
            SearchTerm::Text(_) => SearchMode::Text,
            SearchTerm::LicenseNumbers(_) => SearchMode::Number,
            SearchTerm::Name(_) => SearchMode::Name,
        }
    }
}

/// A validated query. Every value it carries is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub jurisdiction: Jurisdiction,
    pub term: SearchTerm,
}

impl SearchQuery {
    pub fn new(jurisdiction: Jurisdiction, term: SearchTerm) -> Self {
        Self { jurisdiction, term }
    }

    pub fn mode(&self) -> SearchMode {
        self.term.mode()
    }

    /// Error for a query routed to a lookup that cannot serve its mode.
    pub(crate) fn unsupported(&self) -> RelayError {
        RelayError::Internal(format!(
            "{} lookup cannot serve {:?} queries",
            self.jurisdiction,
            self.mode()
        ))
    }
}

/// Trimmed value of an optional parameter, `None` when missing or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Trimmed value of a required parameter.
pub(crate) fn required<'a>(field: &str, value: Option<&'a str>) -> RelayResult<&'a str> {
    non_blank(value).ok_or_else(|| RelayError::invalid(field, "is required and must not be empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("q", Some("  jones ")).unwrap(), "jones");
    }

    #[test]
    fn test_required_rejects_blank_and_missing() {
        assert!(matches!(required("q", Some("   ")), Err(RelayError::Validation(_))));
        let err = required("q", None).unwrap_err();
        match err {
            RelayError::Validation(fields) => assert_eq!(fields[0].field, "q"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_term_mode() {
        assert_eq!(SearchTerm::Name("x".into()).mode(), SearchMode::Name);
        assert_eq!(
            SearchTerm::LicenseNumbers(vec!["A1".into()]).mode(),
            SearchMode::Number
        );
    }

    #[test]
    fn test_jurisdiction_labels() {
        assert_eq!(Jurisdiction::California.code(), "CA");
        assert_eq!(Jurisdiction::Colorado.to_string(), "Colorado");
    }
}
