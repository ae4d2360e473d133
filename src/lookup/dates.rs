//! Date normalization to `MM/DD/YYYY`.
//!
//! Only values that are present get rewritten. A field that is absent stays
//! absent, and a value that does not parse as a date is left as received.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const OUTPUT_FORMAT: &str = "%m/%d/%Y";

/// Parse the date forms the registries emit.
///
/// Socrata floating timestamps (`2019-05-31T00:00:00.000`), RFC 3339,
/// plain ISO dates, and already-normalized US dates.
pub fn parse_upstream_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, OUTPUT_FORMAT))
        .ok()
}

/// Reformat a single upstream date string, `None` if it is not a date.
pub fn to_us_date(raw: &str) -> Option<String> {
    parse_upstream_date(raw).map(|d| d.format(OUTPUT_FORMAT).to_string())
}

/// Normalize an optional date field in place.
pub fn normalize_field(field: &'static str, value: &mut Option<String>) {
    let Some(raw) = value.as_deref() else {
        return;
    };
    match to_us_date(raw) {
        Some(formatted) => *value = Some(formatted),
        None => tracing::warn!(field, value = %raw, "Unrecognized upstream date left unchanged"),
    }
}
