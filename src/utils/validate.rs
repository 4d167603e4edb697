//! Pure validation and sanitization helpers.
//!
//! These functions never touch the document store; services compose them
//! into fail-fast validation chains.

use std::sync::LazyLock;

use jiff::{Timestamp, civil, tz::TimeZone};
use regex::Regex;
use validator::ValidateLength;

static DOCUMENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("document id pattern is valid"));

/// Returns the names of all parameters whose presence flag is `false`,
/// preserving the order they were given in.
pub fn find_missing_params<'a>(params: &[(&'a str, bool)]) -> Vec<&'a str> {
    params
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect()
}

/// Character-count length check with an optional upper bound.
pub fn is_length(value: &str, min: u64, max: Option<u64>) -> bool {
    value.validate_length(Some(min), max, None)
}

/// Non-empty and made only of ASCII letters and digits.
pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Replaces characters with meaning in HTML contexts by their entities.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Parses an ISO-8601 date or date-time.
///
/// Accepted forms, tried in order:
/// - RFC 3339 timestamp with offset (`2030-01-31T09:30:00Z`)
/// - civil date-time, read as UTC (`2030-01-31T09:30:00`)
/// - civil date, read as UTC midnight (`2030-01-31`)
///
/// Surrounding whitespace is not accepted.
pub fn parse_iso8601(value: &str) -> Option<Timestamp> {
    if let Ok(ts) = value.parse::<Timestamp>() {
        return Some(ts);
    }
    if let Ok(dt) = value.parse::<civil::DateTime>() {
        return dt.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
    }
    value
        .parse::<civil::Date>()
        .ok()
        .and_then(|d| d.to_zoned(TimeZone::UTC).ok())
        .map(|z| z.timestamp())
}

/// Strictly later than `now`.
pub fn is_future(ts: Timestamp, now: Timestamp) -> bool {
    ts > now
}

/// Matches the document-store identifier format (24 hex characters).
pub fn is_document_id(value: &str) -> bool {
    DOCUMENT_ID.is_match(value)
}

/// Canonical form used for identifier comparison and store keys.
pub fn normalize_id(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

/// Compares two identifiers as normalized strings.
pub fn ids_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
