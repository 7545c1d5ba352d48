//! Lenient value coercion. Nothing here fails: values that do not parse are
//! returned unchanged or reported as `None`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use metamerge_core::FieldValue;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Turn numeric text into a number; everything else passes through.
#[must_use]
pub fn coerce(value: FieldValue) -> FieldValue {
    match value {
        FieldValue::Text(text) => coerce_text(text),
        other => other,
    }
}

/// `text` as a number when the whole (trimmed) string is a finite decimal.
#[must_use]
pub fn coerce_text(text: String) -> FieldValue {
    match parse_finite(&text) {
        Some(n) => FieldValue::Number(n),
        None => FieldValue::Text(text),
    }
}

/// Numeric reading of a value for summing. Blank or non-numeric is `None`.
#[must_use]
pub fn as_number(value: &FieldValue) -> Option<f64> {
    match value {
        FieldValue::Number(n) if n.is_finite() => Some(*n),
        FieldValue::Text(text) => parse_finite(text),
        _ => None,
    }
}

/// Calendar date of a publish-time value, if it is in a recognized format.
#[must_use]
pub fn parse_date(value: &FieldValue) -> Option<NaiveDate> {
    match value {
        FieldValue::Text(text) => parse_date_str(text),
        _ => None,
    }
}

#[must_use]
pub fn parse_date_str(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

fn parse_finite(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
#[path = "coerce_test.rs"]
mod tests;
