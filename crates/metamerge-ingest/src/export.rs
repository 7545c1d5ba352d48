//! CSV export of the merged dataset.

use std::collections::HashSet;

use chrono::NaiveDate;
use metamerge_core::fields::SUMMARIZABLE_METRICS;
use metamerge_core::{AccountAggregate, CanonicalRow, DateRange, FieldValue, FileRecord};

use crate::csv_codec::{header_union, write_records};
use crate::dictionary::FieldDictionary;
use crate::error::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Column names as they appear in the source exports.
    #[default]
    Original,
    /// Internal canonical field names.
    Canonical,
}

/// Write rows as CSV. Canonical fields come first in dictionary order,
/// other columns follow in first-seen order.
///
/// With [`ExportFormat::Original`] each canonical column is renamed to its
/// reverse-lookup header; a name already taken by another column keeps the
/// canonical name instead.
///
/// # Errors
///
/// Returns [`IngestError::Write`] if the CSV writer fails.
pub fn export_rows(
    rows: &[CanonicalRow],
    dictionary: &FieldDictionary,
    format: ExportFormat,
) -> Result<String, IngestError> {
    let canonical = dictionary.canonical_fields();
    let mut keys = header_union(rows);
    keys.sort_by_key(|k| {
        canonical
            .iter()
            .position(|c| *c == k.as_str())
            .unwrap_or(canonical.len())
    });

    let headers = match format {
        ExportFormat::Canonical => keys.clone(),
        ExportFormat::Original => original_headers(&keys, dictionary),
    };

    let records: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            keys.iter()
                .map(|k| row.get(k).map(FieldValue::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    write_records(&headers, &records)
}

fn original_headers(keys: &[String], dictionary: &FieldDictionary) -> Vec<String> {
    let mut used: HashSet<String> = keys
        .iter()
        .filter(|k| dictionary.reverse_lookup(k).is_none())
        .cloned()
        .collect();
    keys.iter()
        .map(|key| match dictionary.reverse_lookup(key) {
            Some(raw) if used.insert(raw.to_string()) => raw.to_string(),
            _ => key.clone(),
        })
        .collect()
}

/// Write one line per account with every summarizable metric.
///
/// # Errors
///
/// Returns [`IngestError::Write`] if the CSV writer fails.
pub fn export_accounts(accounts: &[AccountAggregate]) -> Result<String, IngestError> {
    let mut headers: Vec<String> = [
        "account_id",
        "account_name",
        "account_username",
        "platform",
        "post_count",
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    headers.extend(SUMMARIZABLE_METRICS.iter().map(ToString::to_string));

    let records: Vec<Vec<String>> = accounts
        .iter()
        .map(|a| {
            let mut record = vec![
                a.account_id.clone(),
                a.account_name.clone(),
                a.account_username.clone(),
                a.platform.to_string(),
                a.post_count.to_string(),
            ];
            record.extend(SUMMARIZABLE_METRICS.iter().map(|m| a.metric(m).to_string()));
            record
        })
        .collect();

    write_records(&headers, &records)
}

/// `"Meta Merged <start>_<end>"` over the imported files' date ranges.
/// Missing bounds fall back to `today`.
#[must_use]
pub fn export_file_name(files: &[FileRecord], today: NaiveDate) -> String {
    let range = files
        .iter()
        .fold(DateRange::default(), |acc, f| acc.merge(f.date_range));
    let start = range.start.unwrap_or(today);
    let end = range.end.unwrap_or(today);
    format!(
        "Meta Merged {}_{}",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
