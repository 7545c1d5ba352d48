//! Entry points: preview, header validation, and the full ingestion run.
//!
//! Everything here is synchronous. Reading files and persisting results
//! happen outside, before and after a call.

use metamerge_core::fields::is_text_field;
use metamerge_core::{
    AccountAggregate, CanonicalRow, Dataset, DateRange, FieldValue, Platform,
    UnknownPlatformPolicy,
};
use serde::Serialize;

use crate::aggregate::{account_count, aggregate, date_range};
use crate::classify::{classify, resolve_platform, Classification, PlatformDecision};
use crate::coerce::coerce;
use crate::csv_codec::{parse_csv, preview_csv};
use crate::dedupe::dedupe;
use crate::dictionary::FieldDictionary;
use crate::error::IngestError;
use crate::mapper::{map_row, RawRow};

/// Cheap look at a file before importing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub headers: Vec<String>,
    /// Non-blank lines minus the header line; quoted multi-line cells
    /// make this an overestimate.
    pub row_count_estimate: usize,
    pub platform_guess: Option<Platform>,
    pub classification: Classification,
    #[serde(skip)]
    pub preview: Vec<RawRow>,
}

/// Headers, a row estimate, a platform guess, and the first `preview_rows` records.
///
/// # Errors
///
/// Returns [`IngestError::Validation`] for empty input and
/// [`IngestError::Parse`] if the leading records cannot be read.
pub fn analyze(csv_text: &str, preview_rows: usize) -> Result<Analysis, IngestError> {
    let parsed = preview_csv(csv_text, preview_rows)?;
    let row_count_estimate = csv_text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .count()
        .saturating_sub(1);
    let classification = classify(&parsed.headers);

    Ok(Analysis {
        headers: parsed.headers,
        row_count_estimate,
        platform_guess: classification.platform,
        classification,
        preview: parsed.rows,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundHeader {
    pub header: String,
    pub canonical: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderReport {
    pub is_valid: bool,
    /// Canonical fields no header resolves to.
    pub missing: Vec<String>,
    pub found: Vec<FoundHeader>,
    /// Headers the dictionary does not know.
    pub unknown: Vec<String>,
}

/// Check a header set against every canonical field the dictionary knows.
#[must_use]
pub fn validate_headers<S: AsRef<str>>(
    headers: &[S],
    dictionary: &FieldDictionary,
) -> HeaderReport {
    let mut found = Vec::new();
    let mut unknown = Vec::new();
    for header in headers {
        let header = header.as_ref();
        match dictionary.resolve(header) {
            Some(canonical) => found.push(FoundHeader {
                header: header.to_string(),
                canonical: canonical.to_string(),
            }),
            None => unknown.push(header.to_string()),
        }
    }

    let missing: Vec<String> = dictionary
        .canonical_fields()
        .into_iter()
        .filter(|field| !found.iter().any(|f| f.canonical == *field))
        .map(ToString::to_string)
        .collect();

    HeaderReport {
        is_valid: missing.is_empty(),
        missing,
        found,
        unknown,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Merge into the existing dataset instead of replacing it.
    pub merge_with_existing: bool,
    /// Platform chosen by the user; overrides detection.
    pub platform_hint: Option<Platform>,
    pub unknown_platform: UnknownPlatformPolicy,
}

/// Per-file statistics of one ingestion run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestStats {
    pub total_rows: usize,
    pub new_rows: usize,
    pub duplicate_count: usize,
    pub duplicate_ids: Vec<String>,
    pub account_count: usize,
    /// Dates of this file's rows.
    pub file_date_range: DateRange,
    /// Dates of the whole dataset after the merge.
    pub date_range: DateRange,
    pub platform: Platform,
    pub platform_warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestOutcome {
    pub accounts: Vec<AccountAggregate>,
    pub rows: Vec<CanonicalRow>,
    pub stats: IngestStats,
}

/// A parsed, classified and mapped file, ready to merge.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedFile {
    pub rows: Vec<CanonicalRow>,
    pub decision: PlatformDecision,
    pub classification: Classification,
}

/// Parse `csv_text`, pick its platform, and map every record to a
/// canonical row with numeric values coerced.
///
/// # Errors
///
/// Returns [`IngestError::Validation`] for empty or header-only input,
/// [`IngestError::Parse`] for unreadable records, and
/// [`IngestError::UnknownPlatform`] when the platform cannot be decided
/// under [`UnknownPlatformPolicy::Reject`].
pub fn prepare(
    csv_text: &str,
    dictionary: &FieldDictionary,
    options: &IngestOptions,
) -> Result<PreparedFile, IngestError> {
    let parsed = parse_csv(csv_text)?;
    let classification = classify(&parsed.headers);
    let decision = resolve_platform(
        &classification,
        options.platform_hint,
        options.unknown_platform,
        &parsed.headers,
    )?;
    tracing::debug!(
        platform = %decision.platform,
        source = ?decision.source,
        confidence = classification.confidence,
        "platform decided"
    );

    let rows = parsed
        .rows
        .iter()
        .map(|raw| {
            let mut row = map_row(raw, dictionary, decision.platform);
            coerce_row(&mut row);
            row
        })
        .collect();

    Ok(PreparedFile {
        rows,
        decision,
        classification,
    })
}

/// Merge a prepared file into `existing`. Only the rows that survive
/// deduplication are added to the account sums.
#[must_use]
pub fn merge(prepared: PreparedFile, existing: Dataset) -> IngestOutcome {
    let PreparedFile { rows, decision, .. } = prepared;
    let total_rows = rows.len();
    let file_date_range = date_range(&rows);
    let file_accounts = account_count(&rows);

    let outcome = dedupe(rows, existing.rows);
    let accounts = aggregate(outcome.added(), existing.accounts, decision.platform);
    let dataset_range = date_range(&outcome.rows);

    let stats = IngestStats {
        total_rows,
        new_rows: outcome.added().len(),
        duplicate_count: outcome.duplicate_count,
        duplicate_ids: outcome.duplicate_ids,
        account_count: file_accounts,
        file_date_range,
        date_range: dataset_range,
        platform: decision.platform,
        platform_warning: decision.warning,
    };
    tracing::info!(
        total_rows = stats.total_rows,
        new_rows = stats.new_rows,
        duplicates = stats.duplicate_count,
        accounts = stats.account_count,
        platform = %stats.platform,
        "file ingested"
    );

    IngestOutcome {
        accounts,
        rows: outcome.rows,
        stats,
    }
}

/// Run the whole pipeline on one file.
///
/// `existing` is only consulted when `options.merge_with_existing` is set;
/// otherwise the result holds this file's data alone.
///
/// # Errors
///
/// See [`prepare`].
pub fn ingest(
    csv_text: &str,
    dictionary: &FieldDictionary,
    existing: Dataset,
    options: &IngestOptions,
) -> Result<IngestOutcome, IngestError> {
    let prepared = prepare(csv_text, dictionary, options)?;
    let base = if options.merge_with_existing {
        existing
    } else {
        Dataset::default()
    };
    Ok(merge(prepared, base))
}

/// Accumulator threaded through a multi-file import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchState {
    pub dataset: Dataset,
    /// Dates of the rows in `dataset`.
    pub date_range: DateRange,
}

impl BatchState {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        let date_range = date_range(&dataset.rows);
        Self {
            dataset,
            date_range,
        }
    }
}

/// One step of a batch import: merge `csv_text` into `state`.
///
/// On failure the returned state is `state` unchanged, so the caller can
/// carry on with the next file.
pub fn ingest_file(
    state: BatchState,
    csv_text: &str,
    dictionary: &FieldDictionary,
    options: &IngestOptions,
) -> (BatchState, Result<IngestStats, IngestError>) {
    let prepared = match prepare(csv_text, dictionary, options) {
        Ok(prepared) => prepared,
        Err(e) => return (state, Err(e)),
    };
    let outcome = merge(prepared, state.dataset);
    let next = BatchState {
        date_range: outcome.stats.date_range,
        dataset: Dataset {
            rows: outcome.rows,
            accounts: outcome.accounts,
        },
    };
    (next, Ok(outcome.stats))
}

/// Coerce numeric text in every field except identity and free-text fields.
pub fn coerce_row(row: &mut CanonicalRow) {
    for (field, value) in row.iter_mut() {
        if !is_text_field(field) {
            *value = coerce(std::mem::replace(value, FieldValue::Null));
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
