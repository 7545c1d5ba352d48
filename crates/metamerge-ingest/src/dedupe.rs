//! Duplicate elimination across imports.

use std::collections::HashSet;

use metamerge_core::fields::POST_ID;
use metamerge_core::{lookup, CanonicalRow, FieldValue};
use sha2::{Digest, Sha256};

/// What decides that two rows describe the same post.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    PostId(String),
    /// SHA-256 of the row's JSON form, for rows without a post id.
    Content(String),
}

impl IdentityKey {
    #[must_use]
    pub fn post_id(&self) -> Option<&str> {
        match self {
            IdentityKey::PostId(id) => Some(id),
            IdentityKey::Content(_) => None,
        }
    }
}

/// Identity of a row: its post id as text, or a digest of its full content.
#[must_use]
pub fn identity_key(row: &CanonicalRow) -> IdentityKey {
    if let Some(id) = lookup(row, POST_ID).and_then(FieldValue::to_text) {
        let id = id.trim();
        if !id.is_empty() {
            return IdentityKey::PostId(id.to_string());
        }
    }
    // Keys serialize in sorted order, so equal content gives equal bytes.
    let bytes = serde_json::to_vec(row).unwrap_or_default();
    IdentityKey::Content(format!("{:x}", Sha256::digest(&bytes)))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupeOutcome {
    /// Existing rows first, then the retained new rows, each in input order.
    pub rows: Vec<CanonicalRow>,
    /// Number of leading entries of `rows` that came from the existing set.
    pub existing_count: usize,
    pub duplicate_count: usize,
    /// Post ids of discarded new rows. Content-keyed duplicates have no id.
    pub duplicate_ids: Vec<String>,
}

impl DedupeOutcome {
    /// The new rows that survived deduplication.
    #[must_use]
    pub fn added(&self) -> &[CanonicalRow] {
        &self.rows[self.existing_count..]
    }
}

/// Merge `new_rows` into `existing_rows`, first seen wins.
///
/// Existing rows claim their identity slots first, so a new row never
/// replaces stored data. Repeats inside `existing_rows` collapse to their
/// first occurrence without counting as duplicates of this import.
#[must_use]
pub fn dedupe(new_rows: Vec<CanonicalRow>, existing_rows: Vec<CanonicalRow>) -> DedupeOutcome {
    let capacity = existing_rows.len() + new_rows.len();
    let mut seen: HashSet<IdentityKey> = HashSet::with_capacity(capacity);
    let mut rows = Vec::with_capacity(capacity);

    let existing_total = existing_rows.len();
    for row in existing_rows {
        if seen.insert(identity_key(&row)) {
            rows.push(row);
        }
    }
    if rows.len() < existing_total {
        tracing::debug!(
            collapsed = existing_total - rows.len(),
            "existing dataset contained repeated rows"
        );
    }
    let existing_count = rows.len();

    let mut duplicate_count = 0;
    let mut duplicate_ids = Vec::new();
    for row in new_rows {
        let key = identity_key(&row);
        if seen.contains(&key) {
            duplicate_count += 1;
            if let Some(id) = key.post_id() {
                duplicate_ids.push(id.to_string());
            }
            continue;
        }
        seen.insert(key);
        rows.push(row);
    }

    DedupeOutcome {
        rows,
        existing_count,
        duplicate_count,
        duplicate_ids,
    }
}

#[cfg(test)]
#[path = "dedupe_test.rs"]
mod tests;
