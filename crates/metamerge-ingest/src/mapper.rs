//! Rewrites raw CSV records into canonical rows.

use std::collections::{HashMap, HashSet};

use metamerge_core::fields::{ACCOUNT_ID, ACCOUNT_NAME, DESCRIPTION, PLATFORM, VIEWS};
use metamerge_core::{CanonicalRow, FieldValue, Platform};

use crate::dictionary::FieldDictionary;
use crate::normalize::normalize;

/// One parsed CSV record: `(header, cell)` pairs in column order.
pub type RawRow = Vec<(String, String)>;

/// Fields a platform's export carries under a fixed header. These are
/// applied before dictionary resolution and are never overwritten by it.
fn derivations(platform: Platform) -> &'static [(&'static str, &'static str)] {
    match platform {
        Platform::Facebook => &[
            ("Titel", DESCRIPTION),
            ("Title", DESCRIPTION),
            ("Visningar", VIEWS),
            ("Sid-id", ACCOUNT_ID),
            ("Sidnamn", ACCOUNT_NAME),
        ],
        Platform::Instagram => &[("Bildtext", DESCRIPTION), ("Caption", DESCRIPTION)],
    }
}

/// Map one raw record to canonical fields.
///
/// Every input cell ends up under some key. A column that resolves to a
/// field already set by a platform derivation is kept under its own
/// header. When two ordinary columns resolve to the same field the later
/// one wins and the earlier value moves to its own header. The `platform`
/// tag is written last. Values are not coerced here.
#[must_use]
pub fn map_row(
    raw: &[(String, String)],
    dictionary: &FieldDictionary,
    platform: Platform,
) -> CanonicalRow {
    let mut row = CanonicalRow::new();
    let mut derived: HashSet<&'static str> = HashSet::new();
    let mut consumed = vec![false; raw.len()];

    for &(header, canonical) in derivations(platform) {
        if derived.contains(canonical) {
            continue;
        }
        let wanted = normalize(header);
        if let Some(i) = raw.iter().position(|(h, _)| normalize(h) == wanted) {
            row.insert(canonical, raw[i].1.as_str());
            derived.insert(canonical);
            consumed[i] = true;
        }
    }

    // key -> raw header that wrote it
    let mut writers: HashMap<String, String> = HashMap::new();

    for (i, (header, value)) in raw.iter().enumerate() {
        if consumed[i] {
            continue;
        }
        let resolved = dictionary.resolve(header).unwrap_or(header.as_str());

        if derived.contains(resolved) {
            let key = free_key(&row, header);
            tracing::debug!(
                header = %header,
                field = resolved,
                "field already derived, keeping column under its header"
            );
            row.insert(key.clone(), value.as_str());
            writers.insert(key, header.clone());
            continue;
        }

        if writers.contains_key(resolved) {
            tracing::debug!(field = resolved, kept = %header, "columns collide, later column wins");
            displace(&mut row, &mut writers, resolved);
        }

        row.insert(resolved, value.as_str());
        writers.insert(resolved.to_string(), header.clone());
    }

    displace(&mut row, &mut writers, PLATFORM);
    row.insert(PLATFORM, FieldValue::from(platform.as_str()));
    row
}

/// Move the value a column wrote under `key` to that column's own header.
fn displace(row: &mut CanonicalRow, writers: &mut HashMap<String, String>, key: &str) {
    let Some(previous_header) = writers.remove(key) else {
        return;
    };
    let target = free_key(row, &previous_header);
    if let Some(previous) = row.remove(key) {
        row.insert(target.clone(), previous);
        writers.insert(target, previous_header);
    }
}

/// `base`, or `base_2`, `base_3`, ... whichever is not yet a key in `row`.
fn free_key(row: &CanonicalRow, base: &str) -> String {
    if !row.contains(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}_{n}"))
        .find(|k| !row.contains(k))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
