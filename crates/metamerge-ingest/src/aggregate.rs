//! Per-account metric sums and publish-date ranges.

use std::collections::{HashMap, HashSet};

use metamerge_core::fields::{
    ACCOUNT_ID, ACCOUNT_NAME, ACCOUNT_USERNAME, PLATFORM, PUBLISH_TIME, SUMMARIZABLE_METRICS,
};
use metamerge_core::{lookup, AccountAggregate, CanonicalRow, DateRange, FieldValue, Platform};

use crate::coerce::{as_number, parse_date};

/// Account id used for rows that carry none.
pub const UNKNOWN_ACCOUNT_ID: &str = "unknown";
/// Display name used when a row has no account name.
pub const UNKNOWN_ACCOUNT_NAME: &str = "Unknown account";

#[must_use]
pub fn account_id(row: &CanonicalRow) -> String {
    field_text(row, ACCOUNT_ID).unwrap_or_else(|| UNKNOWN_ACCOUNT_ID.to_string())
}

/// Fold `rows` into `prior`, adding each row's metrics to its account.
///
/// Accounts keep their prior order; accounts first seen in `rows` follow in
/// first-seen order. Non-numeric metric cells contribute nothing. A row's
/// platform tag decides the platform of a new account, falling back to
/// `platform`.
#[must_use]
pub fn aggregate(
    rows: &[CanonicalRow],
    prior: Vec<AccountAggregate>,
    platform: Platform,
) -> Vec<AccountAggregate> {
    let mut accounts = prior;
    let mut index: HashMap<String, usize> = accounts
        .iter()
        .enumerate()
        .map(|(i, a)| (a.account_id.clone(), i))
        .collect();

    for row in rows {
        let id = account_id(row);
        let slot = match index.get(&id) {
            Some(&i) => i,
            None => {
                let row_platform = field_text(row, PLATFORM)
                    .and_then(|p| p.parse::<Platform>().ok())
                    .unwrap_or(platform);
                accounts.push(AccountAggregate::new(
                    id.clone(),
                    field_text(row, ACCOUNT_NAME)
                        .unwrap_or_else(|| UNKNOWN_ACCOUNT_NAME.to_string()),
                    field_text(row, ACCOUNT_USERNAME).unwrap_or_default(),
                    row_platform,
                ));
                index.insert(id, accounts.len() - 1);
                accounts.len() - 1
            }
        };

        let account = &mut accounts[slot];
        if account.account_name == UNKNOWN_ACCOUNT_NAME {
            if let Some(name) = field_text(row, ACCOUNT_NAME) {
                account.account_name = name;
            }
        }
        if account.account_username.is_empty() {
            if let Some(username) = field_text(row, ACCOUNT_USERNAME) {
                account.account_username = username;
            }
        }

        for metric in SUMMARIZABLE_METRICS {
            if let Some(value) = lookup(row, metric).and_then(as_number) {
                account.add(metric, value);
            }
        }
        account.post_count += 1;
    }

    accounts
}

/// Earliest and latest publish date over `rows`. Unparseable dates are skipped.
#[must_use]
pub fn date_range<'a>(rows: impl IntoIterator<Item = &'a CanonicalRow>) -> DateRange {
    let mut range = DateRange::default();
    for date in rows
        .into_iter()
        .filter_map(|row| lookup(row, PUBLISH_TIME).and_then(parse_date))
    {
        range.observe(date);
    }
    range
}

/// Distinct accounts among `rows`; rows without an account id count as one.
#[must_use]
pub fn account_count(rows: &[CanonicalRow]) -> usize {
    rows.iter().map(account_id).collect::<HashSet<_>>().len()
}

fn field_text(row: &CanonicalRow, field: &str) -> Option<String> {
    lookup(row, field)
        .and_then(FieldValue::to_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
