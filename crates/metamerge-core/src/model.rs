use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fields::SUMMARIZABLE_METRICS;
use crate::platform::Platform;
use crate::row::CanonicalRow;

/// Running totals for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAggregate {
    pub account_id: String,
    pub account_name: String,
    pub account_username: String,
    pub platform: Platform,
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub post_count: u64,
}

impl AccountAggregate {
    /// New aggregate with every summarizable metric at zero.
    #[must_use]
    pub fn new(
        account_id: impl Into<String>,
        account_name: impl Into<String>,
        account_username: impl Into<String>,
        platform: Platform,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            account_name: account_name.into(),
            account_username: account_username.into(),
            platform,
            metrics: SUMMARIZABLE_METRICS
                .iter()
                .map(|m| ((*m).to_string(), 0.0))
                .collect(),
            post_count: 0,
        }
    }

    #[must_use]
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).copied().unwrap_or(0.0)
    }

    pub fn add(&mut self, name: &str, amount: f64) {
        *self.metrics.entry(name.to_string()).or_insert(0.0) += amount;
    }
}

/// Inclusive span of calendar dates. Both ends are `None` until a date is observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn observe(&mut self, date: NaiveDate) {
        self.start = Some(self.start.map_or(date, |s| s.min(date)));
        self.end = Some(self.end.map_or(date, |e| e.max(date)));
    }

    #[must_use]
    pub fn merge(self, other: DateRange) -> DateRange {
        let mut merged = self;
        if let Some(start) = other.start {
            merged.observe(start);
        }
        if let Some(end) = other.end {
            merged.observe(end);
        }
        merged
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(
                f,
                "{} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            _ => f.write_str("no dates"),
        }
    }
}

/// Metadata recorded for every imported file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub filename: String,
    pub row_count: usize,
    pub duplicate_count: usize,
    pub account_count: usize,
    pub date_range: DateRange,
    pub platform: Platform,
    pub uploaded_at: DateTime<Utc>,
}

/// The merged, deduplicated dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub rows: Vec<CanonicalRow>,
    pub accounts: Vec<AccountAggregate>,
}
