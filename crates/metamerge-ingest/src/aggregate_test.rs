use chrono::NaiveDate;

use super::*;

fn row(account: Option<&str>, views: &str, likes: f64, published: &str) -> CanonicalRow {
    let mut row = CanonicalRow::new();
    if let Some(account) = account {
        row.insert("account_id", account);
        row.insert("account_name", format!("Page {account}"));
    }
    row.insert("views", views);
    row.insert("likes", likes);
    row.insert("reach", 1000.0);
    row.insert("publish_time", published);
    row
}

fn sums(accounts: &[AccountAggregate], id: &str) -> (f64, f64, u64) {
    let account = accounts
        .iter()
        .find(|a| a.account_id == id)
        .unwrap_or_else(|| panic!("account {id} missing"));
    (account.metric("views"), account.metric("likes"), account.post_count)
}

#[test]
fn sums_metrics_per_account() {
    let rows = vec![
        row(Some("1"), "10", 1.0, "2024-01-01"),
        row(Some("1"), "5", 2.0, "2024-01-02"),
        row(Some("2"), "7", 3.0, "2024-01-03"),
    ];
    let accounts = aggregate(&rows, Vec::new(), Platform::Facebook);
    assert_eq!(accounts.len(), 2);
    assert_eq!(sums(&accounts, "1"), (15.0, 3.0, 2));
    assert_eq!(sums(&accounts, "2"), (7.0, 3.0, 1));
    assert_eq!(accounts[0].account_name, "Page 1");
}

#[test]
fn reach_is_never_summed() {
    let rows = vec![row(Some("1"), "1", 1.0, ""), row(Some("1"), "1", 1.0, "")];
    let accounts = aggregate(&rows, Vec::new(), Platform::Facebook);
    assert!(!accounts[0].metrics.contains_key("reach"));
}

#[test]
fn non_numeric_values_contribute_nothing() {
    let rows = vec![
        row(Some("1"), "n/a", 1.0, ""),
        row(Some("1"), "", 1.0, ""),
        row(Some("1"), "4", 1.0, ""),
    ];
    let accounts = aggregate(&rows, Vec::new(), Platform::Facebook);
    assert_eq!(sums(&accounts, "1"), (4.0, 3.0, 3));
}

#[test]
fn rows_without_account_use_unknown_sentinel() {
    let rows = vec![row(None, "3", 0.0, "")];
    let accounts = aggregate(&rows, Vec::new(), Platform::Instagram);
    assert_eq!(accounts[0].account_id, UNKNOWN_ACCOUNT_ID);
    assert_eq!(accounts[0].account_name, UNKNOWN_ACCOUNT_NAME);
    assert_eq!(accounts[0].account_username, "");
    assert_eq!(accounts[0].platform, Platform::Instagram);
}

#[test]
fn platform_tag_decides_new_account_platform() {
    let mut tagged = row(Some("9"), "1", 1.0, "");
    tagged.insert("platform", "instagram");
    let accounts = aggregate(&[tagged], Vec::new(), Platform::Facebook);
    assert_eq!(accounts[0].platform, Platform::Instagram);
}

#[test]
fn resumes_from_prior_sums() {
    let mut prior = AccountAggregate::new("1", "Page 1", "", Platform::Facebook);
    prior.add("views", 100.0);
    prior.post_count = 4;
    let accounts = aggregate(
        &[row(Some("1"), "5", 1.0, "")],
        vec![prior],
        Platform::Facebook,
    );
    assert_eq!(sums(&accounts, "1"), (105.0, 1.0, 5));
}

#[test]
fn split_batches_match_single_batch() {
    let rows = vec![
        row(Some("1"), "10", 1.0, ""),
        row(Some("1"), "20", 2.0, ""),
        row(Some("1"), "30", 3.0, ""),
        row(Some("1"), "40", 4.0, ""),
    ];
    let whole = aggregate(&rows, Vec::new(), Platform::Facebook);

    let first = aggregate(&rows[2..], Vec::new(), Platform::Facebook);
    let split = aggregate(&rows[..2], first, Platform::Facebook);

    assert_eq!(sums(&whole, "1"), sums(&split, "1"));
}

#[test]
fn legacy_field_names_are_summed() {
    let mut legacy = CanonicalRow::new();
    legacy.insert("page_id", "77");
    legacy.insert("reactions", 6.0);
    legacy.insert("impressions", "12");
    let accounts = aggregate(&[legacy], Vec::new(), Platform::Facebook);
    assert_eq!(sums(&accounts, "77"), (12.0, 6.0, 1));
}

#[test]
fn date_range_skips_unparseable_dates() {
    let rows = vec![
        row(Some("1"), "1", 1.0, "2024-03-15 10:00"),
        row(Some("1"), "1", 1.0, "not a date"),
        row(Some("1"), "1", 1.0, "01/02/2024 08:00"),
    ];
    let range = date_range(&rows);
    assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 1, 2));
    assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 3, 15));
}

#[test]
fn account_count_includes_unknown_once() {
    let rows = vec![
        row(Some("1"), "1", 1.0, ""),
        row(None, "1", 1.0, ""),
        row(None, "1", 1.0, ""),
        row(Some("2"), "1", 1.0, ""),
    ];
    assert_eq!(account_count(&rows), 3);
}
