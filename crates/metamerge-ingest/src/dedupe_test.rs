use super::*;

fn post(id: &str, views: f64) -> CanonicalRow {
    let mut row = CanonicalRow::new();
    row.insert("post_id", id);
    row.insert("views", views);
    row
}

fn anonymous(description: &str) -> CanonicalRow {
    let mut row = CanonicalRow::new();
    row.insert("description", description);
    row
}

#[test]
fn identity_uses_post_id_text() {
    assert_eq!(
        identity_key(&post("123", 1.0)),
        IdentityKey::PostId("123".to_string())
    );
    let mut numeric = CanonicalRow::new();
    numeric.insert("post_id", 123.0);
    assert_eq!(identity_key(&numeric), IdentityKey::PostId("123".to_string()));
}

#[test]
fn identity_falls_back_to_legacy_media_id() {
    let mut row = CanonicalRow::new();
    row.insert("media_id", "m-1");
    assert_eq!(identity_key(&row), IdentityKey::PostId("m-1".to_string()));
}

#[test]
fn blank_post_id_uses_content_key() {
    let mut row = anonymous("hello");
    row.insert("post_id", "  ");
    assert!(matches!(identity_key(&row), IdentityKey::Content(_)));
}

#[test]
fn content_key_ignores_insertion_order() {
    let mut a = CanonicalRow::new();
    a.insert("x", "1");
    a.insert("y", "2");
    let mut b = CanonicalRow::new();
    b.insert("y", "2");
    b.insert("x", "1");
    assert_eq!(identity_key(&a), identity_key(&b));
    assert_ne!(identity_key(&a), identity_key(&anonymous("other")));
}

#[test]
fn existing_rows_win_identity_slot() {
    let existing = vec![post("1", 10.0)];
    let new = vec![post("1", 99.0), post("2", 5.0)];
    let outcome = dedupe(new, existing);

    assert_eq!(outcome.rows.len(), 2);
    assert_eq!(outcome.rows[0].get("views"), Some(&FieldValue::Number(10.0)));
    assert_eq!(outcome.duplicate_count, 1);
    assert_eq!(outcome.duplicate_ids, vec!["1".to_string()]);
    assert_eq!(outcome.existing_count, 1);
    assert_eq!(outcome.added().len(), 1);
    assert_eq!(outcome.added()[0].text("post_id").as_deref(), Some("2"));
}

#[test]
fn in_batch_repeats_are_duplicates() {
    let outcome = dedupe(vec![post("1", 1.0), post("1", 2.0), post("2", 3.0)], vec![]);
    assert_eq!(outcome.rows.len(), 2);
    assert_eq!(outcome.duplicate_count, 1);
}

#[test]
fn rows_without_id_dedupe_by_content() {
    let outcome = dedupe(
        vec![anonymous("a"), anonymous("a"), anonymous("b")],
        vec![],
    );
    assert_eq!(outcome.rows.len(), 2);
    assert_eq!(outcome.duplicate_count, 1);
    assert!(outcome.duplicate_ids.is_empty());
}

#[test]
fn existing_repeats_collapse_without_counting() {
    let outcome = dedupe(vec![post("3", 1.0)], vec![post("1", 1.0), post("1", 2.0)]);
    assert_eq!(outcome.existing_count, 1);
    assert_eq!(outcome.duplicate_count, 0);
    assert_eq!(outcome.rows.len(), 2);
}

#[test]
fn output_keeps_existing_then_new_order() {
    let outcome = dedupe(
        vec![post("c", 1.0), post("a", 1.0), post("d", 1.0)],
        vec![post("b", 1.0), post("a", 1.0)],
    );
    let ids: Vec<String> = outcome
        .rows
        .iter()
        .filter_map(|r| r.text("post_id"))
        .collect();
    assert_eq!(ids, vec!["b", "a", "c", "d"]);
}

#[test]
fn second_pass_is_idempotent() {
    let rows = vec![post("1", 1.0), post("2", 2.0), anonymous("x"), post("1", 3.0)];
    let first = dedupe(rows.clone(), vec![]);
    let second = dedupe(rows.clone(), first.rows.clone());
    assert_eq!(second.duplicate_count, rows.len());
    assert!(second.added().is_empty());
    assert_eq!(second.rows, first.rows);
}
