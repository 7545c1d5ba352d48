use super::*;

#[test]
fn integral_numbers_render_without_fraction() {
    assert_eq!(FieldValue::Number(123.0).to_text().as_deref(), Some("123"));
    assert_eq!(FieldValue::Number(1.5).to_text().as_deref(), Some("1.5"));
    assert_eq!(FieldValue::Null.to_text(), None);
}

#[test]
fn blank_detects_null_and_whitespace() {
    assert!(FieldValue::Null.is_blank());
    assert!(FieldValue::from("   ").is_blank());
    assert!(!FieldValue::from("x").is_blank());
    assert!(!FieldValue::Number(0.0).is_blank());
}

#[test]
fn row_serializes_as_flat_object() {
    let row: CanonicalRow = [
        ("post_id", FieldValue::from("17")),
        ("views", FieldValue::Number(10.0)),
        ("reach", FieldValue::Null),
    ]
    .into_iter()
    .collect();

    let json = serde_json::to_string(&row).unwrap();
    assert_eq!(json, r#"{"post_id":"17","reach":null,"views":10.0}"#);

    let back: CanonicalRow = serde_json::from_str(&json).unwrap();
    assert_eq!(back, row);
}

#[test]
fn text_skips_blank_values() {
    let mut row = CanonicalRow::new();
    row.insert("account_name", "  ");
    row.insert("account_id", FieldValue::Number(42.0));
    assert_eq!(row.text("account_name"), None);
    assert_eq!(row.text("account_id").as_deref(), Some("42"));
    assert!(row.is_blank("missing"));
}

#[test]
fn lookup_prefers_canonical_then_legacy_alias() {
    let mut row = CanonicalRow::new();
    row.insert("page_id", "legacy");
    assert_eq!(lookup(&row, "account_id"), Some(&FieldValue::from("legacy")));

    row.insert("account_id", "current");
    assert_eq!(lookup(&row, "account_id"), Some(&FieldValue::from("current")));
}

#[test]
fn lookup_skips_blank_canonical_value() {
    let mut row = CanonicalRow::new();
    row.insert("account_name", "");
    row.insert("page_name", "Old page");
    assert_eq!(
        lookup(&row, "account_name"),
        Some(&FieldValue::from("Old page"))
    );
}

#[test]
fn lookup_accepts_borrowed_field_names() {
    let mut row = CanonicalRow::new();
    row.insert("reactions", FieldValue::Number(4.0));
    let field = String::from("likes");
    assert_eq!(lookup(&row, &field), Some(&FieldValue::Number(4.0)));
    assert_eq!(lookup(&row, field.as_str().trim()), Some(&FieldValue::Number(4.0)));
}
