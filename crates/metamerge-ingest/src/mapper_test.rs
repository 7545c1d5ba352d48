use super::*;

fn raw(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(h, v)| ((*h).to_string(), (*v).to_string()))
        .collect()
}

fn text(row: &CanonicalRow, field: &str) -> Option<String> {
    row.get(field).and_then(FieldValue::to_text)
}

#[test]
fn maps_known_headers_and_passes_unknown_through() {
    let dict = FieldDictionary::with_defaults();
    let row = map_row(
        &raw(&[
            ("Publicerings-id", "111"),
            ("Reaktioner", "5"),
            ("Egen kolumn", "x"),
        ]),
        &dict,
        Platform::Facebook,
    );
    assert_eq!(text(&row, "post_id").as_deref(), Some("111"));
    assert_eq!(text(&row, "likes").as_deref(), Some("5"));
    assert_eq!(text(&row, "Egen kolumn").as_deref(), Some("x"));
    assert_eq!(text(&row, "platform").as_deref(), Some("facebook"));
}

#[test]
fn values_are_not_coerced() {
    let dict = FieldDictionary::with_defaults();
    let row = map_row(&raw(&[("Reaktioner", "5")]), &dict, Platform::Facebook);
    assert_eq!(row.get("likes"), Some(&FieldValue::from("5")));
}

#[test]
fn facebook_title_wins_over_description() {
    let dict = FieldDictionary::with_defaults();
    let row = map_row(
        &raw(&[("Beskrivning", "generic"), ("Titel", "the title")]),
        &dict,
        Platform::Facebook,
    );
    assert_eq!(text(&row, "description").as_deref(), Some("the title"));
    assert_eq!(text(&row, "Beskrivning").as_deref(), Some("generic"));
}

#[test]
fn instagram_caption_becomes_description() {
    let dict = FieldDictionary::with_defaults();
    let row = map_row(
        &raw(&[("Inläggs-ID", "9"), ("Bildtext", "hello")]),
        &dict,
        Platform::Instagram,
    );
    assert_eq!(text(&row, "description").as_deref(), Some("hello"));
    assert_eq!(text(&row, "platform").as_deref(), Some("instagram"));
}

#[test]
fn facebook_derivations_ignore_remapped_dictionary() {
    let mut dict = FieldDictionary::with_defaults();
    dict.set_override("Visningar", "reach").unwrap();
    let row = map_row(&raw(&[("Visningar", "100")]), &dict, Platform::Facebook);
    assert_eq!(text(&row, "views").as_deref(), Some("100"));
    assert!(!row.contains("reach"));
}

#[test]
fn later_column_wins_collision_and_earlier_is_kept() {
    let dict = FieldDictionary::with_defaults();
    let row = map_row(
        &raw(&[("Reactions", "1"), ("Reaktioner", "2")]),
        &dict,
        Platform::Facebook,
    );
    assert_eq!(text(&row, "likes").as_deref(), Some("2"));
    assert_eq!(text(&row, "Reactions").as_deref(), Some("1"));
}

#[test]
fn duplicate_headers_keep_every_value() {
    let dict = FieldDictionary::with_defaults();
    let row = map_row(
        &raw(&[("Extra", "a"), ("Extra", "b")]),
        &dict,
        Platform::Facebook,
    );
    assert_eq!(text(&row, "Extra").as_deref(), Some("b"));
    assert_eq!(text(&row, "Extra_2").as_deref(), Some("a"));
}

#[test]
fn every_input_value_survives() {
    let dict = FieldDictionary::with_defaults();
    let input = raw(&[
        ("Publicerings-id", "1"),
        ("Titel", "t"),
        ("Beskrivning", "d"),
        ("Reactions", "3"),
        ("Reaktioner", "4"),
        ("platform", "tiktok"),
        ("Okänd", "z"),
    ]);
    let row = map_row(&input, &dict, Platform::Facebook);
    let values: Vec<String> = row.iter().filter_map(|(_, v)| v.to_text()).collect();
    for (_, value) in &input {
        assert!(values.contains(value), "value {value} was dropped");
    }
    assert_eq!(text(&row, "platform").as_deref(), Some("facebook"));
}
