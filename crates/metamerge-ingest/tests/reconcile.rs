//! End-to-end behaviour of repeated imports.

use metamerge_core::{Dataset, FieldValue, Platform};
use metamerge_ingest::{
    dedupe, ingest, ingest_file, normalize, validate_headers, BatchState, FieldDictionary,
    IngestOptions,
};

const FIRST_EXPORT: &str = "\
Publicerings-id,Sid-id,Sidnamn,Visningar,Reaktioner
1,10,Page Ten,100,5
2,10,Page Ten,200,6
3,10,Page Ten,300,7
";

const SECOND_EXPORT: &str = "\
Publicerings-id,Sid-id,Sidnamn,Visningar,Reaktioner
3,10,Page Ten,999,99
4,10,Page Ten,400,8
";

fn merge_options() -> IngestOptions {
    IngestOptions {
        merge_with_existing: true,
        ..IngestOptions::default()
    }
}

#[test]
fn second_import_drops_repeated_post() {
    let dict = FieldDictionary::with_defaults();

    let first = ingest(FIRST_EXPORT, &dict, Dataset::default(), &merge_options()).unwrap();
    assert_eq!(first.rows.len(), 3);

    let existing = Dataset {
        rows: first.rows,
        accounts: first.accounts,
    };
    let second = ingest(SECOND_EXPORT, &dict, existing, &merge_options()).unwrap();

    assert_eq!(second.rows.len(), 4);
    assert_eq!(second.stats.duplicate_count, 1);
    assert_eq!(second.stats.duplicate_ids, vec!["3".to_string()]);
    assert_eq!(second.stats.new_rows, 1);

    let retained = second
        .rows
        .iter()
        .find(|r| r.text("post_id").as_deref() == Some("3"))
        .unwrap();
    assert_eq!(retained.get("views"), Some(&FieldValue::Number(300.0)));

    let account = &second.accounts[0];
    assert_eq!(second.accounts.len(), 1);
    assert_eq!(account.platform, Platform::Facebook);
    assert!((account.metric("views") - 1000.0).abs() < f64::EPSILON);
    assert!((account.metric("likes") - 26.0).abs() < f64::EPSILON);
    assert_eq!(account.post_count, 4);
}

#[test]
fn batch_fold_matches_single_imports() {
    let dict = FieldDictionary::with_defaults();
    let (state, _) = ingest_file(BatchState::default(), FIRST_EXPORT, &dict, &merge_options());
    let (state, stats) = ingest_file(state, SECOND_EXPORT, &dict, &merge_options());

    let stats = stats.unwrap();
    assert_eq!(stats.duplicate_count, 1);
    assert_eq!(state.dataset.rows.len(), 4);
    let views: f64 = state.dataset.accounts.iter().map(|a| a.metric("views")).sum();
    assert!((views - 1000.0).abs() < f64::EPSILON);
}

#[test]
fn reimporting_the_same_file_adds_nothing() {
    let dict = FieldDictionary::with_defaults();
    let first = ingest(FIRST_EXPORT, &dict, Dataset::default(), &merge_options()).unwrap();
    let existing = Dataset {
        rows: first.rows.clone(),
        accounts: first.accounts.clone(),
    };
    let again = ingest(FIRST_EXPORT, &dict, existing, &merge_options()).unwrap();
    assert_eq!(again.stats.duplicate_count, 3);
    assert_eq!(again.stats.new_rows, 0);
    assert_eq!(again.rows, first.rows);
    assert_eq!(again.accounts, first.accounts);
}

#[test]
fn dedupe_second_pass_reports_every_row() {
    let dict = FieldDictionary::with_defaults();
    let rows = ingest(FIRST_EXPORT, &dict, Dataset::default(), &merge_options())
        .unwrap()
        .rows;
    let once = dedupe(rows.clone(), Vec::new());
    let twice = dedupe(rows.clone(), once.rows);
    assert_eq!(twice.duplicate_count, rows.len());
    assert!(twice.added().is_empty());
}

#[test]
fn import_order_does_not_change_sums() {
    let dict = FieldDictionary::with_defaults();
    let forward = {
        let (s, _) = ingest_file(BatchState::default(), FIRST_EXPORT, &dict, &merge_options());
        ingest_file(s, SECOND_EXPORT, &dict, &merge_options()).0
    };
    let backward = {
        let (s, _) = ingest_file(BatchState::default(), SECOND_EXPORT, &dict, &merge_options());
        ingest_file(s, FIRST_EXPORT, &dict, &merge_options()).0
    };
    assert_eq!(forward.dataset.rows.len(), backward.dataset.rows.len());
    // Post 3 differs between the files; whichever import came first keeps it.
    let views = |s: &BatchState| s.dataset.accounts[0].metric("views");
    assert!((views(&forward) - 1000.0).abs() < f64::EPSILON);
    assert!((views(&backward) - 1699.0).abs() < f64::EPSILON);
}

#[test]
fn equally_normalized_headers_resolve_alike() {
    let dict = FieldDictionary::with_defaults();
    for (raw, _) in dict.entries() {
        let variants = [
            raw.to_uppercase(),
            format!("  {raw}  "),
            format!("\u{FEFF}{raw}"),
            raw.replace(' ', "\u{00A0}"),
        ];
        for variant in &variants {
            assert_eq!(normalize(variant), normalize(raw));
            assert_eq!(dict.resolve(variant), dict.resolve(raw), "variant {variant:?}");
        }
    }
}

#[test]
fn missing_post_id_column_is_reported() {
    let dict = FieldDictionary::with_defaults();
    let report = validate_headers(&["Sid-id", "Sidnamn", "Visningar", "Reaktioner"], &dict);
    assert!(!report.is_valid);
    assert!(report.missing.iter().any(|m| m == "post_id"));
}
