//! Read-only commands and export.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use metamerge_core::fields::{LIKES, VIEWS};
use metamerge_ingest::{
    analyze, export_accounts, export_file_name, export_rows, validate_headers, ExportFormat,
};
use metamerge_store::{DatasetStore, RawTextReader};
use uuid::Uuid;

use crate::App;

async fn read_csv(app: &App, file: &Path) -> anyhow::Result<String> {
    app.reader
        .read_text(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))
}

/// Print headers, a row estimate and the platform classification of `file`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not CSV.
pub(crate) async fn run_analyze(app: &App, file: &Path) -> anyhow::Result<()> {
    let text = read_csv(app, file).await?;
    let analysis = analyze(&text, app.config.preview_rows)?;
    let dictionary = crate::load_dictionary(&app.overrides).await?;

    println!("{} columns, ~{} rows", analysis.headers.len(), analysis.row_count_estimate);
    for header in &analysis.headers {
        match dictionary.resolve(header) {
            Some(canonical) => println!("  {header} -> {canonical}"),
            None => println!("  {header}"),
        }
    }

    let c = &analysis.classification;
    match analysis.platform_guess {
        Some(platform) => println!(
            "platform: {platform} (confidence {:.2}, facebook {:.1}, instagram {:.1})",
            c.confidence, c.facebook_score, c.instagram_score
        ),
        None => println!(
            "platform: unknown (import will assume {:?})",
            app.config.unknown_platform
        ),
    }
    for signal in &c.matched_signals {
        println!("  {:?} {} -> {}", signal.kind, signal.header, signal.platform);
    }

    if !analysis.preview.is_empty() {
        println!("preview:");
        for row in &analysis.preview {
            let cells: Vec<String> = row.iter().map(|(h, v)| format!("{h}={v}")).collect();
            println!("  {}", cells.join(", "));
        }
    }
    Ok(())
}

/// Print which canonical fields the headers of `file` cover.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not CSV.
pub(crate) async fn run_validate(app: &App, file: &Path) -> anyhow::Result<()> {
    let text = read_csv(app, file).await?;
    let analysis = analyze(&text, 0)?;
    let dictionary = crate::load_dictionary(&app.overrides).await?;
    let report = validate_headers(&analysis.headers, &dictionary);

    println!("found:");
    for f in &report.found {
        println!("  {} -> {}", f.header, f.canonical);
    }
    if !report.unknown.is_empty() {
        println!("unknown: {}", report.unknown.join(", "));
    }
    if report.is_valid {
        println!("all fields covered");
    } else {
        println!("missing: {}", report.missing.join(", "));
    }
    Ok(())
}

/// Print per-account sums.
///
/// # Errors
///
/// Returns an error if the stored accounts cannot be loaded.
pub(crate) async fn run_accounts(store: &dyn DatasetStore) -> anyhow::Result<()> {
    let accounts = store.load_accounts().await?;
    if accounts.is_empty() {
        println!("no accounts imported");
        return Ok(());
    }
    println!(
        "{:<20} {:<30} {:<10} {:>6} {:>12} {:>10}",
        "account", "name", "platform", "posts", "views", "likes"
    );
    for a in &accounts {
        println!(
            "{:<20} {:<30} {:<10} {:>6} {:>12} {:>10}",
            a.account_id,
            a.account_name,
            a.platform,
            a.post_count,
            a.metric(VIEWS),
            a.metric(LIKES)
        );
    }
    Ok(())
}

/// Print the import records.
///
/// # Errors
///
/// Returns an error if the import log cannot be loaded.
pub(crate) async fn run_files_list(store: &dyn DatasetStore) -> anyhow::Result<()> {
    let files = store.load_files().await?;
    if files.is_empty() {
        println!("no files imported");
    }
    for f in &files {
        println!(
            "{}  {}  {} ({} rows, {} duplicates, {} accounts) {} imported {}",
            f.id,
            f.filename,
            f.platform,
            f.row_count,
            f.duplicate_count,
            f.account_count,
            f.date_range,
            f.uploaded_at.format("%Y-%m-%d %H:%M"),
        );
    }
    Ok(())
}

/// Remove one import record. The merged rows are left as they are.
///
/// # Errors
///
/// Returns an error if no record has `id` or the import log cannot be written.
pub(crate) async fn run_files_remove(store: &dyn DatasetStore, id: Uuid) -> anyhow::Result<()> {
    if !store.remove_file(id).await? {
        anyhow::bail!("no imported file with id {id}");
    }
    println!("removed file record {id}");
    Ok(())
}

/// Write the dataset (or the account sums) as CSV.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or the output cannot be written.
pub(crate) async fn run_export(
    app: &App,
    output: Option<PathBuf>,
    format: ExportFormat,
    accounts: bool,
) -> anyhow::Result<()> {
    let (csv, count) = if accounts {
        let accounts = app.store.load_accounts().await?;
        (export_accounts(&accounts)?, accounts.len())
    } else {
        let rows = app.store.load_rows().await?;
        let dictionary = crate::load_dictionary(&app.overrides).await?;
        (export_rows(&rows, &dictionary, format)?, rows.len())
    };

    let output = match output {
        Some(path) => path,
        None => {
            let files = app.store.load_files().await?;
            let base = export_file_name(&files, Utc::now().date_naive());
            let suffix = if accounts { " accounts" } else { "" };
            PathBuf::from(format!("{base}{suffix}.csv"))
        }
    };

    tokio::fs::write(&output, csv)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("wrote {count} lines to {}", output.display());
    Ok(())
}
