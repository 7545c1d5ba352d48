//! Multi-file import.
//!
//! Files are folded into the dataset one at a time. Each file is persisted as
//! soon as its own batch is merged, and a file that cannot be read or parsed
//! is logged and skipped so the rest of the batch still lands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use metamerge_core::{Dataset, FileRecord, Platform, UnknownPlatformPolicy};
use metamerge_ingest::{ingest_file, BatchState, FieldDictionary, IngestOptions, IngestStats};
use metamerge_store::{DatasetStore, RawTextReader};
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ImportOptions {
    pub platform: Option<Platform>,
    pub fresh: bool,
    pub dry_run: bool,
    pub unknown_platform: UnknownPlatformPolicy,
}

/// Result of a batch: the records of the files that made it in and the
/// names of the ones that did not.
#[derive(Debug, Default)]
pub(crate) struct ImportSummary {
    pub imported: Vec<FileRecord>,
    pub failed: Vec<String>,
    pub state: BatchState,
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

fn file_record(filename: String, stats: &IngestStats) -> FileRecord {
    FileRecord {
        id: Uuid::new_v4(),
        filename,
        row_count: stats.total_rows,
        duplicate_count: stats.duplicate_count,
        account_count: stats.account_count,
        date_range: stats.file_date_range,
        platform: stats.platform,
        uploaded_at: Utc::now(),
    }
}

/// Import `files` in order into the stored dataset.
///
/// # Errors
///
/// Returns an error if the stored dataset cannot be loaded or written, or if
/// every file in the batch failed. Failures of individual files are logged
/// and skipped.
pub(crate) async fn run_import(
    reader: &dyn RawTextReader,
    store: &dyn DatasetStore,
    dictionary: &FieldDictionary,
    files: &[PathBuf],
    options: ImportOptions,
) -> anyhow::Result<ImportSummary> {
    // A fresh import clears the store only once a file is ready to be saved.
    let mut pending_clear = options.fresh && !options.dry_run;
    let (existing, mut known) = if options.fresh {
        (Dataset::default(), Vec::new())
    } else {
        let dataset = store
            .load_dataset()
            .await
            .context("failed to load stored dataset")?;
        let files = store
            .load_files()
            .await
            .context("failed to load import records")?;
        (dataset, files)
    };

    let ingest_options = IngestOptions {
        merge_with_existing: true,
        platform_hint: options.platform,
        unknown_platform: options.unknown_platform,
    };

    let mut summary = ImportSummary {
        state: BatchState::new(existing),
        ..ImportSummary::default()
    };

    for path in files {
        let name = display_name(path);
        if known.iter().any(|f| f.filename == name) {
            tracing::warn!(file = %name, "a file with this name was imported before");
        }

        let text = match reader.read_text(path).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(file = %name, error = %e, "skipping unreadable file");
                summary.failed.push(name);
                continue;
            }
        };

        let (state, result) = ingest_file(
            std::mem::take(&mut summary.state),
            &text,
            dictionary,
            &ingest_options,
        );
        summary.state = state;

        let stats = match result {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(file = %name, error = %e, "skipping file that failed to ingest");
                summary.failed.push(name);
                continue;
            }
        };

        if let Some(warning) = &stats.platform_warning {
            println!("{name}: {warning}");
        }
        println!(
            "{name}: {} rows, {} new, {} duplicates, {} accounts, {} ({})",
            stats.total_rows,
            stats.new_rows,
            stats.duplicate_count,
            stats.account_count,
            stats.platform,
            stats.file_date_range,
        );

        let record = file_record(name, &stats);
        if !options.dry_run {
            if pending_clear {
                store.clear().await.context("failed to clear dataset")?;
                pending_clear = false;
            }
            let dataset = &summary.state.dataset;
            store
                .save_batch(&dataset.accounts, &dataset.rows, record.clone())
                .await
                .with_context(|| format!("failed to save dataset after {}", record.filename))?;
        }
        known.push(record.clone());
        summary.imported.push(record);
    }

    if !summary.failed.is_empty() {
        tracing::warn!(
            failed_files = summary.failed.len(),
            total_files = files.len(),
            "some files failed to import"
        );
    }
    if !files.is_empty() && summary.failed.len() == files.len() {
        anyhow::bail!("all {} files failed to import", files.len());
    }

    let dataset = &summary.state.dataset;
    println!(
        "{}dataset: {} rows, {} accounts, {}",
        if options.dry_run { "dry-run: " } else { "" },
        dataset.rows.len(),
        dataset.accounts.len(),
        summary.state.date_range,
    );
    Ok(summary)
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
