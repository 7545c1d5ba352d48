//! CSV ingestion and reconciliation for Meta Business Suite exports.
//!
//! Raw CSV text is classified by platform, mapped to canonical fields
//! through a [`FieldDictionary`], deduplicated against the existing dataset
//! and folded into per-account sums. All of it is synchronous and free of
//! I/O; storage lives in `metamerge-store`.

pub mod aggregate;
pub mod classify;
pub mod coerce;
pub mod csv_codec;
pub mod dedupe;
pub mod defaults;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod mapper;
pub mod normalize;
pub mod pipeline;

pub use classify::{classify, resolve_platform, Classification, PlatformDecision, Signal};
pub use dedupe::{dedupe, identity_key, DedupeOutcome};
pub use dictionary::{FieldDictionary, MappingOverride, MappingOverrides};
pub use error::IngestError;
pub use export::{export_accounts, export_file_name, export_rows, ExportFormat};
pub use normalize::normalize;
pub use pipeline::{
    analyze, ingest, ingest_file, validate_headers, Analysis, BatchState, HeaderReport,
    IngestOptions, IngestOutcome, IngestStats,
};
