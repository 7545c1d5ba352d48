use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(
        "header \"{raw}\" conflicts with existing mapping \"{existing_raw}\" -> {existing_canonical}; remove it first"
    )]
    MappingConflict {
        raw: String,
        existing_raw: String,
        existing_canonical: String,
    },

    #[error("CSV parse error at line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("platform could not be determined from headers: {headers}")]
    UnknownPlatform { headers: String },

    #[error("CSV write error: {0}")]
    Write(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
