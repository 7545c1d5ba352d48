//! Shared data model and configuration for the metamerge workspace.

pub mod app_config;
pub mod config;
pub mod fields;
pub mod model;
pub mod platform;
pub mod row;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use model::{AccountAggregate, Dataset, DateRange, FileRecord};
pub use platform::{Platform, UnknownPlatformPolicy};
pub use row::{lookup, CanonicalRow, FieldValue};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
