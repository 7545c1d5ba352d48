use std::path::PathBuf;

use crate::platform::UnknownPlatformPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory holding the persisted dataset (`dataset.json`).
    pub data_dir: PathBuf,
    /// YAML file with the user's column-mapping overrides.
    pub mappings_path: PathBuf,
    /// What to do when neither platform's headers are recognized.
    pub unknown_platform: UnknownPlatformPolicy,
    /// Number of data rows sampled by `analyze`.
    pub preview_rows: usize,
}
