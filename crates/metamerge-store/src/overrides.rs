use std::path::{Path, PathBuf};

use async_trait::async_trait;
use metamerge_ingest::MappingOverrides;

use crate::{read_optional, write_replace, StoreError};

/// Persistence for the user's column-mapping overrides.
#[async_trait]
pub trait OverrideStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError`] if the stored document cannot be read or parsed.
    async fn load(&self) -> Result<MappingOverrides, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be written.
    async fn save(&self, overrides: &MappingOverrides) -> Result<(), StoreError>;
}

/// Overrides kept in a hand-editable YAML file.
#[derive(Debug, Clone)]
pub struct YamlOverrideStore {
    path: PathBuf,
}

impl YamlOverrideStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OverrideStore for YamlOverrideStore {
    async fn load(&self) -> Result<MappingOverrides, StoreError> {
        let Some(bytes) = read_optional(&self.path).await? else {
            return Ok(MappingOverrides::default());
        };
        let text = String::from_utf8_lossy(&bytes);
        if text.trim().is_empty() {
            return Ok(MappingOverrides::default());
        }
        serde_yaml::from_str(&text).map_err(|source| StoreError::Yaml {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, overrides: &MappingOverrides) -> Result<(), StoreError> {
        let text = serde_yaml::to_string(overrides).map_err(|source| StoreError::Yaml {
            path: self.path.clone(),
            source,
        })?;
        write_replace(&self.path, text.as_bytes()).await?;
        tracing::debug!(
            path = %self.path.display(),
            set = overrides.set.len(),
            removed = overrides.removed.len(),
            "mapping overrides saved"
        );
        Ok(())
    }
}
