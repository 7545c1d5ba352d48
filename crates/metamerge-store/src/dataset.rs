//! The merged dataset as a single JSON document in one directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use metamerge_core::{AccountAggregate, CanonicalRow, Dataset, FileRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{read_optional, remove_if_present, write_replace, StoreError};

const DATASET_FILE: &str = "dataset.json";

/// Persistence for rows, account aggregates and import records.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError`] if stored data cannot be read or decoded.
    async fn load_rows(&self) -> Result<Vec<CanonicalRow>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if stored data cannot be read or decoded.
    async fn load_accounts(&self) -> Result<Vec<AccountAggregate>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if stored data cannot be read or decoded.
    async fn load_files(&self) -> Result<Vec<FileRecord>, StoreError>;

    /// Replace the stored rows and accounts and append `file` to the import log.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if anything cannot be written.
    async fn save_batch(
        &self,
        accounts: &[AccountAggregate],
        rows: &[CanonicalRow],
        file: FileRecord,
    ) -> Result<(), StoreError>;

    /// Drop an import record. Returns `false` if no record has this id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the import log cannot be read or written.
    async fn remove_file(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Delete everything.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a stored file cannot be removed.
    async fn clear(&self) -> Result<(), StoreError>;

    /// Rows and accounts together.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if stored data cannot be read or decoded.
    async fn load_dataset(&self) -> Result<Dataset, StoreError> {
        Ok(Dataset {
            rows: self.load_rows().await?,
            accounts: self.load_accounts().await?,
        })
    }
}

/// Everything [`JsonDatasetStore`] persists, written and replaced as a unit.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredDataset {
    #[serde(default)]
    rows: Vec<CanonicalRow>,
    #[serde(default)]
    accounts: Vec<AccountAggregate>,
    #[serde(default)]
    files: Vec<FileRecord>,
}

/// [`DatasetStore`] backed by `dataset.json`.
///
/// Rows, accounts and the import log share one document. A batch is staged
/// in full and renamed into place once, so readers see either the previous
/// batch or the new one.
#[derive(Debug, Clone)]
pub struct JsonDatasetStore {
    dir: PathBuf,
}

impl JsonDatasetStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn document_path(&self) -> PathBuf {
        self.dir.join(DATASET_FILE)
    }

    async fn read_document(&self) -> Result<StoredDataset, StoreError> {
        let path = self.document_path();
        match read_optional(&path).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map_err(|source| StoreError::Json { path, source }),
            None => Ok(StoredDataset::default()),
        }
    }

    async fn write_document(&self, document: &StoredDataset) -> Result<(), StoreError> {
        let path = self.document_path();
        let bytes = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        write_replace(&path, &bytes).await
    }
}

#[async_trait]
impl DatasetStore for JsonDatasetStore {
    async fn load_rows(&self) -> Result<Vec<CanonicalRow>, StoreError> {
        Ok(self.read_document().await?.rows)
    }

    async fn load_accounts(&self) -> Result<Vec<AccountAggregate>, StoreError> {
        Ok(self.read_document().await?.accounts)
    }

    async fn load_files(&self) -> Result<Vec<FileRecord>, StoreError> {
        Ok(self.read_document().await?.files)
    }

    async fn load_dataset(&self) -> Result<Dataset, StoreError> {
        let document = self.read_document().await?;
        Ok(Dataset {
            rows: document.rows,
            accounts: document.accounts,
        })
    }

    async fn save_batch(
        &self,
        accounts: &[AccountAggregate],
        rows: &[CanonicalRow],
        file: FileRecord,
    ) -> Result<(), StoreError> {
        let mut files = self.read_document().await?.files;
        let file_id = file.id;
        files.push(file);

        let document = StoredDataset {
            rows: rows.to_vec(),
            accounts: accounts.to_vec(),
            files,
        };
        self.write_document(&document).await?;

        tracing::debug!(
            dir = %self.dir.display(),
            %file_id,
            rows = rows.len(),
            accounts = accounts.len(),
            "batch saved"
        );
        Ok(())
    }

    async fn remove_file(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut document = self.read_document().await?;
        let before = document.files.len();
        document.files.retain(|f| f.id != id);
        if document.files.len() == before {
            return Ok(false);
        }
        self.write_document(&document).await?;
        Ok(true)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        remove_if_present(&self.document_path()).await?;
        tracing::info!(dir = %self.dir.display(), "dataset cleared");
        Ok(())
    }
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
