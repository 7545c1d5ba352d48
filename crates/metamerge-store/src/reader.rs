use std::path::Path;

use async_trait::async_trait;

use crate::StoreError;

/// Source of raw CSV text.
#[async_trait]
pub trait RawTextReader: Send + Sync {
    /// Read the whole file at `path` as text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be read.
    async fn read_text(&self, path: &Path) -> Result<String, StoreError>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTextReader;

#[async_trait]
impl RawTextReader for FsTextReader {
    async fn read_text(&self, path: &Path) -> Result<String, StoreError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| StoreError::io(path, e))?;
        Ok(decode_text(bytes))
    }
}

/// Decode file bytes as UTF-8, falling back to Windows-1252 for
/// spreadsheet exports saved in a legacy code page.
#[must_use]
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let bytes = e.into_bytes();
            tracing::debug!(len = bytes.len(), "input is not UTF-8; decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    }
}
