//! JSON export of the configuration document.

use crate::document::PageConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name the exported document is written to.
pub const EXPORT_FILE_NAME: &str = "flextree-config.json";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

impl PageConfig {
    /// Serialize to pretty-printed JSON (2-space indent).
    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously exported document.
    pub fn from_json(json: &str) -> ExportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Write the document to `<dir>/flextree-config.json`, creating `dir` if needed.
///
/// Returns the path of the written file.
pub fn export_to_dir(config: &PageConfig, dir: &Path) -> ExportResult<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            ExportError::Io(format!("Failed to create export directory: {}", e))
        })?;
    }
    let path = dir.join(EXPORT_FILE_NAME);
    let json = config.to_json()?;
    fs::write(&path, json)
        .map_err(|e| ExportError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    log::info!("Exported configuration to {}", path.display());
    Ok(path)
}
