// src/export/writer.rs
//! Executes filesystem output by performing actual I/O.
//!
//! This module is the only place where export files are written, keeping
//! the rest of the codebase pure and testable.

use crate::constants::ATTACHMENTS_DIR_NAME;
use crate::error::AppError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The export directory tree for one run, derived once from configuration
/// and threaded explicitly into every stage that writes.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    export_dir: PathBuf,
    attachments_dir: PathBuf,
}

impl ExportPaths {
    /// Creates the export directory and its attachments subdirectory.
    ///
    /// Existing directories are reused; a re-run overwrites same-named
    /// files rather than merging or cleaning up.
    pub fn prepare(export_dir: &Path) -> Result<Self, AppError> {
        let attachments_dir = export_dir.join(ATTACHMENTS_DIR_NAME);
        fs::create_dir_all(&attachments_dir)?;
        log::info!("Export directory ready: {}", export_dir.display());

        Ok(Self {
            export_dir: export_dir.to_path_buf(),
            attachments_dir,
        })
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn attachments_dir(&self) -> &Path {
        &self.attachments_dir
    }

    /// Path of a top-level export file such as `articles.json`.
    pub fn export_file(&self, name: &str) -> PathBuf {
        self.export_dir.join(name)
    }

    /// Path of a downloaded attachment under the attachments subdirectory.
    pub fn attachment_file(&self, filename: &str) -> PathBuf {
        self.attachments_dir.join(filename)
    }
}

/// Writes a value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let content = serde_json::to_string_pretty(value)?;
    log::debug!("Writing {} bytes to {}", content.len(), path.display());
    fs::write(path, content)?;
    log::info!("Wrote file: {}", path.display());
    Ok(())
}

/// Writes raw attachment bytes.
pub fn write_binary(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    log::debug!("Writing {} bytes to {}", bytes.len(), path.display());
    fs::write(path, bytes)?;
    Ok(())
}
