//! Existence and size of opaque artifacts (plots, rendered reports)

use crate::error::{InspectError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileFacts {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl FileFacts {
    /// Stat a single file. Contents are never read.
    pub fn stat(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| InspectError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
        })
    }

    pub fn collect<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Self>> {
        paths.iter().map(|p| Self::stat(p.as_ref())).collect()
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Byte count in B / KB / MB, base 1024
pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
