//! Artifact data model
//!
//! Everything here describes files produced by the external simulation.
//! None of these types can write back to disk.

pub mod document;
pub mod handover;

pub use document::{
    HandoverEvent, MecService, SimulationDocument, SimulationMetadata, TrainingEpisode,
};
pub use handover::{HandoverOutcome, HandoverRecord, HandoverRow};

use crate::error::{InspectError, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Kinds of output artifact the simulation can leave behind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Relational snapshot (SQLite)
    Database,
    /// Structured document (JSON)
    Document,
    /// Tabular records (CSV)
    Table,
    /// Plot or chart
    Image,
    /// Rendered report
    Report,
}

impl ArtifactKind {
    /// Infer the kind from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "db" | "sqlite" | "sqlite3" => Some(Self::Database),
            "json" => Some(Self::Document),
            "csv" => Some(Self::Table),
            "png" | "jpg" | "jpeg" | "svg" => Some(Self::Image),
            "html" | "md" | "txt" | "pdf" => Some(Self::Report),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Database => "database",
            Self::Document => "JSON document",
            Self::Table => "CSV table",
            Self::Image => "image",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A file on disk produced by the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct OutputArtifact {
    path: PathBuf,
    created: SystemTime,
    kind: ArtifactKind,
}

impl OutputArtifact {
    /// Describe an existing file, inferring its kind from the extension
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let kind = ArtifactKind::from_path(&path)
            .ok_or_else(|| InspectError::UnknownFormat(path.clone()))?;
        Self::with_kind(path, kind)
    }

    /// Describe an existing file of a known kind
    pub fn with_kind(path: impl Into<PathBuf>, kind: ArtifactKind) -> Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path).map_err(|e| InspectError::io(&path, e))?;
        let created = creation_time(&metadata);
        Ok(Self { path, created, kind })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn created(&self) -> SystemTime {
        self.created
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Creation time in local time, for display
    pub fn created_local(&self) -> DateTime<Local> {
        DateTime::<Local>::from(self.created)
    }
}

/// Birth time where the platform records one, modification time otherwise
pub(crate) fn creation_time(metadata: &fs::Metadata) -> SystemTime {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(ArtifactKind::from_path(Path::new("run.db")), Some(ArtifactKind::Database));
        assert_eq!(ArtifactKind::from_path(Path::new("a/b/sim.JSON")), Some(ArtifactKind::Document));
        assert_eq!(ArtifactKind::from_path(Path::new("handovers.csv")), Some(ArtifactKind::Table));
        assert_eq!(ArtifactKind::from_path(Path::new("latency.png")), Some(ArtifactKind::Image));
        assert_eq!(ArtifactKind::from_path(Path::new("final_report.md")), Some(ArtifactKind::Report));
        assert_eq!(ArtifactKind::from_path(Path::new("notes")), None);
        assert_eq!(ArtifactKind::from_path(Path::new("model.pt")), None);
    }

    #[test]
    fn test_open_unknown_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.bin");
        fs::write(&path, b"\0\0").unwrap();

        let err = OutputArtifact::open(&path).unwrap_err();
        assert!(matches!(err, InspectError::UnknownFormat(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = OutputArtifact::open(dir.path().join("gone.json")).unwrap_err();
        assert!(matches!(err, InspectError::Io { .. }));
    }
}
