//! Error types for artifact inspection

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, InspectError>;

/// Errors raised while locating or reading an artifact
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Invalid glob pattern {pattern:?}: {details}")]
    InvalidPattern { pattern: String, details: String },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to parse JSON document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column {column:?} missing from {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("Invalid table name {0:?}")]
    InvalidTableName(String),

    #[error("Cannot infer artifact kind for {0}")]
    UnknownFormat(PathBuf),
}

impl InspectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
