//! Reporters turning a located artifact into printed summary statistics

pub mod database;
pub mod document;
pub mod files;
pub mod format;
pub mod metrics;
pub mod table;

pub use database::{summarize_snapshot, DatabaseSummary, SnapshotReader};
pub use document::DocumentSummary;
pub use files::FileFacts;
pub use metrics::{HandoverMetrics, MethodStats};
pub use table::{HandoverTable, TableSummary};
