//! O-RAN Simulation Result Inspector
//!
//! Locates the artifacts an external O-RAN handover simulation leaves behind
//! (SQLite snapshots, JSON documents, CSV tables, plots and reports) and
//! prints summary statistics from them. Artifacts are only ever read.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod inspector;
pub mod locator;
pub mod narrative;
pub mod reporter;

pub use config::InspectorConfig;
pub use error::{InspectError, Result};
pub use inspector::{Inspector, Section, SectionOutcome};
pub use locator::{ArtifactResolver, LatestCreated};
