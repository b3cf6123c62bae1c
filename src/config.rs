//! Inspector configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Glob patterns used to find each artifact kind inside the results directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPatterns {
    /// Relational snapshot (SQLite)
    pub database: String,
    /// Structured document (JSON)
    pub document: String,
    /// Tabular records (CSV)
    pub table: String,
    /// Plots
    pub images: Vec<String>,
    /// Rendered reports. Limited by extension so data files such as
    /// `simulation_report.json` stay out of the listing.
    pub reports: Vec<String>,
}

impl Default for ArtifactPatterns {
    fn default() -> Self {
        Self {
            database: "*.db".to_string(),
            document: "*.json".to_string(),
            table: "*.csv".to_string(),
            images: vec!["*.png".to_string()],
            reports: ["md", "html", "pdf", "txt"]
                .iter()
                .map(|ext| format!("*report*.{ext}"))
                .collect(),
        }
    }
}

/// Main inspector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Directory the simulation wrote its outputs into
    pub results_dir: PathBuf,

    /// Per-kind file patterns
    pub patterns: ArtifactPatterns,

    /// Table holding handover records in the SQLite snapshot
    pub handover_table: String,

    /// Rows sampled from the snapshot
    pub sample_rows: usize,

    /// Rows shown in the CSV preview
    pub preview_rows: usize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            patterns: ArtifactPatterns::default(),
            handover_table: "handovers".to_string(),
            sample_rows: 5,
            preview_rows: 5,
        }
    }
}

impl InspectorConfig {
    /// Default configuration rooted at `dir`
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: dir.into(),
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"results_dir": "out", "patterns": {{"table": "handovers_*.csv"}}}}"#).unwrap();

        let config = InspectorConfig::load(file.path()).unwrap();

        assert_eq!(config.results_dir, PathBuf::from("out"));
        assert_eq!(config.patterns.table, "handovers_*.csv");
        assert_eq!(config.patterns.document, "*.json");
        assert_eq!(config.handover_table, "handovers");
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.patterns.images, vec!["*.png"]);
    }

    #[test]
    fn test_default_report_patterns_skip_data_files() {
        let patterns = ArtifactPatterns::default().reports;
        let matches = |name: &str| {
            patterns
                .iter()
                .any(|p| glob::Pattern::new(p).unwrap().matches(name))
        };

        assert!(matches("final_report.md"));
        assert!(matches("handover_report.html"));
        assert!(matches("report.pdf"));
        assert!(!matches("simulation_report.json"));
        assert!(!matches("handover_report.csv"));
        assert!(!matches("report_plot.png"));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "results_dir = 'out'").unwrap();

        assert!(InspectorConfig::load(file.path()).is_err());
    }
}
