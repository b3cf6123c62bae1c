//! Inspector
//!
//! Runs report sections one after another: locate the artifact, load it,
//! print its summary. A section that finds nothing or fails to read its
//! artifact prints a line saying so and the next section still runs.

use crate::artifacts::{ArtifactKind, OutputArtifact, SimulationDocument};
use crate::config::InspectorConfig;
use crate::error::{InspectError, Result};
use crate::locator::{matching_files, ArtifactResolver, LatestCreated};
use crate::reporter::format::{
    format_database, format_document, format_files, format_table, section_heading, source_line,
};
use crate::reporter::{summarize_snapshot, DocumentSummary, FileFacts, HandoverTable};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// One block of the printed report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Database,
    Document,
    Table,
    Images,
    Reports,
}

impl Section {
    /// Sections of the `check` command
    pub const CHECK: [Section; 3] = [Section::Database, Section::Document, Section::Table];
    /// Sections of the `show` command
    pub const SHOW: [Section; 4] = [
        Section::Document,
        Section::Table,
        Section::Images,
        Section::Reports,
    ];
    pub const ALL: [Section; 5] = [
        Section::Database,
        Section::Document,
        Section::Table,
        Section::Images,
        Section::Reports,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Database => "Database Snapshot",
            Section::Document => "Simulation Results (JSON)",
            Section::Table => "Handover Table (CSV)",
            Section::Images => "Generated Plots",
            Section::Reports => "Reports",
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Section::Database => ArtifactKind::Database,
            Section::Document => ArtifactKind::Document,
            Section::Table => ArtifactKind::Table,
            Section::Images => ArtifactKind::Image,
            Section::Reports => ArtifactKind::Report,
        }
    }

    /// Glob patterns searched for this section, in priority order
    pub fn patterns<'a>(&self, config: &'a InspectorConfig) -> Vec<&'a str> {
        let p = &config.patterns;
        match self {
            Section::Database => vec![p.database.as_str()],
            Section::Document => vec![p.document.as_str()],
            Section::Table => vec![p.table.as_str()],
            Section::Images => p.images.iter().map(String::as_str).collect(),
            Section::Reports => p.reports.iter().map(String::as_str).collect(),
        }
    }
}

/// What happened when a section ran
#[derive(Debug)]
pub enum SectionOutcome {
    Reported,
    NotFound { patterns: Vec<String> },
    Failed(InspectError),
}

impl SectionOutcome {
    pub fn is_reported(&self) -> bool {
        matches!(self, SectionOutcome::Reported)
    }
}

/// Drives the report sections over one results directory
pub struct Inspector<R: ArtifactResolver = LatestCreated> {
    config: InspectorConfig,
    resolver: R,
}

impl Inspector<LatestCreated> {
    /// Inspector that picks the newest file of each kind
    pub fn new(config: InspectorConfig) -> Self {
        Self::with_resolver(config, LatestCreated)
    }
}

impl<R: ArtifactResolver> Inspector<R> {
    pub fn with_resolver(config: InspectorConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Body text for a section, `Ok(None)` when no artifact matched
    pub fn render_section(&self, section: Section) -> Result<Option<String>> {
        let dir = &self.config.results_dir;
        let patterns = section.patterns(&self.config);

        match section {
            Section::Images | Section::Reports => {
                let mut paths = Vec::new();
                for pattern in patterns {
                    for path in matching_files(dir, pattern)? {
                        if !paths.contains(&path) {
                            paths.push(path);
                        }
                    }
                }
                if paths.is_empty() {
                    return Ok(None);
                }
                Ok(Some(format_files(&FileFacts::collect(&paths)?)))
            }
            _ => {
                for pattern in patterns {
                    if let Some(path) = self.resolver.resolve(dir, pattern)? {
                        debug!("{:?} resolved to {}", section, path.display());
                        let artifact = OutputArtifact::with_kind(path, section.kind())?;
                        return render_artifact(&artifact, &self.config).map(Some);
                    }
                }
                Ok(None)
            }
        }
    }

    /// Print one section and report what happened
    pub fn run_section(&self, section: Section) -> SectionOutcome {
        println!("{}", section_heading(section.title()));

        match self.render_section(section) {
            Ok(Some(text)) => {
                print!("{}", text);
                SectionOutcome::Reported
            }
            Ok(None) => {
                let patterns: Vec<String> = section
                    .patterns(&self.config)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                let location = self.config.results_dir.join(patterns.join(" | "));
                println!("  ⚠️  No {} found matching {}", section.kind(), location.display());
                warn!("No {} found matching {}", section.kind(), location.display());
                SectionOutcome::NotFound { patterns }
            }
            Err(e) => {
                println!("  ❌ Could not read {}: {}", section.kind(), e);
                error!("{} section failed: {}", section.title(), e);
                SectionOutcome::Failed(e)
            }
        }
    }

    /// Run sections in order. Outcomes are returned for the caller to
    /// inspect; none of them stops the run.
    pub fn run(&self, sections: &[Section]) -> Vec<(Section, SectionOutcome)> {
        info!(
            "Inspecting {} ({} section(s))",
            self.config.results_dir.display(),
            sections.len()
        );

        let outcomes: Vec<(Section, SectionOutcome)> = sections
            .iter()
            .map(|&section| (section, self.run_section(section)))
            .collect();

        let reported = outcomes.iter().filter(|(_, o)| o.is_reported()).count();
        info!("{}/{} section(s) reported", reported, outcomes.len());
        outcomes
    }
}

/// Report text for one explicit file, kind inferred from its extension
pub fn report_file(path: &Path, config: &InspectorConfig) -> Result<String> {
    let artifact = OutputArtifact::open(path)?;
    render_artifact(&artifact, config)
}

fn render_artifact(artifact: &OutputArtifact, config: &InspectorConfig) -> Result<String> {
    let body = match artifact.kind() {
        ArtifactKind::Database => {
            let summary =
                summarize_snapshot(artifact.path(), &config.handover_table, config.sample_rows)?;
            format_database(&summary)
        }
        ArtifactKind::Document => {
            let doc = SimulationDocument::load(artifact.path())?;
            format_document(&DocumentSummary::from_document(&doc))
        }
        ArtifactKind::Table => {
            let table = HandoverTable::load(artifact.path())?;
            format_table(&table.summarize(config.preview_rows)?, config.preview_rows)
        }
        ArtifactKind::Image | ArtifactKind::Report => {
            format_files(&[FileFacts::stat(artifact.path())?])
        }
    };
    Ok(format!("{}\n\n{}", source_line(artifact), body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Resolves every pattern to the same fixed file name
    struct Fixed(&'static str);

    impl ArtifactResolver for Fixed {
        fn resolve(&self, dir: &Path, _pattern: &str) -> Result<Option<PathBuf>> {
            let path = dir.join(self.0);
            Ok(path.exists().then_some(path))
        }
    }

    const DOCUMENT: &str = r#"{
        "metadata": {"num_enbs": 7, "num_ues": 50, "simulation_duration": 120},
        "handover_events": [
            {"result": "Success", "latency_ms": 10},
            {"result": "Failure", "latency_ms": 20}
        ],
        "mec_services": [{"name": "v2x-relay", "location": "edge-2", "status": "active"}]
    }"#;

    #[test]
    fn test_document_section_with_injected_resolver() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fixture.json"), DOCUMENT).unwrap();

        let inspector =
            Inspector::with_resolver(InspectorConfig::for_dir(dir.path()), Fixed("fixture.json"));
        let text = inspector.render_section(Section::Document).unwrap().unwrap();

        assert!(text.contains("50.0%"));
        assert!(text.contains("15.0 ms"));
        assert!(text.contains("v2x-relay"));
    }

    #[test]
    fn test_check_continues_past_missing_and_broken_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("results.json"), "{ truncated").unwrap();
        fs::write(
            dir.path().join("handovers.csv"),
            "method,result,latency_ms\nRL-Optimized,Success,11\n",
        )
        .unwrap();

        let inspector = Inspector::new(InspectorConfig::for_dir(dir.path()));
        let outcomes = inspector.run(&Section::CHECK);

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(outcomes[0], (Section::Database, SectionOutcome::NotFound { .. })));
        assert!(matches!(
            outcomes[1],
            (Section::Document, SectionOutcome::Failed(InspectError::Json { .. }))
        ));
        assert!(matches!(outcomes[2], (Section::Table, SectionOutcome::Reported)));
    }

    #[test]
    fn test_show_lists_plots_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("latency.png"), vec![0u8; 100]).unwrap();
        fs::write(dir.path().join("rewards.png"), vec![0u8; 200]).unwrap();
        fs::write(dir.path().join("final_report.md"), "# done").unwrap();

        let inspector = Inspector::new(InspectorConfig::for_dir(dir.path()));

        let images = inspector.render_section(Section::Images).unwrap().unwrap();
        assert!(images.contains("latency.png"));
        assert!(images.contains("rewards.png"));
        assert!(images.contains("2 file(s)"));

        let reports = inspector.render_section(Section::Reports).unwrap().unwrap();
        assert!(reports.contains("final_report.md"));

        let outcomes = inspector.run(&Section::SHOW);
        assert!(matches!(outcomes[0].1, SectionOutcome::NotFound { .. }));
        assert!(outcomes[2].1.is_reported());
    }

    #[test]
    fn test_reports_exclude_data_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("simulation_report.json"), DOCUMENT).unwrap();
        fs::write(dir.path().join("handover_report.csv"), "method,result,latency_ms\n").unwrap();
        fs::write(dir.path().join("final_report.md"), "# done").unwrap();
        fs::write(dir.path().join("final_report.html"), "<h1>done</h1>").unwrap();

        let inspector = Inspector::new(InspectorConfig::for_dir(dir.path()));
        let reports = inspector.render_section(Section::Reports).unwrap().unwrap();

        assert!(reports.contains("final_report.md"));
        assert!(reports.contains("final_report.html"));
        assert!(!reports.contains("simulation_report.json"));
        assert!(!reports.contains("handover_report.csv"));
        assert!(reports.contains("2 file(s)"));
    }

    #[test]
    fn test_section_presets() {
        assert_eq!(
            Section::CHECK,
            [Section::Database, Section::Document, Section::Table]
        );
        assert!(!Section::SHOW.contains(&Section::Database));
        assert!(Section::SHOW.contains(&Section::Images));
        assert!(Section::SHOW.contains(&Section::Reports));
        assert_eq!(Section::ALL.len(), 5);

        let config = InspectorConfig::default();
        assert_eq!(Section::Database.patterns(&config), vec!["*.db"]);
        assert_eq!(Section::Reports.patterns(&config).len(), 4);
    }

    #[test]
    fn test_report_file_infers_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run_42.json");
        fs::write(&path, DOCUMENT).unwrap();

        let text = report_file(&path, &InspectorConfig::default()).unwrap();
        assert!(text.contains("run_42.json"));
        assert!(text.contains("Total Events:"));

        let err = report_file(&dir.path().join("model.pt"), &InspectorConfig::default());
        assert!(matches!(err, Err(InspectError::UnknownFormat(_))));
    }
}
