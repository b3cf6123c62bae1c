//! Console rendering of section summaries

use super::database::DatabaseSummary;
use super::document::DocumentSummary;
use super::files::{human_size, FileFacts};
use super::metrics::MethodStats;
use super::table::TableSummary;
use crate::artifacts::OutputArtifact;
use std::fmt::Write;

const RULE: &str = "──────────────────────────────────────────────────────────";

/// Boxed title used at the top of each command's output
pub fn banner(title: &str) -> String {
    format!(
        "╔══════════════════════════════════════════════════════════╗\n\
         ║  {:<56}║\n\
         ╚══════════════════════════════════════════════════════════╝",
        title
    )
}

/// Heading line for one section
pub fn section_heading(title: &str) -> String {
    format!("\n{}\n{}", title.to_uppercase(), RULE)
}

/// "Source: <path> (created ...)" line
pub fn source_line(artifact: &OutputArtifact) -> String {
    format!(
        "  Source:                {}\n  Created:               {}",
        artifact.path().display(),
        artifact.created_local().format("%Y-%m-%d %H:%M:%S")
    )
}

pub fn format_database(summary: &DatabaseSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Tables:                {}", summary.tables.join(", "));
    let _ = writeln!(
        out,
        "  Handover Records:      {:>10}   (table `{}`)",
        summary.row_count, summary.handover_table
    );

    if summary.sample.is_empty() {
        let _ = writeln!(out, "  (no rows to sample)");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "  Sample Handovers (first {}):", summary.sample.len());
    let _ = writeln!(
        out,
        "  {:>6}  {:<8}  {:<10}  {:<10}  {:<14}  {:<8}  {:>10}",
        "#", "UE", "Source", "Target", "Method", "Result", "Latency"
    );
    for r in &summary.sample {
        let _ = writeln!(
            out,
            "  {:>6}  {:<8}  {:<10}  {:<10}  {:<14}  {:<8}  {:>7.1} ms",
            r.sequence, r.ue_id, r.source_cell, r.target_cell, r.method, r.outcome, r.latency_ms
        );
    }
    out
}

pub fn format_document(summary: &DocumentSummary) -> String {
    let m = &summary.metadata;
    let mut out = String::new();

    let _ = writeln!(out, "  SIMULATION");
    let _ = writeln!(out, "  eNBs:                  {:>10}", m.num_enbs);
    let _ = writeln!(out, "  UEs:                   {:>10}", m.num_ues);
    let _ = writeln!(out, "  Duration:              {:>10.1} s", m.simulation_duration);
    let _ = writeln!(out);

    let _ = writeln!(out, "  HANDOVERS");
    let _ = writeln!(out, "  Total Events:          {:>10}", summary.handover_count);
    let _ = writeln!(out, "  Success Rate:          {:>10.1}%", summary.success_rate);
    let _ = writeln!(out, "  Average Latency:       {:>10.1} ms", summary.average_latency_ms);
    out.push_str(&format_methods(&summary.methods));
    let _ = writeln!(out);

    let _ = writeln!(out, "  RL TRAINING");
    let _ = writeln!(out, "  Episodes:              {:>10}", summary.training_episodes);
    if summary.training_episodes > 0 {
        let _ = writeln!(out, "  Average Reward:        {:>10.3}", summary.average_reward);
        if let Some(best) = summary.best_reward {
            let _ = writeln!(out, "  Best Reward:           {:>10.3}", best);
        }
        if let Some(last) = summary.final_reward {
            let _ = writeln!(out, "  Final Reward:          {:>10.3}", last);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "  MEC SERVICES ({})", summary.mec_services.len());
    for service in &summary.mec_services {
        let _ = writeln!(
            out,
            "  • {:<20} @ {:<14} [{}]",
            service.name, service.location, service.status
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "  Network Measurements:  {:>10}", summary.measurement_count);
    out
}

pub fn format_table(summary: &TableSummary, preview_rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Columns:               {}", summary.columns.join(", "));
    let _ = writeln!(out, "  Rows:                  {:>10}", summary.row_count);
    let _ = writeln!(out, "  Success Rate:          {:>10.1}%", summary.success_rate);
    let _ = writeln!(out, "  Average Latency:       {:>10.1} ms", summary.average_latency_ms);
    let _ = writeln!(out, "  Methods:               {:?}", summary.methods);
    out.push_str(&format_methods(&summary.per_method));
    let _ = writeln!(out);
    let _ = writeln!(out, "  Preview (first {} rows):", preview_rows);
    for line in summary.preview.lines() {
        let _ = writeln!(out, "    {}", line);
    }
    out
}

pub fn format_files(facts: &[FileFacts]) -> String {
    let mut out = String::new();
    let total: u64 = facts.iter().map(|f| f.size_bytes).sum();
    for f in facts {
        let _ = writeln!(out, "  ✓ {:<40} {:>10}", f.file_name(), human_size(f.size_bytes));
    }
    let _ = writeln!(out, "  {} file(s), {} total", facts.len(), human_size(total));
    out
}

fn format_methods(methods: &[MethodStats]) -> String {
    let mut out = String::new();
    if methods.is_empty() {
        return out;
    }
    let _ = writeln!(out, "  By Method:");
    for m in methods {
        let _ = writeln!(
            out,
            "    {:<18} {:>6} events  {:>6.1}% success  {:>7.1} ms avg",
            m.method, m.count, m.success_rate, m.average_latency_ms
        );
    }
    out
}

/// Footer stamped on every report
pub fn generated_footer() -> String {
    format!("\nGenerated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))
}
