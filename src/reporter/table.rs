//! In-memory view of the handover CSV table

use super::metrics::{HandoverMetrics, MethodStats};
use crate::artifacts::HandoverRow;
use crate::error::{InspectError, Result};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Preview cells longer than this are truncated
const MAX_CELL_WIDTH: usize = 24;

/// Whole CSV file held in memory, header plus raw records
#[derive(Debug, Clone)]
pub struct HandoverTable {
    path: PathBuf,
    headers: StringRecord,
    records: Vec<StringRecord>,
}

/// What the table section prints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub columns: Vec<String>,
    pub row_count: usize,
    pub success_rate: f64,
    pub average_latency_ms: f64,
    pub methods: Vec<String>,
    pub per_method: Vec<MethodStats>,
    pub preview: String,
}

impl HandoverTable {
    /// Load a CSV file and check it carries the required handover columns
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        for column in HandoverRow::REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(InspectError::MissingColumn {
                    column: column.to_string(),
                    path: path.to_path_buf(),
                });
            }
        }

        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Loaded {} rows from {}", records.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            headers,
            records,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn columns(&self) -> Vec<String> {
        self.headers.iter().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Raw values of one column, `None` if the column does not exist
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.records
                .iter()
                .map(|record| record.get(idx).unwrap_or(""))
                .collect(),
        )
    }

    /// Mean of the numeric cells of a column. Non-numeric cells are skipped.
    pub fn column_mean(&self, name: &str) -> Option<f64> {
        let values = self.column(name)?;
        HandoverMetrics::mean(values.iter().filter_map(|v| v.parse::<f64>().ok()))
    }

    /// Distinct values of a column in first-seen order
    pub fn distinct(&self, name: &str) -> Option<Vec<String>> {
        let values = self.column(name)?;
        Some(HandoverMetrics::distinct_first_seen(
            values.into_iter().map(str::to_string),
        ))
    }

    /// Typed rows. Fails on the first row that does not fit [`HandoverRow`].
    pub fn rows(&self) -> Result<Vec<HandoverRow>> {
        let rows = self
            .records
            .iter()
            .map(|record| record.deserialize(Some(&self.headers)))
            .collect::<std::result::Result<Vec<HandoverRow>, _>>()?;
        Ok(rows)
    }

    /// Typed rows that parse. Rows that do not are logged and left out.
    pub fn readable_rows(&self) -> Vec<HandoverRow> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| match record.deserialize::<HandoverRow>(Some(&self.headers)) {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!("Skipping row {} of {}: {}", i + 1, self.path.display(), e);
                    None
                }
            })
            .collect()
    }

    /// Fixed-width text rendering of the first `n` rows, all columns
    pub fn preview(&self, n: usize) -> String {
        let shown: Vec<&StringRecord> = self.records.iter().take(n).collect();

        let mut widths: Vec<usize> = self.headers.iter().map(|h| clip(h).chars().count()).collect();
        for record in &shown {
            for (i, cell) in record.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(clip(cell).chars().count());
                }
            }
        }

        let render = |cells: Vec<&str>| -> String {
            widths
                .iter()
                .enumerate()
                .map(|(i, w)| format!("{:<w$}", clip(cells.get(i).copied().unwrap_or("")), w = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::with_capacity(shown.len() + 2);
        lines.push(render(self.headers.iter().collect()));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for record in shown {
            lines.push(render(record.iter().collect()));
        }
        lines.join("\n")
    }

    /// Aggregates over the whole table. A row with a blank or unreadable
    /// latency still counts toward the outcome figures.
    pub fn summarize(&self, preview_rows: usize) -> Result<TableSummary> {
        let rows = self.readable_rows();
        Ok(TableSummary {
            columns: self.columns(),
            row_count: rows.len(),
            success_rate: HandoverMetrics::success_rate(&rows),
            average_latency_ms: self.column_mean("latency_ms").unwrap_or(0.0),
            methods: self.distinct("method").unwrap_or_default(),
            per_method: HandoverMetrics::per_method(&rows),
            preview: self.preview(preview_rows),
        })
    }
}

fn clip(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        cell.to_string()
    } else {
        let mut clipped: String = cell.chars().take(MAX_CELL_WIDTH - 1).collect();
        clipped.push('…');
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_csv(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handovers.csv");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_distinct_methods_first_seen() {
        let (_dir, path) = write_csv(
            "ue_id,method,result,latency_ms\n\
             1,RL-Optimized,Success,12.5\n\
             2,RSRP-Based,Failure,48.0\n\
             3,RL-Optimized,Success,15.5\n",
        );

        let table = HandoverTable::load(&path).unwrap();

        assert_eq!(
            table.distinct("method").unwrap(),
            vec!["RL-Optimized".to_string(), "RSRP-Based".to_string()]
        );
        let mean = table.column_mean("latency_ms").unwrap();
        assert!((mean - 76.0 / 3.0).abs() < 1e-9);
        assert_eq!(table.distinct("cell"), None);
    }

    #[test]
    fn test_summary() {
        let (_dir, path) = write_csv(
            "method,result,latency_ms,source_cell\n\
             RL-Optimized,Success,10,A\n\
             RSRP-Based,Failure,30,B\n\
             RL-Optimized,Success,20,C\n\
             RSRP-Based,Success,40,A\n",
        );

        let summary = HandoverTable::load(&path).unwrap().summarize(2).unwrap();

        assert_eq!(summary.row_count, 4);
        assert_eq!(summary.success_rate, 75.0);
        assert_eq!(summary.average_latency_ms, 25.0);
        assert_eq!(summary.methods, vec!["RL-Optimized", "RSRP-Based"]);
        assert_eq!(summary.per_method[0].success_rate, 100.0);
        assert_eq!(summary.per_method[1].average_latency_ms, 35.0);
        assert_eq!(summary.preview.lines().count(), 4);
    }

    #[test]
    fn test_blank_latency_cell_does_not_fail_summary() {
        let (_dir, path) = write_csv(
            "method,result,latency_ms\n\
             RL-Optimized,Success,10\n\
             RSRP-Based,Failure,\n\
             RL-Optimized,Success,20\n",
        );

        let table = HandoverTable::load(&path).unwrap();
        let summary = table.summarize(5).unwrap();

        assert_eq!(summary.row_count, 3);
        assert!((summary.success_rate - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.average_latency_ms, 15.0);
        assert_eq!(summary.methods, vec!["RL-Optimized", "RSRP-Based"]);
        assert_eq!(summary.per_method[0].average_latency_ms, 15.0);
        assert_eq!(summary.per_method[1].count, 1);
        assert_eq!(summary.preview.lines().count(), 5);
    }

    #[test]
    fn test_preview_is_fixed_width() {
        let (_dir, path) = write_csv(
            "method,result,latency_ms\n\
             RL-Optimized,Success,10\n\
             RSRP-Based,Failure,300\n",
        );

        let preview = HandoverTable::load(&path).unwrap().preview(5);
        let lines: Vec<&str> = preview.lines().collect();

        assert_eq!(lines[0], "method        result   latency_ms");
        assert_eq!(lines[1], "------------  -------  ----------");
        assert_eq!(lines[2], "RL-Optimized  Success  10");
        assert_eq!(lines[3], "RSRP-Based    Failure  300");
    }

    #[test]
    fn test_missing_required_column() {
        let (_dir, path) = write_csv("method,result\nRL-Optimized,Success\n");

        match HandoverTable::load(&path).unwrap_err() {
            InspectError::MissingColumn { column, .. } => assert_eq!(column, "latency_ms"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_table() {
        let (_dir, path) = write_csv("method,result,latency_ms\n");

        let table = HandoverTable::load(&path).unwrap();
        let summary = table.summarize(5).unwrap();

        assert!(table.is_empty());
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.average_latency_ms, 0.0);
        assert!(summary.methods.is_empty());
    }

    #[test]
    fn test_long_cells_are_clipped() {
        assert_eq!(clip("short"), "short");
        let clipped = clip("an-extremely-long-method-name-for-testing");
        assert_eq!(clipped.chars().count(), MAX_CELL_WIDTH);
        assert!(clipped.ends_with('…'));
    }
}
