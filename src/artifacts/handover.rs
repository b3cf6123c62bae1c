//! Handover records as they appear in the simulation outputs

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Outcome of a handover attempt
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HandoverOutcome {
    Success,
    Failure,
    /// Any other label the producer wrote
    Other(String),
}

impl HandoverOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for HandoverOutcome {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Success" => Self::Success,
            "Failure" => Self::Failure,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for HandoverOutcome {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<HandoverOutcome> for String {
    fn from(outcome: HandoverOutcome) -> Self {
        match outcome {
            HandoverOutcome::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for HandoverOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Common view over handover records from any artifact format
pub trait Handover {
    fn outcome(&self) -> &HandoverOutcome;
    /// `None` when the producer left the latency blank or unreadable
    fn latency_ms(&self) -> Option<f64>;
    /// Decision method, when the format records one
    fn method(&self) -> Option<&str>;
}

/// One row of the relational snapshot, read by column position:
/// id, ue id, source cell, target cell, method, result, latency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoverRecord {
    /// Stored as INTEGER or TEXT depending on the producer
    pub sequence: String,
    pub ue_id: String,
    pub source_cell: String,
    pub target_cell: String,
    pub method: String,
    pub outcome: HandoverOutcome,
    pub latency_ms: f64,
}

impl Handover for HandoverRecord {
    fn outcome(&self) -> &HandoverOutcome {
        &self.outcome
    }

    fn latency_ms(&self) -> Option<f64> {
        Some(self.latency_ms)
    }

    fn method(&self) -> Option<&str> {
        Some(&self.method)
    }
}

/// One typed row of the CSV table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoverRow {
    pub result: HandoverOutcome,
    #[serde(deserialize_with = "lenient_latency")]
    pub latency_ms: Option<f64>,
    pub method: String,
    #[serde(default)]
    pub ue_id: Option<String>,
    #[serde(default)]
    pub source_cell: Option<String>,
    #[serde(default)]
    pub target_cell: Option<String>,
}

impl HandoverRow {
    /// Columns every handover table must carry
    pub const REQUIRED_COLUMNS: [&'static str; 3] = ["result", "latency_ms", "method"];
}

impl Handover for HandoverRow {
    fn outcome(&self) -> &HandoverOutcome {
        &self.result
    }

    fn latency_ms(&self) -> Option<f64> {
        self.latency_ms
    }

    fn method(&self) -> Option<&str> {
        Some(&self.method)
    }
}

/// Blank or non-numeric latency cells become `None` instead of failing the row
fn lenient_latency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|cell| cell.trim().parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert!(HandoverOutcome::from("Success").is_success());
        assert!(!HandoverOutcome::from("Failure").is_success());
        assert!(!HandoverOutcome::from("success").is_success());
        assert_eq!(
            HandoverOutcome::from("Timeout"),
            HandoverOutcome::Other("Timeout".to_string())
        );
        assert_eq!(String::from(HandoverOutcome::from("Timeout")), "Timeout");
    }

    #[test]
    fn test_outcome_deserializes_from_plain_string() {
        let outcomes: Vec<HandoverOutcome> =
            serde_json::from_str(r#"["Success", "Failure", "Dropped"]"#).unwrap();
        assert_eq!(
            outcomes,
            vec![
                HandoverOutcome::Success,
                HandoverOutcome::Failure,
                HandoverOutcome::Other("Dropped".to_string()),
            ]
        );
    }

    #[test]
    fn test_row_with_blank_latency_still_parses() {
        let mut reader = csv::Reader::from_reader(
            "method,result,latency_ms\nRSRP-Based,Failure,\nRL-Optimized,Success,n/a\nRL-Optimized,Success,12.5\n"
                .as_bytes(),
        );
        let rows: Vec<HandoverRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].latency_ms, None);
        assert_eq!(rows[0].result, HandoverOutcome::Failure);
        assert_eq!(rows[1].latency_ms, None);
        assert_eq!(rows[2].latency_ms, Some(12.5));
    }
}
