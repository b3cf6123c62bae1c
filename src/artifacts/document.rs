//! The simulation's JSON result document

use super::handover::{Handover, HandoverOutcome};
use crate::error::{InspectError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level shape of the result document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationDocument {
    pub metadata: SimulationMetadata,
    #[serde(default)]
    pub handover_events: Vec<HandoverEvent>,
    #[serde(default)]
    pub rl_training: Vec<TrainingEpisode>,
    #[serde(default)]
    pub mec_services: Vec<MecService>,
    /// Only counted, never interpreted
    #[serde(default)]
    pub network_measurements: Vec<serde_json::Value>,
}

/// Run parameters recorded by the producer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMetadata {
    pub num_enbs: u32,
    pub num_ues: u32,
    /// Seconds of simulated time
    pub simulation_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoverEvent {
    pub result: HandoverOutcome,
    pub latency_ms: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub ue_id: Option<serde_json::Value>,
    #[serde(default)]
    pub source_cell: Option<serde_json::Value>,
    #[serde(default)]
    pub target_cell: Option<serde_json::Value>,
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl Handover for HandoverEvent {
    fn outcome(&self) -> &HandoverOutcome {
        &self.result
    }

    fn latency_ms(&self) -> Option<f64> {
        Some(self.latency_ms)
    }

    fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingEpisode {
    pub reward: f64,
    #[serde(default)]
    pub episode: Option<u32>,
    #[serde(default)]
    pub epsilon: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MecService {
    pub name: String,
    pub location: String,
    pub status: String,
}

impl SimulationDocument {
    /// Read and validate a result document. Fails if a required key is
    /// missing or has the wrong type.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| InspectError::io(path, e))?;
        Self::parse(&contents).map_err(|source| InspectError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }
}
