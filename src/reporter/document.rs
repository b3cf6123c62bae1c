//! Summary of the JSON result document

use super::metrics::{HandoverMetrics, MethodStats};
use crate::artifacts::{MecService, SimulationDocument, SimulationMetadata};
use serde::{Deserialize, Serialize};

/// Derived statistics for one result document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub metadata: SimulationMetadata,
    pub handover_count: usize,
    pub success_rate: f64,
    pub average_latency_ms: f64,
    pub methods: Vec<MethodStats>,
    pub training_episodes: usize,
    pub average_reward: f64,
    pub best_reward: Option<f64>,
    pub final_reward: Option<f64>,
    pub mec_services: Vec<MecService>,
    pub measurement_count: usize,
}

impl DocumentSummary {
    pub fn from_document(doc: &SimulationDocument) -> Self {
        let events = &doc.handover_events;
        let rewards: Vec<f64> = doc.rl_training.iter().map(|e| e.reward).collect();

        // Only break down by method when the producer recorded one
        let methods = if events.iter().any(|e| e.method.is_some()) {
            HandoverMetrics::per_method(events)
        } else {
            Vec::new()
        };

        Self {
            metadata: doc.metadata.clone(),
            handover_count: events.len(),
            success_rate: HandoverMetrics::success_rate(events),
            average_latency_ms: HandoverMetrics::average_latency(events),
            methods,
            training_episodes: rewards.len(),
            average_reward: HandoverMetrics::mean(rewards.iter().copied()).unwrap_or(0.0),
            best_reward: rewards.iter().copied().reduce(f64::max),
            final_reward: rewards.last().copied(),
            mec_services: doc.mec_services.clone(),
            measurement_count: doc.network_measurements.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_crafted_document() {
        let doc = SimulationDocument::parse(
            r#"{
                "metadata": {"num_enbs": 7, "num_ues": 50, "simulation_duration": 300.0},
                "handover_events": [
                    {"result": "Success", "latency_ms": 10},
                    {"result": "Failure", "latency_ms": 20}
                ],
                "rl_training": [{"reward": -1.5}, {"reward": 4.0}, {"reward": 2.5}],
                "mec_services": [
                    {"name": "video-cache", "location": "edge-1", "status": "running"}
                ],
                "network_measurements": [{"rsrp": -90}, {"rsrp": -85}, 3]
            }"#,
        )
        .unwrap();

        let summary = DocumentSummary::from_document(&doc);

        assert_eq!(summary.handover_count, 2);
        assert_eq!(summary.success_rate, 50.0);
        assert_eq!(summary.average_latency_ms, 15.0);
        assert!(summary.methods.is_empty());
        assert_eq!(summary.training_episodes, 3);
        assert_eq!(summary.average_reward, 5.0 / 3.0);
        assert_eq!(summary.best_reward, Some(4.0));
        assert_eq!(summary.final_reward, Some(2.5));
        assert_eq!(summary.mec_services.len(), 1);
        assert_eq!(summary.measurement_count, 3);
    }

    #[test]
    fn test_summary_of_empty_collections() {
        let doc = SimulationDocument::parse(
            r#"{"metadata": {"num_enbs": 1, "num_ues": 2, "simulation_duration": 10}}"#,
        )
        .unwrap();

        let summary = DocumentSummary::from_document(&doc);

        assert_eq!(summary.handover_count, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.average_latency_ms, 0.0);
        assert_eq!(summary.average_reward, 0.0);
        assert_eq!(summary.best_reward, None);
        assert_eq!(summary.final_reward, None);
    }
}
