//! Aggregate metrics over handover records

use crate::artifacts::handover::Handover;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;

/// Calculator for handover metrics
pub struct HandoverMetrics;

impl HandoverMetrics {
    /// Percentage of records with a `Success` outcome; 0 for an empty set
    pub fn success_rate<H: Handover>(records: &[H]) -> f64 {
        if records.is_empty() {
            return 0.0;
        }
        let successful = records.iter().filter(|r| r.outcome().is_success()).count();
        (successful as f64 / records.len() as f64) * 100.0
    }

    /// Mean latency in milliseconds over records that carry one; 0 when none do
    pub fn average_latency<H: Handover>(records: &[H]) -> f64 {
        Self::mean(records.iter().filter_map(|r| r.latency_ms())).unwrap_or(0.0)
    }

    /// Arithmetic mean, `None` when there are no values
    pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
        let (sum, count) = values
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Distinct values in first-seen order
    pub fn distinct_first_seen<T, I>(values: I) -> Vec<T>
    where
        T: Eq + Hash + Clone,
        I: IntoIterator<Item = T>,
    {
        let mut seen = HashSet::new();
        values
            .into_iter()
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }

    /// Per-method breakdown in first-seen order. Records without a method
    /// are grouped under "unknown".
    pub fn per_method<H: Handover>(records: &[H]) -> Vec<MethodStats> {
        let methods =
            Self::distinct_first_seen(records.iter().map(|r| r.method().unwrap_or("unknown")));

        methods
            .into_iter()
            .map(|method| {
                let group: Vec<&H> = records
                    .iter()
                    .filter(|r| r.method().unwrap_or("unknown") == method)
                    .collect();
                let successful = group.iter().filter(|r| r.outcome().is_success()).count();
                MethodStats {
                    method: method.to_string(),
                    count: group.len(),
                    success_rate: (successful as f64 / group.len() as f64) * 100.0,
                    average_latency_ms: Self::mean(group.iter().filter_map(|r| r.latency_ms()))
                        .unwrap_or(0.0),
                }
            })
            .collect()
    }
}

/// Outcome statistics for a single decision method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodStats {
    pub method: String,
    pub count: usize,
    pub success_rate: f64,
    pub average_latency_ms: f64,
}
