use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{Assessment, RiskLevel};

/// Summary statistics over the assessment history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryOverview {
    pub total: usize,
    /// Only levels that occur are present.
    pub risk_counts: BTreeMap<RiskLevel, usize>,
    /// Average confidence as a whole percentage.
    pub average_confidence_percent: u32,
}

impl HistoryOverview {
    /// Returns `None` for an empty history.
    pub fn from_assessments(assessments: &[Assessment]) -> Option<Self> {
        if assessments.is_empty() {
            return None;
        }

        let mut risk_counts = BTreeMap::new();
        for assessment in assessments {
            *risk_counts.entry(assessment.risk_level).or_insert(0) += 1;
        }

        let sum: f64 = assessments.iter().map(|a| a.confidence).sum();
        let average = sum / assessments.len() as f64;

        Some(Self {
            total: assessments.len(),
            risk_counts,
            average_confidence_percent: (average * 100.0).round() as u32,
        })
    }

    pub fn count(&self, level: RiskLevel) -> usize {
        self.risk_counts.get(&level).copied().unwrap_or(0)
    }
}
