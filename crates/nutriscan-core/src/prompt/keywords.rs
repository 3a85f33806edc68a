use serde::{Deserialize, Serialize};

use crate::assessment::RiskLevel;

const HIGH_RISK_INDICATORS: &[&str] = &[
    "high risk",
    "severe",
    "significant wasting",
    "prominent bones",
    "sunken cheeks",
    "hollow eyes",
    "severe malnutrition",
    "critical",
    "malnourished",
    "malnutrition",
    "visible ribs",
    "thin extremities",
];

const LOW_RISK_INDICATORS: &[&str] = &[
    "low risk",
    "minimal signs",
    "normal appearance",
    "healthy",
    "no significant",
    "well-nourished",
    "good nutrition",
    "not malnourished",
];

/// Minimum number of matching indicators before the fallback leaves Medium.
pub const MIN_DECISIVE_MATCHES: usize = 2;

/// Keyword lists for classifying a free-text model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskKeywords {
    pub high_risk: Vec<String>,
    pub low_risk: Vec<String>,
}

impl Default for RiskKeywords {
    fn default() -> Self {
        Self {
            high_risk: HIGH_RISK_INDICATORS.iter().map(|s| s.to_string()).collect(),
            low_risk: LOW_RISK_INDICATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RiskKeywords {
    /// Counts how many indicators of each list occur in `text`.
    ///
    /// Containment is a plain substring test on the lower-cased text, so a
    /// short indicator also matches inside a longer word. Each indicator
    /// counts at most once. Returns `(high, low)`.
    pub fn count_matches(&self, text: &str) -> (usize, usize) {
        let lower = text.to_lowercase();
        let count = |indicators: &[String]| {
            indicators
                .iter()
                .filter(|indicator| lower.contains(indicator.as_str()))
                .count()
        };
        (count(&self.high_risk), count(&self.low_risk))
    }

    /// Classifies `text` by keyword counts.
    ///
    /// High when high-risk matches strictly outnumber low-risk ones and reach
    /// [`MIN_DECISIVE_MATCHES`]; Low under the symmetric condition; Medium
    /// otherwise.
    pub fn classify(&self, text: &str) -> RiskLevel {
        let (high, low) = self.count_matches(text);
        classify_counts(high, low)
    }
}

/// The decision rule of [`RiskKeywords::classify`] over raw counts.
pub fn classify_counts(high: usize, low: usize) -> RiskLevel {
    if high > low && high >= MIN_DECISIVE_MATCHES {
        RiskLevel::High
    } else if low > high && low >= MIN_DECISIVE_MATCHES {
        RiskLevel::Low
    } else {
        RiskLevel::Medium
    }
}
