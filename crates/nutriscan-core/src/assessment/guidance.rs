//! Follow-up guidance shown alongside a screening result.

use super::model::RiskLevel;

pub const SCREENING_DISCLAIMER: &str = "This AI assessment is a screening tool and should not replace professional medical diagnosis. Always consult with healthcare professionals for comprehensive evaluation and treatment decisions.";

/// Recommended next steps for a community health worker.
pub fn recommendations(risk_level: RiskLevel) -> &'static [&'static str] {
    match risk_level {
        RiskLevel::Low => &[
            "Continue regular growth monitoring",
            "Maintain current feeding practices",
            "Schedule routine follow-up in 3 months",
            "Provide nutritional education to caregivers",
        ],
        RiskLevel::Medium => &[
            "Increase monitoring frequency to monthly",
            "Assess feeding practices and dietary intake",
            "Consider nutritional counseling",
            "Refer to nutritionist if available",
            "Follow up in 2-4 weeks",
        ],
        RiskLevel::High => &[
            "Immediate referral to healthcare facility",
            "Urgent nutritional assessment required",
            "Consider therapeutic feeding program",
            "Weekly monitoring recommended",
            "Caregiver education on urgent feeding needs",
        ],
    }
}

/// Display grouping of a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    Strong,
    Moderate,
    Weak,
}

impl ConfidenceBand {
    pub fn of(confidence: f64) -> Self {
        if confidence >= 0.8 {
            Self::Strong
        } else if confidence >= 0.6 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_counts() {
        assert_eq!(recommendations(RiskLevel::Low).len(), 4);
        assert_eq!(recommendations(RiskLevel::Medium).len(), 5);
        assert_eq!(recommendations(RiskLevel::High).len(), 5);
        assert_eq!(
            recommendations(RiskLevel::High)[0],
            "Immediate referral to healthcare facility"
        );
    }

    #[test]
    fn test_confidence_band_edges() {
        assert_eq!(ConfidenceBand::of(0.8), ConfidenceBand::Strong);
        assert_eq!(ConfidenceBand::of(0.79), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::of(0.6), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::of(0.59), ConfidenceBand::Weak);
    }
}
