use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// Confidence reported when the model omits or malforms the field, and the
/// fixed confidence of the keyword fallback.
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Number of assessments kept in the local history.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Malnutrition risk category returned by a screening.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// Clamps into `[0, 1]`; NaN becomes [`DEFAULT_CONFIDENCE`].
fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        DEFAULT_CONFIDENCE
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

fn deserialize_confidence<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_confidence)
}

/// The normalized outcome of one analysis request.
///
/// Produced per request and consumed once to build an [`Assessment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub risk_level: RiskLevel,
    pub explanation: String,
    /// Always within `[0, 1]`.
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: f64,
}

impl AnalysisResult {
    /// Builds a result, clamping `confidence` into `[0, 1]`.
    ///
    /// A NaN confidence is replaced by [`DEFAULT_CONFIDENCE`].
    pub fn new(risk_level: RiskLevel, explanation: impl Into<String>, confidence: f64) -> Self {
        Self {
            risk_level,
            explanation: explanation.into(),
            confidence: clamp_confidence(confidence),
        }
    }

    /// Confidence as a whole percentage, rounded half away from zero.
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence * 100.0).round() as u8
    }
}

/// A persisted screening record.
///
/// Immutable once created: the history only ever prepends and prunes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// The encoded image (data URL) that was analyzed.
    pub image_url: String,
    pub risk_level: RiskLevel,
    pub explanation: String,
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: f64,
}

impl Assessment {
    /// Creates a record for `result` with a fresh id and the current time.
    pub fn from_result(image_url: impl Into<String>, result: AnalysisResult) -> Self {
        Self::with_timestamp(image_url, result, Utc::now())
    }

    pub fn with_timestamp(
        image_url: impl Into<String>,
        result: AnalysisResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            image_url: image_url.into(),
            risk_level: result.risk_level,
            explanation: result.explanation,
            confidence: result.confidence,
        }
    }

    pub fn result(&self) -> AnalysisResult {
        AnalysisResult {
            risk_level: self.risk_level,
            explanation: self.explanation.clone(),
            confidence: self.confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_risk_level_parses_case_insensitively() {
        assert_eq!(RiskLevel::from_str("low").unwrap(), RiskLevel::Low);
        assert_eq!(RiskLevel::from_str("HIGH").unwrap(), RiskLevel::High);
        assert_eq!(RiskLevel::from_str("Medium").unwrap(), RiskLevel::Medium);
        assert!(RiskLevel::from_str("Critical").is_err());
    }

    #[test]
    fn test_risk_level_serializes_as_title_case() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"High\"");
        assert_eq!(RiskLevel::Low.to_string(), "Low");
    }

    #[test]
    fn test_analysis_result_clamps_confidence() {
        assert_eq!(AnalysisResult::new(RiskLevel::Low, "", 1.7).confidence, 1.0);
        assert_eq!(AnalysisResult::new(RiskLevel::Low, "", -0.2).confidence, 0.0);
        assert_eq!(
            AnalysisResult::new(RiskLevel::Low, "", f64::NAN).confidence,
            DEFAULT_CONFIDENCE
        );
    }

    #[test]
    fn test_assessment_uses_camel_case_fields() {
        let result = AnalysisResult::new(RiskLevel::High, "Visible wasting", 0.85);
        let assessment = Assessment::from_result("data:image/png;base64,AAAA", result);
        let value = serde_json::to_value(&assessment).unwrap();

        assert_eq!(value["imageUrl"], "data:image/png;base64,AAAA");
        assert_eq!(value["riskLevel"], "High");
        assert_eq!(value["confidence"], 0.85);
        assert!(value["timestamp"].is_string());
        assert!(!assessment.id.is_empty());
    }

    #[test]
    fn test_risk_level_defaults_to_medium() {
        assert_eq!(RiskLevel::default(), RiskLevel::Medium);
    }

    #[test]
    fn test_stored_confidence_is_clamped_on_load() {
        let raw = r#"[
            {"id":"a","timestamp":"2025-03-01T09:00:00Z","imageUrl":"x","riskLevel":"Low","explanation":"ok","confidence":4.2},
            {"id":"b","timestamp":"2025-03-01T09:01:00Z","imageUrl":"x","riskLevel":"High","explanation":"ok","confidence":-1}
        ]"#;
        let records: Vec<Assessment> = serde_json::from_str(raw).unwrap();

        assert_eq!(records[0].confidence, 1.0);
        assert_eq!(records[1].confidence, 0.0);

        let result: AnalysisResult =
            serde_json::from_str(r#"{"riskLevel":"Medium","explanation":"e","confidence":7}"#)
                .unwrap();
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_assessments_get_unique_ids() {
        let result = AnalysisResult::new(RiskLevel::Low, "ok", 0.9);
        let a = Assessment::from_result("x", result.clone());
        let b = Assessment::from_result("x", result);
        assert_ne!(a.id, b.id);
    }
}
