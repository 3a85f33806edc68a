//! Turns a raw model reply into an [`AnalysisResult`].
//!
//! The reply is expected to hold a JSON object, possibly wrapped in prose or
//! code fences. When none can be parsed, the text itself is classified by
//! keyword counts. Shape anomalies never become errors.

use std::str::FromStr;

use serde_json::{Map, Value};

use super::model::{AnalysisResult, DEFAULT_CONFIDENCE, RiskLevel};
use crate::prompt::RiskKeywords;

pub const DEFAULT_EXPLANATION: &str = "Analysis completed but detailed explanation not available.";
pub const FALLBACK_EXPLANATION: &str =
    "Analysis completed. Please consult with a healthcare professional for comprehensive evaluation.";

/// Which path produced a normalized result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationPath {
    /// A JSON object was found and parsed.
    Structured,
    /// The keyword classifier was used.
    KeywordFallback,
}

/// Normalizes one model reply.
#[derive(Debug, Clone, Default)]
pub struct ResponseNormalizer {
    keywords: RiskKeywords,
}

impl ResponseNormalizer {
    pub fn new(keywords: RiskKeywords) -> Self {
        Self { keywords }
    }

    pub fn normalize(&self, raw: &str) -> AnalysisResult {
        self.normalize_with_path(raw).0
    }

    pub fn normalize_with_path(&self, raw: &str) -> (AnalysisResult, NormalizationPath) {
        if let Some(candidate) = extract_json_object(raw) {
            match serde_json::from_str::<Value>(candidate) {
                Ok(Value::Object(fields)) => {
                    return (from_fields(&fields), NormalizationPath::Structured);
                }
                Ok(_) => {
                    tracing::warn!("Model reply JSON is not an object, using text analysis");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Could not parse JSON response, using text analysis");
                }
            }
        }

        (self.classify_text(raw), NormalizationPath::KeywordFallback)
    }

    /// Keyword fallback: the explanation is the raw reply itself.
    pub fn classify_text(&self, raw: &str) -> AnalysisResult {
        let risk_level = self.keywords.classify(raw);
        let explanation = if raw.is_empty() {
            FALLBACK_EXPLANATION
        } else {
            raw
        };
        AnalysisResult::new(risk_level, explanation, DEFAULT_CONFIDENCE)
    }
}

/// Returns the span from the first `{` to the last `}`, inclusive.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn from_fields(fields: &Map<String, Value>) -> AnalysisResult {
    let risk_level = match fields.get("riskLevel").and_then(non_empty_str) {
        Some(raw_level) => RiskLevel::from_str(raw_level.trim()).unwrap_or_else(|_| {
            tracing::warn!(risk_level = raw_level, "Unrecognized risk level, defaulting to Medium");
            RiskLevel::Medium
        }),
        None => RiskLevel::Medium,
    };

    let explanation = fields
        .get("explanation")
        .and_then(non_empty_str)
        .unwrap_or(DEFAULT_EXPLANATION);

    let confidence = fields
        .get("confidence")
        .and_then(confidence_value)
        .unwrap_or(DEFAULT_CONFIDENCE);

    AnalysisResult::new(risk_level, explanation, confidence)
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Reads a confidence value; zero, non-finite and non-numeric count as absent.
fn confidence_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (number.is_finite() && number != 0.0).then_some(number)
}
