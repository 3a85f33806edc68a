//! Versioned prompt and keyword configuration.
//!
//! The instruction text sent to the model and the keyword lists used by the
//! fallback classifier are data, kept apart from request construction so
//! each can be tested on its own.

mod keywords;

pub use keywords::RiskKeywords;

use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Version tag of the built-in prompt.
pub const PROMPT_VERSION: &str = "2025-01";

const DEFAULT_TEMPLATE: &str = r#"You are a specialized medical AI assistant trained to detect signs of malnutrition in children through facial image analysis.

Please analyze this child's facial image for signs of malnutrition, focusing on:
{% for category in categories %}
{{ loop.index }}. **{{ category.title }}**:
{% for indicator in category.indicators %}   - {{ indicator }}
{% endfor %}{% endfor %}
Provide a risk assessment as Low, Medium, or High based on clinical indicators:
{% for level in risk_levels %}- **{{ level.name }} Risk**: {{ level.description }}
{% endfor %}
Please respond ONLY in valid JSON format:
{
  "riskLevel": "Low|Medium|High",
  "explanation": "Detailed clinical explanation of findings and reasoning",
  "confidence": 0.85
}

Be specific about what you observe and provide clear medical reasoning suitable for community health workers."#;

/// A group of visual indicators the model is asked to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorCategory {
    pub title: String,
    pub indicators: Vec<String>,
}

impl IndicatorCategory {
    fn new(title: &str, indicators: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            indicators: indicators.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Definition of one risk level as described to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDefinition {
    pub name: String,
    pub description: String,
}

/// The instruction template for a screening request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub version: String,
    /// minijinja source; receives `categories` and `risk_levels`.
    pub template: String,
    pub categories: Vec<IndicatorCategory>,
    pub risk_levels: Vec<RiskDefinition>,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            version: PROMPT_VERSION.to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
            categories: vec![
                IndicatorCategory::new(
                    "Facial Structure and Proportions",
                    &[
                        "Sunken cheeks or temples",
                        "Prominent cheekbones or orbital bones",
                        "Temporal muscle wasting",
                        "Overall facial asymmetry",
                    ],
                ),
                IndicatorCategory::new(
                    "Skin and Tissue Indicators",
                    &[
                        "Skin tone abnormalities or pallor",
                        "Dry, flaky, or scaling skin",
                        "Loss of subcutaneous fat",
                        "Skin texture changes",
                    ],
                ),
                IndicatorCategory::new(
                    "Eye and Orbital Signs",
                    &[
                        "Sunken or hollow eyes",
                        "Dark circles under eyes",
                        "Dull or lackluster appearance",
                        "Prominent orbital bones",
                    ],
                ),
                IndicatorCategory::new(
                    "Hair and Scalp Indicators",
                    &[
                        "Hair texture, color, or density changes",
                        "Signs of hair loss or thinning",
                        "Scalp visibility",
                    ],
                ),
                IndicatorCategory::new(
                    "Overall Facial Development",
                    &[
                        "Age-appropriate facial fullness",
                        "Muscle mass in jaw and cheek areas",
                        "General facial expression and alertness",
                    ],
                ),
            ],
            risk_levels: vec![
                RiskDefinition {
                    name: "Low".to_string(),
                    description: "Minimal or no visible signs of malnutrition".to_string(),
                },
                RiskDefinition {
                    name: "Medium".to_string(),
                    description: "Some concerning indicators that warrant monitoring".to_string(),
                },
                RiskDefinition {
                    name: "High".to_string(),
                    description: "Multiple clear indicators suggesting severe malnutrition"
                        .to_string(),
                },
            ],
        }
    }
}

impl PromptTemplate {
    /// Renders the instruction text.
    pub fn render(&self) -> Result<String> {
        let env = Environment::new();
        let rendered = env.render_str(
            &self.template,
            context! {
                categories => &self.categories,
                risk_levels => &self.risk_levels,
            },
        )?;
        Ok(rendered)
    }
}
