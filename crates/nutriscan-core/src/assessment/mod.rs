//! Screening results, their normalization, and the seams around the model.

mod analyzer;
mod error;
mod guidance;
mod model;
mod normalize;
mod overview;
mod repository;

pub use analyzer::{Analyzer, CompletionBackend, CompletionRequest, SamplingParams};
pub use error::{AnalysisError, BackendError};
pub use guidance::{ConfidenceBand, SCREENING_DISCLAIMER, recommendations};
pub use model::{
    AnalysisResult, Assessment, DEFAULT_CONFIDENCE, MAX_HISTORY_ENTRIES, RiskLevel,
};
pub use normalize::{
    DEFAULT_EXPLANATION, FALLBACK_EXPLANATION, NormalizationPath, ResponseNormalizer,
    extract_json_object,
};
pub use overview::HistoryOverview;
pub use repository::AssessmentStore;
