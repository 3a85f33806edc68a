//! Capability seams around the external inference endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::{AnalysisError, BackendError};
use super::model::AnalysisResult;

/// Sampling parameters sent with every completion request.
///
/// Defaults lean deterministic with a bounded output length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub top_p: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_completion_tokens: 1024,
            top_p: 1.0,
        }
    }
}

/// A single multimodal completion request: one instruction plus one image.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Self-describing encoded image (`data:<mime>;base64,...`).
    pub image_data_url: String,
    pub sampling: SamplingParams,
}

/// Sends a completion request to a hosted multimodal model.
///
/// Implementations return the raw completion text. An endpoint reply without
/// any content is an empty string, not an error.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Identifier of the model the backend talks to, for logging.
    fn model(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<String, BackendError>;
}

/// Produces a screening result for an encoded image.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, image_data_url: &str) -> Result<AnalysisResult, AnalysisError>;
}
