//! Assessment Service
//!
//! Builds the screening request, sends it through a [`CompletionBackend`]
//! and turns whatever comes back into an [`AnalysisResult`].

use async_trait::async_trait;
use nutriscan_core::assessment::{
    AnalysisError, AnalysisResult, Analyzer, CompletionBackend, CompletionRequest,
    NormalizationPath, ResponseNormalizer, SamplingParams,
};
use nutriscan_core::prompt::PromptTemplate;

/// Screening analyzer on top of any completion backend.
///
/// The prompt is rendered once at construction; every request reuses it.
pub struct AssessmentService<B> {
    backend: B,
    prompt: String,
    prompt_version: String,
    sampling: SamplingParams,
    normalizer: ResponseNormalizer,
}

impl<B: CompletionBackend> AssessmentService<B> {
    pub fn new(
        backend: B,
        template: &PromptTemplate,
        sampling: SamplingParams,
    ) -> nutriscan_core::Result<Self> {
        let prompt = template.render()?;
        tracing::debug!(
            prompt_version = %template.version,
            prompt_chars = prompt.len(),
            "Rendered screening prompt"
        );

        Ok(Self {
            backend,
            prompt,
            prompt_version: template.version.clone(),
            sampling,
            normalizer: ResponseNormalizer::default(),
        })
    }

    /// Default prompt and sampling parameters.
    pub fn with_defaults(backend: B) -> nutriscan_core::Result<Self> {
        Self::new(backend, &PromptTemplate::default(), SamplingParams::default())
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Like [`Analyzer::analyze`], also reporting which normalization path
    /// produced the result.
    pub async fn analyze_with_path(
        &self,
        image_data_url: &str,
    ) -> Result<(AnalysisResult, NormalizationPath), AnalysisError> {
        tracing::info!(
            model = %self.backend.model(),
            prompt_version = %self.prompt_version,
            "Starting malnutrition analysis"
        );

        let request = CompletionRequest {
            prompt: self.prompt.clone(),
            image_data_url: image_data_url.to_string(),
            sampling: self.sampling.clone(),
        };

        let raw = match self.backend.complete(request).await {
            Ok(raw) => raw,
            Err(err) => {
                let classified = AnalysisError::from(err.clone());
                tracing::error!(
                    status = ?err.status_code,
                    error = %err,
                    category = ?classified,
                    "Analysis request failed"
                );
                return Err(classified);
            }
        };

        let (result, path) = self.normalizer.normalize_with_path(&raw);
        tracing::info!(
            risk_level = %result.risk_level,
            confidence = result.confidence,
            path = ?path,
            "Analysis completed"
        );

        Ok((result, path))
    }
}

#[async_trait]
impl<B: CompletionBackend> Analyzer for AssessmentService<B> {
    async fn analyze(&self, image_data_url: &str) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_path(image_data_url)
            .await
            .map(|(result, _)| result)
    }
}
