//! GroqApiAgent - Direct REST client for Groq's OpenAI-compatible chat completions.
//!
//! The API key is read from the `GROQ_API_KEY` environment variable and is
//! never persisted or logged.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use nutriscan_core::assessment::{BackendError, CompletionBackend, CompletionRequest};
use nutriscan_core::config::ApiConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Completion backend that talks to the Groq HTTP API.
#[derive(Clone)]
pub struct GroqApiAgent {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl std::fmt::Debug for GroqApiAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqApiAgent")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl GroqApiAgent {
    /// Creates an agent with an explicit API key.
    ///
    /// The request timeout comes from `config`; an elapsed timeout is
    /// reported like any other transport failure.
    pub fn new(api_key: Option<String>, config: &ApiConfig) -> Result<Self, BackendError> {
        let timeout = config.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| BackendError::new(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            endpoint: chat_completions_url(&config.base_url),
            model: config.model.clone(),
            timeout,
        })
    }

    /// Reads the API key from `GROQ_API_KEY`.
    ///
    /// A missing key is not an error here; requests fail with an
    /// authentication error instead.
    pub fn from_env(config: &ApiConfig) -> Result<Self, BackendError> {
        let api_key = env::var(API_KEY_ENV).ok();
        if api_key.is_none() {
            tracing::warn!("{} is not set; analysis requests will be rejected", API_KEY_ENV);
        }
        Self::new(api_key, config)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_body(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    MessageContent::Text {
                        text: request.prompt.clone(),
                    },
                    MessageContent::ImageUrl {
                        image_url: ImageUrl {
                            url: request.image_data_url.clone(),
                        },
                    },
                ],
            }],
            temperature: request.sampling.temperature,
            max_completion_tokens: request.sampling.max_completion_tokens,
            top_p: request.sampling.top_p,
            stream: false,
            stop: None,
        }
    }

    async fn send_request(
        &self,
        api_key: &str,
        body: &ChatCompletionRequest,
    ) -> Result<String, BackendError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Groq error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| BackendError::new(format!("Failed to parse Groq response: {}", err.without_url())))?;

        Ok(extract_text_response(parsed))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            tracing::warn!(timeout_secs = self.timeout.as_secs(), "Groq API request timed out");
            BackendError::new("Groq API request timed out")
        } else {
            // The URL may carry port numbers that look like status codes.
            BackendError::new(format!("Groq API request failed: {}", err.without_url()))
        }
    }
}

#[async_trait]
impl CompletionBackend for GroqApiAgent {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, BackendError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(BackendError::new(format!(
                "authentication required: {} is not set",
                API_KEY_ENV
            )));
        };

        let body = self.build_body(&request);
        tracing::debug!(
            model = %self.model,
            prompt_chars = request.prompt.len(),
            image_chars = request.image_data_url.len(),
            "Sending Groq chat completion"
        );

        self.send_request(api_key, &body).await
    }
}

fn chat_completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
    stream: bool,
    stop: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<MessageContent>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum MessageContent {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// First choice's content, or an empty string when there is none.
fn extract_text_response(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

/// The message always starts with the numeric status code.
fn map_http_error(status: StatusCode, body: &str) -> BackendError {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());

    BackendError::with_status(status.as_u16(), format!("{} {}", status.as_u16(), detail))
}
