//! Inference service transport.
//!
//! Provides a trait-based seam over the single HTTP call an analysis makes,
//! so the session logic can run against mock clients in tests.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::core::config::{ANTHROPIC_VERSION, AnalyzerConfig};
use crate::core::error::AnalysisError;
use crate::core::plot::PlotInput;
use crate::core::prompts::wrap_for_analysis;

/// One chat message in the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: String,
}

/// Body of a Messages API request.
///
/// Built once per submission and dropped after the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

impl AnalysisRequest {
    /// Builds the request for a validated plot.
    #[must_use]
    pub fn new(plot: &PlotInput, config: &AnalyzerConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: wrap_for_analysis(plot.as_str()),
            }],
        }
    }
}

/// Status and body of an HTTP response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Trait for inference service clients.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends one request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Network`] if no HTTP response was received.
    /// Non-success statuses are returned as `Ok` and judged by the caller.
    async fn send(&self, request: &AnalysisRequest) -> Result<RawResponse, AnalysisError>;

    /// Returns a display name for this client.
    fn name(&self) -> &'static str;
}

/// Anthropic Messages API client.
#[derive(Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl AnthropicClient {
    /// Creates a client from the configuration.
    ///
    /// A missing key is sent as an empty header; the service then rejects the
    /// call with an authentication status.
    #[must_use]
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: config.messages_url(),
            api_key: config.api_key.clone().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl InferenceClient for AnthropicClient {
    async fn send(&self, request: &AnalysisRequest) -> Result<RawResponse, AnalysisError> {
        debug!(url = %self.url, model = %request.model, "sending analysis request");

        let response = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Network(e.to_string()))?;

        debug!(status, bytes = body.len(), "analysis response received");
        Ok(RawResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "Anthropic"
    }
}
