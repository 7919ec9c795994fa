//! OpenAI-compatible LLM Gateway implementation

use super::types::{ChatRequest, ChatResponseRaw, Message};
use crate::config::FileLlmConfig;
use async_trait::async_trait;
use gated_rag_application::ports::llm_gateway::{ChatPrompt, GatewayError, LlmGateway};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// LLM Gateway for any `/chat/completions` endpoint
#[derive(Clone)]
pub struct OpenAiCompatibleGateway {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiCompatibleGateway {
    /// Create a gateway for `model` at `base_url` with the given timeout.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
            temperature: None,
            max_tokens: None,
        })
    }

    /// Create a gateway from the `[llm]` configuration section.
    pub fn from_config(config: &FileLlmConfig) -> Result<Self, GatewayError> {
        let mut gateway = Self::new(
            &config.base_url,
            &config.model,
            Duration::from_secs(config.timeout_secs),
        )?;
        if let Some(api_key) = config.resolve_api_key() {
            gateway = gateway.with_api_key(api_key);
        }
        if let Some(temperature) = config.temperature {
            gateway = gateway.with_temperature(temperature);
        }
        if let Some(max_tokens) = config.max_tokens {
            gateway = gateway.with_max_tokens(max_tokens);
        }
        Ok(gateway)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmGateway for OpenAiCompatibleGateway {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, GatewayError> {
        let start = Instant::now();
        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message::system(&prompt.system), Message::user(&prompt.user)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut builder = self.http_client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Chat completion request failed");
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::ConnectionError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Chat completion API error");
            return Err(GatewayError::RequestFailed(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let raw: ChatResponseRaw = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::Other(format!("Invalid response body: {}", e))
            }
        })?;

        let content = raw
            .into_first_content()
            .ok_or(GatewayError::EmptyResponse)?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis() as u64,
            bytes = content.len(),
            "Chat completion"
        );

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
