//! LLM Gateway port
//!
//! Defines the single chat-completion call shared by every LLM-backed stage
//! adapter (classifier, decomposer, filter, summarizer, synthesizer).

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A system + user message pair sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub user: String,
}

impl ChatPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer. The model and
/// endpoint are fixed when the gateway is constructed.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one prompt and return the text of the first completion.
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, GatewayError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
