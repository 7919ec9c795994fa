//! Language model configuration from TOML (`[llm]` section)

use super::{check_not_empty, check_url};
use gated_rag_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Raw language model configuration from TOML
///
/// Any OpenAI-compatible `/chat/completions` endpoint works (OpenAI, vLLM,
/// Ollama, LM Studio, ...).
///
/// # Example
///
/// ```toml
/// [llm]
/// model = "llama3.1:8b"
/// base_url = "http://localhost:11434/v1"
/// api_key_env = "OPENAI_API_KEY"
/// temperature = 0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Model identifier sent with every request
    pub model: String,
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// API key given inline; takes precedence over `api_key_env`
    pub api_key: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Completion token limit
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            temperature: Some(0.0),
            max_tokens: None,
            timeout_secs: 120,
        }
    }
}

impl FileLlmConfig {
    /// Resolve the API key: inline value first, then the named environment
    /// variable. Local servers usually need none.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                if self.api_key_env.is_empty() {
                    return None;
                }
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        check_not_empty(&mut issues, "llm.model", &self.model);
        if check_not_empty(&mut issues, "llm.base_url", &self.base_url) {
            check_url(&mut issues, "llm.base_url", &self.base_url);
        }
        issues
    }
}
