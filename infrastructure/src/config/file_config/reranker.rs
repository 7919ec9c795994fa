//! Reranker configuration from TOML (`[reranker]` section)

use super::check_url;
use gated_rag_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw reranker configuration from TOML
///
/// Without an `endpoint`, chunks keep their retrieval order and are only
/// truncated to `top_n`.
///
/// # Example
///
/// ```toml
/// [reranker]
/// endpoint = "http://localhost:8080"     # text-embeddings-inference
/// model = "cross-encoder/ms-marco-MiniLM-L-6-v2"
/// top_n = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRerankerConfig {
    /// Base URL of a cross-encoder service exposing `POST /rerank`
    pub endpoint: Option<String>,
    /// Cross-encoder model name, forwarded when the service hosts several
    pub model: Option<String>,
    /// Chunks kept per sub-question after reranking
    pub top_n: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileRerankerConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            model: None,
            top_n: 3,
            timeout_secs: 30,
        }
    }
}

impl FileRerankerConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.top_n == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroLimit {
                    field: "reranker.top_n".to_string(),
                },
                "reranker.top_n: must be at least 1",
            ));
        }
        if let Some(endpoint) = &self.endpoint {
            check_url(&mut issues, "reranker.endpoint", endpoint);
        }
        issues
    }
}
