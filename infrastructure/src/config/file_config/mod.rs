//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section has defaults, so an empty file is a valid configuration.

mod llm;
mod logging;
mod reranker;
mod retrieval;
mod server;

pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use reranker::FileRerankerConfig;
pub use retrieval::FileRetrievalConfig;
pub use server::FileServerConfig;

use gated_rag_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat-completion endpoint shared by every LLM-backed stage
    pub llm: FileLlmConfig,
    /// Corpus and retrieval depth
    pub retrieval: FileRetrievalConfig,
    /// Cross-encoder reranking
    pub reranker: FileRerankerConfig,
    /// HTTP transport
    pub server: FileServerConfig,
    /// Structured pipeline event log
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. Error-severity
    /// issues must stop startup; warnings are shown and ignored.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.llm.validate());
        issues.extend(self.retrieval.validate());
        issues.extend(self.reranker.validate());
        issues
    }
}

/// Push an error when `value` is blank. Returns whether it was non-blank.
fn check_not_empty(issues: &mut Vec<ConfigIssue>, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::EmptyValue {
                field: field.to_string(),
            },
            format!("{}: cannot be empty", field),
        ));
        return false;
    }
    true
}

/// Push an error when `value` is not an http(s) URL.
fn check_url(issues: &mut Vec<ConfigIssue>, field: &str, value: &str) {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        issues.push(ConfigIssue::error(
            ConfigIssueCode::InvalidUrl {
                field: field.to_string(),
                value: value.to_string(),
            },
            format!("{}: '{}' must start with http:// or https://", field, value),
        ));
    }
}
