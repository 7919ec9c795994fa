//! Retrieval configuration from TOML (`[retrieval]` section)

use gated_rag_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw retrieval configuration from TOML
///
/// # Example
///
/// ```toml
/// [retrieval]
/// corpus_path = "data/corpus.jsonl"
/// top_k = 5
/// max_sub_questions = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// JSONL corpus, one `{"text": ..., "source": ...}` object per line
    pub corpus_path: Option<PathBuf>,
    /// Chunks retrieved per filtered sub-question
    pub top_k: usize,
    /// Upper bound on sub-questions kept from decomposition
    pub max_sub_questions: usize,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            corpus_path: None,
            top_k: 5,
            max_sub_questions: 5,
        }
    }
}

impl FileRetrievalConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("retrieval.top_k", self.top_k),
            ("retrieval.max_sub_questions", self.max_sub_questions),
        ] {
            if value == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::ZeroLimit {
                        field: field.to_string(),
                    },
                    format!("{}: must be at least 1", field),
                ));
            }
        }

        match &self.corpus_path {
            Some(path) if !path.exists() => issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingFile {
                    field: "retrieval.corpus_path".to_string(),
                    path: path.display().to_string(),
                },
                format!(
                    "retrieval.corpus_path: {} does not exist, retrieval will find no chunks",
                    path.display()
                ),
            )),
            Some(_) => {}
            None => issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "retrieval.corpus_path".to_string(),
                },
                "retrieval.corpus_path is not set, retrieval will find no chunks",
            )),
        }

        issues
    }
}
