//! Records exchanged between pipeline stages

use crate::core::question::Question;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sole context sentence handed to synthesis on the direct-answer path.
pub const DIRECT_ANSWER_CONTEXT: &str =
    "No external context needed for this mathematical/theoretical question.";

/// A sub-question the filter judged relevant.
///
/// Only `question` is required. Any other fields the filter emitted are kept
/// in `extra` and serialized back out next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredQuestion {
    pub question: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FilteredQuestion {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            extra: Map::new(),
        }
    }

    /// Convert one JSON element of a filter response.
    ///
    /// Accepts an object with a string `question` field, or a bare string.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::new(s.clone())),
            Value::Object(map) => {
                let question = map.get("question")?.as_str()?.to_string();
                let extra = map
                    .iter()
                    .filter(|(k, _)| k.as_str() != "question")
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                Some(Self { question, extra })
            }
            _ => None,
        }
    }
}

/// A question paired with its context strings.
///
/// This single shape carries retrieved chunks, reranked chunks, summaries and
/// the synthetic direct-answer context; synthesis does not care which.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub question: String,
    pub search_results: Vec<String>,
}

impl ContextRecord {
    pub fn new(question: impl Into<String>, search_results: Vec<String>) -> Self {
        Self {
            question: question.into(),
            search_results,
        }
    }

    /// The single synthetic record used when no retrieval is needed.
    pub fn direct_answer(question: &Question) -> Self {
        Self::new(
            question.content(),
            vec![DIRECT_ANSWER_CONTEXT.to_string()],
        )
    }

    pub fn is_empty(&self) -> bool {
        self.search_results.is_empty()
    }
}
