//! Pipeline stages

use serde::{Deserialize, Serialize};

/// A collaborator call site in the pipeline.
///
/// Every failure reported by the orchestrator names one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Classifier gate (math/theory or general)
    Classification,
    /// Question decomposition into sub-questions
    Decomposition,
    /// Sub-question relevance filter
    Filter,
    /// Chunk retrieval per filtered question
    Retrieval,
    /// Cross-encoder reranking
    Rerank,
    /// Chunk summarization
    Summarization,
    /// Final answer synthesis
    Synthesis,
}

impl Stage {
    /// The five retrieval stages, in execution order.
    pub const RAG_SEQUENCE: [Stage; 5] = [
        Stage::Decomposition,
        Stage::Filter,
        Stage::Retrieval,
        Stage::Rerank,
        Stage::Summarization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Classification => "classification",
            Stage::Decomposition => "decomposition",
            Stage::Filter => "filter",
            Stage::Retrieval => "retrieval",
            Stage::Rerank => "rerank",
            Stage::Summarization => "summarization",
            Stage::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Classification => "Classification",
            Stage::Decomposition => "Decomposition",
            Stage::Filter => "Sub-question filter",
            Stage::Retrieval => "Chunk retrieval",
            Stage::Rerank => "Rerank",
            Stage::Summarization => "Summarization",
            Stage::Synthesis => "Synthesis",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
