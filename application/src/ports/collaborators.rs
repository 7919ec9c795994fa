//! Pipeline collaborator ports
//!
//! One trait per external capability the orchestrator invokes. The
//! orchestrator never retries; any retry policy belongs to the adapter.

use super::llm_gateway::GatewayError;
use async_trait::async_trait;
use gated_rag_domain::{ContextRecord, FilteredQuestionSet, Question, RawResponse};
use std::sync::Arc;
use thiserror::Error;

/// Errors a collaborator can report
#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Other(String),
}

/// Binary math/theory classifier.
#[async_trait]
pub trait QuestionClassifier: Send + Sync {
    /// Returns the raw verdict text, expected to be `TRUE` or `FALSE`.
    async fn classify(&self, question: &Question) -> Result<String, CollaboratorError>;
}

/// Splits a question into sub-questions.
#[async_trait]
pub trait QuestionDecomposer: Send + Sync {
    async fn decompose(&self, question: &Question) -> Result<Vec<String>, CollaboratorError>;
}

/// Selects the sub-questions relevant to the original question.
#[async_trait]
pub trait SubQuestionFilter: Send + Sync {
    /// Returns the untrusted filter output; the orchestrator normalizes it.
    async fn filter(
        &self,
        question: &Question,
        sub_questions: &[String],
    ) -> Result<RawResponse, CollaboratorError>;
}

/// Retrieves chunks for every filtered question in one batch.
#[async_trait]
pub trait ChunkRetriever: Send + Sync {
    /// Implementations must accept a degraded set; returning no records for
    /// it is allowed.
    async fn retrieve(
        &self,
        filtered: &FilteredQuestionSet,
    ) -> Result<Vec<ContextRecord>, CollaboratorError>;
}

/// Reorders and truncates each record's chunks by relevance.
#[async_trait]
pub trait ChunkReranker: Send + Sync {
    async fn rerank(
        &self,
        records: Vec<ContextRecord>,
    ) -> Result<Vec<ContextRecord>, CollaboratorError>;
}

/// Replaces each record's chunks with condensed text.
#[async_trait]
pub trait ChunkSummarizer: Send + Sync {
    async fn summarize(
        &self,
        records: Vec<ContextRecord>,
    ) -> Result<Vec<ContextRecord>, CollaboratorError>;
}

/// Produces the final answer from the question and its context.
#[async_trait]
pub trait AnswerSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        question: &Question,
        context: &[ContextRecord],
    ) -> Result<String, CollaboratorError>;
}

/// The full set of collaborators one pipeline needs.
#[derive(Clone)]
pub struct PipelineCollaborators {
    pub classifier: Arc<dyn QuestionClassifier>,
    pub decomposer: Arc<dyn QuestionDecomposer>,
    pub filter: Arc<dyn SubQuestionFilter>,
    pub retriever: Arc<dyn ChunkRetriever>,
    pub reranker: Arc<dyn ChunkReranker>,
    pub summarizer: Arc<dyn ChunkSummarizer>,
    pub synthesizer: Arc<dyn AnswerSynthesizer>,
}
