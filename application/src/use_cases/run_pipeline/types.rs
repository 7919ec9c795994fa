//! Type definitions for the RunPipeline use case.

use crate::ports::collaborators::CollaboratorError;
use gated_rag_domain::{PipelineResult, Stage};
use std::any::Any;
use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// Each variant names the stage whose collaborator failed. A degraded filter
/// response is not an error and never appears here.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Classification failed: {0}")]
    Classification(#[source] CollaboratorError),

    #[error("Decomposition failed: {0}")]
    Decomposition(#[source] CollaboratorError),

    #[error("Sub-question filter failed: {0}")]
    Filter(#[source] CollaboratorError),

    #[error("Chunk retrieval failed: {0}")]
    Retrieval(#[source] CollaboratorError),

    #[error("Rerank failed: {0}")]
    Rerank(#[source] CollaboratorError),

    #[error("Summarization failed: {0}")]
    Summarization(#[source] CollaboratorError),

    #[error("Synthesis failed: {0}")]
    Synthesis(#[source] CollaboratorError),

    #[error("An unexpected error occurred in the pipeline: {0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Wrap a collaborator failure in the variant for `stage`.
    pub fn at(stage: Stage, source: CollaboratorError) -> Self {
        match stage {
            Stage::Classification => PipelineError::Classification(source),
            Stage::Decomposition => PipelineError::Decomposition(source),
            Stage::Filter => PipelineError::Filter(source),
            Stage::Retrieval => PipelineError::Retrieval(source),
            Stage::Rerank => PipelineError::Rerank(source),
            Stage::Summarization => PipelineError::Summarization(source),
            Stage::Synthesis => PipelineError::Synthesis(source),
        }
    }

    /// Build an unexpected failure from a caught panic payload.
    pub(super) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "collaborator panicked".to_string()
        };
        PipelineError::Unexpected(message)
    }

    /// The failing stage, `None` for unexpected failures.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::Classification(_) => Some(Stage::Classification),
            PipelineError::Decomposition(_) => Some(Stage::Decomposition),
            PipelineError::Filter(_) => Some(Stage::Filter),
            PipelineError::Retrieval(_) => Some(Stage::Retrieval),
            PipelineError::Rerank(_) => Some(Stage::Rerank),
            PipelineError::Summarization(_) => Some(Stage::Summarization),
            PipelineError::Synthesis(_) => Some(Stage::Synthesis),
            PipelineError::Unexpected(_) => None,
        }
    }

    pub fn into_result(self) -> PipelineResult {
        PipelineResult::failure(self.stage(), self.to_string())
    }
}
