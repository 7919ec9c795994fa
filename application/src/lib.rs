//! Application layer for gated-rag
//!
//! This crate contains the pipeline use case and the port definitions that
//! infrastructure adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    collaborators::{
        AnswerSynthesizer, ChunkReranker, ChunkRetriever, ChunkSummarizer, CollaboratorError,
        PipelineCollaborators, QuestionClassifier, QuestionDecomposer, SubQuestionFilter,
    },
    llm_gateway::{ChatPrompt, GatewayError, LlmGateway},
    pipeline_logger::{NoPipelineLogger, PipelineEvent, PipelineLogger},
    progress::{NoProgress, PipelineProgressNotifier},
};
pub use use_cases::run_pipeline::{PipelineError, RunPipelineUseCase};
