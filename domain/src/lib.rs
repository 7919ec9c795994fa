//! Domain layer for gated-rag
//!
//! This crate contains the core entities, value objects and pure logic of the
//! question-answering pipeline. It has no dependencies on infrastructure or
//! presentation concerns: no I/O, no logging, no async runtime.
//!
//! # Core Concepts
//!
//! ## Classification gate
//!
//! Every question is classified once. A `TRUE` verdict routes it to the
//! direct-answer path; anything else routes it through retrieval:
//!
//! - **Direct answer**: a single synthetic context record, then synthesis
//! - **RAG**: Decompose → Filter → Retrieve → Rerank → Summarize → Synthesis
//!
//! ## Response normalization
//!
//! The sub-question filter is a language model that is asked for JSON but
//! frequently wraps it in prose. [`pipeline::normalizer`] reconciles that
//! output into a [`FilteredQuestionSet`], which is either structured records
//! or the degraded original text.

pub mod config;
pub mod core;
pub mod pipeline;
pub mod prompt;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use core::question::Question;
pub use pipeline::{
    filtered::FilteredQuestionSet,
    normalizer::{DegradeReason, Normalized, RawResponse, normalize},
    records::{ContextRecord, DIRECT_ANSWER_CONTEXT, FilteredQuestion},
    result::{PipelineAnswer, PipelineFailure, PipelineResult, SummarizedChunks},
    stage::Stage,
    verdict::ClassificationVerdict,
};
pub use prompt::PromptTemplate;
