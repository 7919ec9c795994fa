//! Infrastructure layer for gated-rag
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;
pub mod rerank;
pub mod retrieval;
pub mod stages;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileLlmConfig, FileLoggingConfig, FileRerankerConfig,
    FileRetrievalConfig, FileServerConfig,
};
pub use logging::JsonlPipelineLogger;
pub use openai::OpenAiCompatibleGateway;
pub use rerank::{CrossEncoderReranker, TruncatingReranker};
pub use retrieval::{Chunk, ChunkStoreError, LocalChunkStore};
pub use stages::{
    LlmAnswerSynthesizer, LlmChunkSummarizer, LlmQuestionClassifier, LlmQuestionDecomposer,
    LlmSubQuestionFilter,
};
