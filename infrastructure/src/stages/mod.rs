//! LLM-backed pipeline stages
//!
//! Each adapter implements one collaborator port by sending a templated
//! prompt through a shared [`LlmGateway`](gated_rag_application::LlmGateway).

mod classifier;
mod decomposer;
mod filter;
mod summarizer;
mod synthesizer;

pub use classifier::LlmQuestionClassifier;
pub use decomposer::LlmQuestionDecomposer;
pub use filter::LlmSubQuestionFilter;
pub use summarizer::LlmChunkSummarizer;
pub use synthesizer::LlmAnswerSynthesizer;
