//! OpenAI-compatible chat completions adapter
//!
//! Implements the [`LlmGateway`](gated_rag_application::LlmGateway) port over
//! any server that speaks the `/chat/completions` protocol.

mod gateway;
mod types;

pub use gateway::OpenAiCompatibleGateway;
