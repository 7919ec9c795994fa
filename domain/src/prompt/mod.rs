//! Prompt domain
//!
//! Templates for the language-model calls made by the LLM-backed stage
//! adapters: classification, decomposition, filtering, summarization and
//! final answer synthesis.

mod template;

pub use template::PromptTemplate;
