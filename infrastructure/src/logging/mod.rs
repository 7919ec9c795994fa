//! Logging infrastructure: structured pipeline event logging.
//!
//! Provides [`JsonlPipelineLogger`], a JSONL file writer that implements
//! the [`PipelineLogger`](gated_rag_application::PipelineLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlPipelineLogger;
