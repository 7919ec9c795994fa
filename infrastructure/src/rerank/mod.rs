//! Chunk reranking adapters
//!
//! [`CrossEncoderReranker`] scores chunks with a remote cross-encoder;
//! [`TruncatingReranker`] keeps retrieval order when none is configured.

mod cross_encoder;
mod truncating;

pub use cross_encoder::CrossEncoderReranker;
pub use truncating::TruncatingReranker;
