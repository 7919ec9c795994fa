//! Order-preserving fallback reranker.

use async_trait::async_trait;
use gated_rag_application::{ChunkReranker, CollaboratorError};
use gated_rag_domain::ContextRecord;

/// Keeps the first `top_n` chunks of each record in retrieval order.
pub struct TruncatingReranker {
    top_n: usize,
}

impl TruncatingReranker {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }
}

#[async_trait]
impl ChunkReranker for TruncatingReranker {
    async fn rerank(
        &self,
        mut records: Vec<ContextRecord>,
    ) -> Result<Vec<ContextRecord>, CollaboratorError> {
        for record in &mut records {
            record.search_results.truncate(self.top_n);
        }
        Ok(records)
    }
}
