//! Chunk summarization backed by a chat model.

use async_trait::async_trait;
use futures::future::try_join_all;
use gated_rag_application::{ChatPrompt, ChunkSummarizer, CollaboratorError, LlmGateway};
use gated_rag_domain::{ContextRecord, PromptTemplate};
use std::sync::Arc;
use tracing::debug;

/// Condenses each record's chunks into a single summary.
///
/// Records are summarized concurrently, one model call each, and returned in
/// their input order. The first failure fails the whole stage.
pub struct LlmChunkSummarizer {
    gateway: Arc<dyn LlmGateway>,
}

impl LlmChunkSummarizer {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    async fn summarize_record(
        &self,
        record: ContextRecord,
    ) -> Result<ContextRecord, CollaboratorError> {
        if record.is_empty() {
            return Ok(record);
        }

        let prompt = ChatPrompt::new(
            PromptTemplate::summarize_system(),
            PromptTemplate::summarize_prompt(&record),
        );
        let summary = self.gateway.complete(&prompt).await?;
        debug!(
            "Summarized {} chunks for '{}'",
            record.search_results.len(),
            record.question
        );
        Ok(ContextRecord::new(
            record.question,
            vec![summary.trim().to_string()],
        ))
    }
}

#[async_trait]
impl ChunkSummarizer for LlmChunkSummarizer {
    async fn summarize(
        &self,
        records: Vec<ContextRecord>,
    ) -> Result<Vec<ContextRecord>, CollaboratorError> {
        try_join_all(records.into_iter().map(|r| self.summarize_record(r))).await
    }
}
