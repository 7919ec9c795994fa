//! Final answer synthesis backed by a chat model.

use async_trait::async_trait;
use gated_rag_application::{AnswerSynthesizer, ChatPrompt, CollaboratorError, LlmGateway};
use gated_rag_domain::{ContextRecord, PromptTemplate, Question};
use std::sync::Arc;

pub struct LlmAnswerSynthesizer {
    gateway: Arc<dyn LlmGateway>,
}

impl LlmAnswerSynthesizer {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl AnswerSynthesizer for LlmAnswerSynthesizer {
    async fn synthesize(
        &self,
        question: &Question,
        context: &[ContextRecord],
    ) -> Result<String, CollaboratorError> {
        let prompt = ChatPrompt::new(
            PromptTemplate::answer_system(),
            PromptTemplate::answer_prompt(question.content(), context),
        );
        let answer = self.gateway.complete(&prompt).await?;
        Ok(answer.trim().to_string())
    }
}
