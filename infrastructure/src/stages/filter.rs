//! Sub-question relevance filter backed by a chat model.

use async_trait::async_trait;
use gated_rag_application::{ChatPrompt, CollaboratorError, LlmGateway, SubQuestionFilter};
use gated_rag_domain::{PromptTemplate, Question, RawResponse};
use std::sync::Arc;

/// Asks the model which sub-questions matter for the original question.
///
/// The reply is returned as [`RawResponse::Text`]; models routinely wrap the
/// requested JSON in prose, so reconciliation is left to the orchestrator.
pub struct LlmSubQuestionFilter {
    gateway: Arc<dyn LlmGateway>,
}

impl LlmSubQuestionFilter {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl SubQuestionFilter for LlmSubQuestionFilter {
    async fn filter(
        &self,
        question: &Question,
        sub_questions: &[String],
    ) -> Result<RawResponse, CollaboratorError> {
        let prompt = ChatPrompt::new(
            PromptTemplate::filter_system(),
            PromptTemplate::filter_prompt(question.content(), sub_questions),
        );
        let reply = self.gateway.complete(&prompt).await?;
        Ok(RawResponse::Text(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::mock::MockGateway;

    #[tokio::test]
    async fn test_reply_is_returned_as_text() {
        let reply = r#"Here you go: [{"question": "Who was Planck?"}]"#;
        let gateway = Arc::new(MockGateway::replying(reply));
        let filter = LlmSubQuestionFilter::new(gateway.clone());

        let raw = filter
            .filter(
                &Question::new("Explain Planck's hypothesis"),
                &["Who was Planck?".to_string(), "What is lunch?".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(raw, RawResponse::Text(reply.to_string()));

        let user = &gateway.prompts()[0].user;
        assert!(user.contains("Explain Planck's hypothesis"));
        assert!(user.contains("1. Who was Planck?"));
        assert!(user.contains("2. What is lunch?"));
    }
}
