//! Math/theory classifier backed by a chat model.

use async_trait::async_trait;
use gated_rag_application::{ChatPrompt, CollaboratorError, LlmGateway, QuestionClassifier};
use gated_rag_domain::{PromptTemplate, Question};
use std::sync::Arc;
use tracing::debug;

/// Asks the model whether a question is mathematical or theoretical.
///
/// The reply is returned untouched; the orchestrator interprets it.
pub struct LlmQuestionClassifier {
    gateway: Arc<dyn LlmGateway>,
}

impl LlmQuestionClassifier {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl QuestionClassifier for LlmQuestionClassifier {
    async fn classify(&self, question: &Question) -> Result<String, CollaboratorError> {
        let prompt = ChatPrompt::new(PromptTemplate::classifier_system(), question.content());
        let verdict = self.gateway.complete(&prompt).await?;
        debug!(model = self.gateway.model(), verdict = %verdict.trim(), "Classifier replied");
        Ok(verdict)
    }
}
