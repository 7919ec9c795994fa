//! Question decomposition backed by a chat model.

use async_trait::async_trait;
use gated_rag_application::{ChatPrompt, CollaboratorError, LlmGateway, QuestionDecomposer};
use gated_rag_domain::{
    FilteredQuestion, Normalized, PromptTemplate, Question, RawResponse, normalize,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Splits a question into at most `max_sub_questions` sub-questions.
pub struct LlmQuestionDecomposer {
    gateway: Arc<dyn LlmGateway>,
    max_sub_questions: usize,
}

impl LlmQuestionDecomposer {
    pub fn new(gateway: Arc<dyn LlmGateway>, max_sub_questions: usize) -> Self {
        Self {
            gateway,
            max_sub_questions,
        }
    }
}

#[async_trait]
impl QuestionDecomposer for LlmQuestionDecomposer {
    async fn decompose(&self, question: &Question) -> Result<Vec<String>, CollaboratorError> {
        let prompt = ChatPrompt::new(
            PromptTemplate::decompose_system(),
            PromptTemplate::decompose_prompt(question.content(), self.max_sub_questions),
        );
        let reply = self.gateway.complete(&prompt).await?;

        let sub_questions = parse_sub_questions(&reply, self.max_sub_questions);
        if sub_questions.is_empty() {
            return Err(CollaboratorError::InvalidResponse(
                "decomposition reply contained no sub-questions".to_string(),
            ));
        }
        debug!("Sub-questions: {:?}", sub_questions);
        Ok(sub_questions)
    }
}

/// Read sub-questions from a model reply.
///
/// A JSON array (possibly wrapped in prose) yields its string entries and the
/// `question` field of its object entries. Anything else is read as one
/// sub-question per non-blank line.
fn parse_sub_questions(reply: &str, max: usize) -> Vec<String> {
    let parsed: Vec<String> = match normalize(RawResponse::Text(reply.to_string())) {
        Normalized::Structured(Value::Array(items)) => items
            .iter()
            .filter_map(FilteredQuestion::from_value)
            .map(|q| q.question.trim().to_string())
            .collect(),
        _ => reply.lines().map(strip_list_marker).map(String::from).collect(),
    };

    parsed
        .into_iter()
        .filter(|q| !q.is_empty())
        .take(max)
        .collect()
}

/// Strip a leading `-`, `*`, `•`, `1.` or `1)` marker.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('*'))
        .or_else(|| line.strip_prefix('•'))
    {
        return rest.trim_start();
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0
        && let Some(rest) = line[digits..]
            .strip_prefix('.')
            .or_else(|| line[digits..].strip_prefix(')'))
    {
        return rest.trim_start();
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::mock::MockGateway;

    #[test]
    fn test_parse_json_array_of_strings() {
        let reply = r#"Sure! ["What is a quantum?", "Who was Max Planck?"]"#;
        assert_eq!(
            parse_sub_questions(reply, 5),
            vec!["What is a quantum?", "Who was Max Planck?"]
        );
    }

    #[test]
    fn test_parse_json_array_of_objects() {
        let reply = r#"[{"question": "A?"}, {"q": "ignored"}, "B?", 3]"#;
        assert_eq!(parse_sub_questions(reply, 5), vec!["A?", "B?"]);
    }

    #[test]
    fn test_parse_falls_back_to_lines() {
        let reply = "1. What is a quantum?\n2) Who was Planck?\n\n\
                     - What is black-body radiation?\n* Why does it matter?";
        assert_eq!(
            parse_sub_questions(reply, 10),
            vec![
                "What is a quantum?",
                "Who was Planck?",
                "What is black-body radiation?",
                "Why does it matter?"
            ]
        );
    }

    #[test]
    fn test_parse_caps_at_max() {
        let reply = r#"["a", "b", "c", "d"]"#;
        assert_eq!(parse_sub_questions(reply, 2), vec!["a", "b"]);
    }

    #[test]
    fn test_strip_list_marker_leaves_plain_text() {
        assert_eq!(strip_list_marker("  1984 was a year?"), "1984 was a year?");
        assert_eq!(strip_list_marker("plain"), "plain");
    }

    #[tokio::test]
    async fn test_decompose_sends_limit_in_prompt() {
        let gateway = Arc::new(MockGateway::replying(r#"["x?", "y?"]"#));
        let decomposer = LlmQuestionDecomposer::new(gateway.clone(), 3);

        let subs = decomposer.decompose(&Question::new("big question")).await.unwrap();
        assert_eq!(subs, vec!["x?", "y?"]);

        let prompt = &gateway.prompts()[0];
        assert_eq!(prompt.system, PromptTemplate::decompose_system());
        assert!(prompt.user.contains("big question"));
        assert!(prompt.user.contains("at most 3"));
    }

    #[tokio::test]
    async fn test_empty_reply_is_invalid_response() {
        let gateway = Arc::new(MockGateway::replying("[]"));
        let err = LlmQuestionDecomposer::new(gateway, 5)
            .decompose(&Question::new("q"))
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::InvalidResponse(_)));
    }
}
