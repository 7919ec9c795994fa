//! Prompt templates for the pipeline stages

use crate::pipeline::records::ContextRecord;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for the math/theory classifier
    pub fn classifier_system() -> &'static str {
        r#"You are a question classifier. Your task is to determine if a user's question is mathematical or theory-based.

A question should be classified as mathematical/theory-based (TRUE) if it involves:
- Mathematical calculations, equations, or formulas
- Mathematical concepts (algebra, calculus, geometry, statistics, etc.)
- Theoretical physics, chemistry, or other sciences
- Abstract theoretical concepts or frameworks
- Logical reasoning or proofs
- Scientific theories or principles

A question should be classified as non-mathematical/theory-based (FALSE) if it involves:
- Practical how-to instructions
- Personal advice or opinions
- Current events or news
- Creative writing or storytelling
- General knowledge facts (unless mathematical/theoretical)
- Product recommendations
- Entertainment or casual conversation

Instructions:
1. Analyze the user's question carefully
2. Determine if it falls into the mathematical/theory-based category
3. Respond with only "TRUE" or "FALSE" (nothing else)"#
    }

    /// System prompt for question decomposition
    pub fn decompose_system() -> &'static str {
        r#"You break a user's question into simpler, self-contained sub-questions.
Each sub-question must be answerable on its own by searching a document collection.
Keep the user's terminology. Do not answer the questions.
Respond with a JSON array of strings and nothing else."#
    }

    /// User prompt for question decomposition
    pub fn decompose_prompt(question: &str, max_sub_questions: usize) -> String {
        format!(
            r#"Question: {}

Write at most {} sub-questions as a JSON array of strings."#,
            question, max_sub_questions
        )
    }

    /// System prompt for the sub-question relevance filter
    pub fn filter_system() -> &'static str {
        r#"You decide which sub-questions are relevant for answering an original question.
Drop sub-questions that are off-topic, redundant, or unanswerable from documents.
Respond with a JSON array of objects of the form {"question": "..."} and nothing else."#
    }

    /// User prompt for the sub-question relevance filter
    pub fn filter_prompt(question: &str, sub_questions: &[String]) -> String {
        let mut prompt = format!("Original question: {}\n\nSub-questions:\n", question);
        for (i, sub) in sub_questions.iter().enumerate() {
            prompt.push_str(&format!("{}. {}\n", i + 1, sub));
        }
        prompt.push_str("\nReturn the relevant sub-questions as a JSON array.");
        prompt
    }

    /// System prompt for chunk summarization
    pub fn summarize_system() -> &'static str {
        r#"You condense retrieved passages into a short summary that keeps every fact relevant to the question.
Do not add information that is not in the passages. If the passages are irrelevant, say so in one sentence."#
    }

    /// User prompt for summarizing one question's chunks
    pub fn summarize_prompt(record: &ContextRecord) -> String {
        let mut prompt = format!("Question: {}\n\nPassages:\n", record.question);
        for (i, chunk) in record.search_results.iter().enumerate() {
            prompt.push_str(&format!("\n--- Passage {} ---\n{}\n", i + 1, chunk));
        }
        prompt.push_str("\nWrite the summary.");
        prompt
    }

    /// System prompt for final answer synthesis
    pub fn answer_system() -> &'static str {
        r#"You are a knowledgeable assistant answering a user's question.
Use the provided context where it is relevant. When the context says no external context is needed,
answer from your own knowledge with clear step-by-step reasoning.
Be accurate and concise. Do not mention the context blocks themselves."#
    }

    /// User prompt for final answer synthesis
    pub fn answer_prompt(question: &str, context: &[ContextRecord]) -> String {
        let mut prompt = format!("Question: {}\n\nContext:\n", question);
        for (i, record) in context.iter().enumerate() {
            prompt.push_str(&format!("\n[{}] {}\n", i + 1, record.question));
            for result in &record.search_results {
                prompt.push_str(&format!("- {}\n", result));
            }
        }
        if context.is_empty() {
            prompt.push_str("(none)\n");
        }
        prompt.push_str("\nAnswer the question.");
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::question::Question;

    #[test]
    fn test_classifier_prompt_demands_true_false() {
        assert!(
            PromptTemplate::classifier_system().contains(r#"Respond with only "TRUE" or "FALSE""#)
        );
    }

    #[test]
    fn test_filter_prompt_lists_sub_questions() {
        let subs = vec!["first?".to_string(), "second?".to_string()];
        let prompt = PromptTemplate::filter_prompt("main?", &subs);
        assert!(prompt.contains("Original question: main?"));
        assert!(prompt.contains("1. first?"));
        assert!(prompt.contains("2. second?"));
    }

    #[test]
    fn test_summarize_prompt_numbers_passages() {
        let record = ContextRecord::new("q", vec!["alpha".into(), "beta".into()]);
        let prompt = PromptTemplate::summarize_prompt(&record);
        assert!(prompt.contains("--- Passage 1 ---\nalpha"));
        assert!(prompt.contains("--- Passage 2 ---\nbeta"));
    }

    #[test]
    fn test_answer_prompt_with_direct_context() {
        let q = Question::new("Explain Planck's Quantum Hypothesis.");
        let context = vec![ContextRecord::direct_answer(&q)];
        let prompt = PromptTemplate::answer_prompt(q.content(), &context);
        assert!(prompt.contains("[1] Explain Planck's Quantum Hypothesis."));
        assert!(prompt.contains("No external context needed"));
    }

    #[test]
    fn test_answer_prompt_without_context() {
        let prompt = PromptTemplate::answer_prompt("q", &[]);
        assert!(prompt.contains("(none)"));
    }
}
