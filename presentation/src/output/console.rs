//! Console output formatter for pipeline results

use colored::Colorize;
use gated_rag_domain::{
    FilteredQuestionSet, PipelineAnswer, PipelineResult, Question, SummarizedChunks,
};

/// Formats pipeline results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete pipeline result
    pub fn format(question: &Question, result: &PipelineResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Gated RAG Result"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Question:".cyan().bold(), question));

        match result {
            PipelineResult::Success(answer) => Self::push_answer(&mut output, answer),
            PipelineResult::Failure(failure) => {
                output.push_str(&format!(
                    "\n{} {}\n",
                    "Error:".red().bold(),
                    failure.message
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn push_answer(output: &mut String, answer: &PipelineAnswer) {
        let route = match answer.summarized_chunks {
            SummarizedChunks::NotNeeded => "direct answer (mathematical/theoretical)",
            SummarizedChunks::Records(_) => "retrieval",
        };
        output.push_str(&format!("{} {}\n", "Route:".cyan().bold(), route));

        if let SummarizedChunks::Records(records) = &answer.summarized_chunks {
            output.push_str(&Self::section_header("Filtered Sub-questions"));
            match &answer.filtered_questions {
                FilteredQuestionSet::Degraded(text) => {
                    output.push_str(&format!(
                        "{}\n{}\n",
                        "(filter output was not structured)".yellow(),
                        Self::indent(text, "  ").dimmed()
                    ));
                }
                set if set.is_empty() => output.push_str(&format!("{}\n", "(none)".dimmed())),
                set => {
                    for q in set.questions() {
                        output.push_str(&format!("  * {}\n", q));
                    }
                }
            }

            output.push_str(&Self::section_header("Summarized Context"));
            if records.is_empty() {
                output.push_str(&format!("{}\n", "(none)".dimmed()));
            }
            for record in records {
                output.push_str(&format!(
                    "\n{}\n",
                    format!("── {} ──", record.question).yellow().bold()
                ));
                for text in &record.search_results {
                    output.push_str(&Self::indent(text, "  "));
                    output.push('\n');
                }
            }
        }

        output.push_str(&Self::section_header("Answer"));
        output.push_str(&answer.answer);
        output.push('\n');
    }

    /// Format as JSON, the same payload the HTTP API returns
    pub fn format_json(result: &PipelineResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the answer only (concise output)
    pub fn format_answer_only(result: &PipelineResult) -> String {
        match result {
            PipelineResult::Success(answer) => format!("{}\n", answer.answer),
            PipelineResult::Failure(failure) => {
                format!("{} {}\n", "Error:".red().bold(), failure.message)
            }
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gated_rag_domain::{ContextRecord, FilteredQuestion, Stage};

    fn rag_answer(filtered: FilteredQuestionSet) -> PipelineResult {
        PipelineResult::success(PipelineAnswer {
            filtered_questions: filtered,
            summarized_chunks: SummarizedChunks::Records(vec![ContextRecord::new(
                "Which restaurants are open late?",
                vec!["Ramen Ichi closes at 2am.".to_string()],
            )]),
            answer: "Try Ramen Ichi.".to_string(),
        })
    }

    #[test]
    fn test_format_direct_answer() {
        let result = PipelineResult::success(PipelineAnswer::direct("E = hν"));
        let out = ConsoleFormatter::format(&Question::new("Explain Planck."), &result);
        assert!(out.contains("Explain Planck."));
        assert!(out.contains("direct answer"));
        assert!(out.contains("E = hν"));
        assert!(!out.contains("Summarized Context"));
    }

    #[test]
    fn test_format_rag_answer() {
        let result = rag_answer(FilteredQuestionSet::Structured(vec![FilteredQuestion::new(
            "Which restaurants are open late?",
        )]));
        let out = ConsoleFormatter::format(&Question::new("Where to eat?"), &result);
        assert!(out.contains("retrieval"));
        assert!(out.contains("  * Which restaurants are open late?"));
        assert!(out.contains("  Ramen Ichi closes at 2am."));
        assert!(out.contains("Try Ramen Ichi."));
    }

    #[test]
    fn test_format_degraded_filter_output() {
        let result = rag_answer(FilteredQuestionSet::Degraded("no json here".into()));
        let out = ConsoleFormatter::format(&Question::new("q"), &result);
        assert!(out.contains("not structured"));
        assert!(out.contains("no json here"));
    }

    #[test]
    fn test_format_failure() {
        let result = PipelineResult::failure(Some(Stage::Rerank), "Rerank failed: timeout");
        let out = ConsoleFormatter::format(&Question::new("q"), &result);
        assert!(out.contains("Rerank failed: timeout"));
        assert!(!out.contains("Route:"));

        let short = ConsoleFormatter::format_answer_only(&result);
        assert!(short.contains("Rerank failed: timeout"));
    }

    #[test]
    fn test_format_answer_only() {
        let result = PipelineResult::success(PipelineAnswer::direct("42"));
        assert_eq!(ConsoleFormatter::format_answer_only(&result), "42\n");
    }

    #[test]
    fn test_format_json_matches_wire_shape() {
        let result =
            PipelineResult::failure(None, "An unexpected error occurred in the pipeline: x");
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&result)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"error": "An unexpected error occurred in the pipeline: x"})
        );
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
