//! Terminal pipeline result

use super::filtered::FilteredQuestionSet;
use super::records::ContextRecord;
use super::stage::Stage;
use serde::{Serialize, Serializer};

/// Context handed to synthesis, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizedChunks {
    /// The direct-answer path retrieves nothing; serialized as `""`.
    NotNeeded,
    Records(Vec<ContextRecord>),
}

impl SummarizedChunks {
    pub fn records(&self) -> &[ContextRecord] {
        match self {
            SummarizedChunks::NotNeeded => &[],
            SummarizedChunks::Records(records) => records,
        }
    }
}

impl Serialize for SummarizedChunks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SummarizedChunks::NotNeeded => serializer.serialize_str(""),
            SummarizedChunks::Records(records) => records.serialize(serializer),
        }
    }
}

/// Successful run: all three fields are populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineAnswer {
    pub filtered_questions: FilteredQuestionSet,
    pub summarized_chunks: SummarizedChunks,
    pub answer: String,
}

impl PipelineAnswer {
    /// Result shape of the direct-answer path.
    pub fn direct(answer: impl Into<String>) -> Self {
        Self {
            filtered_questions: FilteredQuestionSet::default(),
            summarized_chunks: SummarizedChunks::NotNeeded,
            answer: answer.into(),
        }
    }
}

/// Failed run. Only the message goes over the wire, as `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineFailure {
    /// Failing stage, `None` for an unexpected failure outside any stage
    #[serde(skip)]
    pub stage: Option<Stage>,
    #[serde(rename = "error")]
    pub message: String,
}

/// Outcome of one pipeline run.
///
/// Serialized untagged: either `{filtered_questions, summarized_chunks,
/// answer}` or `{error}`, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PipelineResult {
    Success(PipelineAnswer),
    Failure(PipelineFailure),
}

impl PipelineResult {
    pub fn success(answer: PipelineAnswer) -> Self {
        PipelineResult::Success(answer)
    }

    pub fn failure(stage: Option<Stage>, message: impl Into<String>) -> Self {
        PipelineResult::Failure(PipelineFailure {
            stage,
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResult::Success(_))
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            PipelineResult::Success(a) => Some(&a.answer),
            PipelineResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PipelineResult::Success(_) => None,
            PipelineResult::Failure(f) => Some(&f.message),
        }
    }

    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            PipelineResult::Success(_) => None,
            PipelineResult::Failure(f) => f.stage,
        }
    }
}
