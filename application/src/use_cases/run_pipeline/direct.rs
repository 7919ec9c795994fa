//! Direct-answer path for mathematical/theoretical questions.

use super::RunPipelineUseCase;
use super::types::PipelineError;
use crate::ports::progress::PipelineProgressNotifier;
use gated_rag_domain::{ContextRecord, PipelineAnswer, Question, Stage};
use tracing::info;

impl RunPipelineUseCase {
    /// Synthesize an answer from a single synthetic context record.
    ///
    /// A synthesis failure is returned as is; the RAG path is never used as
    /// a fallback.
    pub(super) async fn run_direct(
        &self,
        question: &Question,
        progress: &dyn PipelineProgressNotifier,
    ) -> Result<PipelineAnswer, PipelineError> {
        info!("Answering directly, no retrieval needed");
        let context = [ContextRecord::direct_answer(question)];

        let answer = self
            .run_stage(
                Stage::Synthesis,
                progress,
                self.collaborators.synthesizer.synthesize(question, &context),
            )
            .await?;

        Ok(PipelineAnswer::direct(answer))
    }
}
