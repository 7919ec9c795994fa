//! Classifier gate for the RunPipeline use case.

use super::RunPipelineUseCase;
use super::types::PipelineError;
use crate::ports::progress::PipelineProgressNotifier;
use gated_rag_domain::{ClassificationVerdict, Question, Stage};
use tracing::info;

impl RunPipelineUseCase {
    /// Invoke the classifier exactly once and interpret its verdict.
    ///
    /// A classifier failure aborts the run; there is no retry and no default
    /// route.
    pub(super) async fn classify(
        &self,
        question: &Question,
        progress: &dyn PipelineProgressNotifier,
    ) -> Result<ClassificationVerdict, PipelineError> {
        let raw = self
            .run_stage(
                Stage::Classification,
                progress,
                self.collaborators.classifier.classify(question),
            )
            .await?;

        let verdict = ClassificationVerdict::from_raw(&raw);
        info!("Classifier returned {:?}: {} question", raw.trim(), verdict);
        Ok(verdict)
    }
}
