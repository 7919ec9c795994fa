//! Retrieval path: Decompose → Filter → Retrieve → Rerank → Summarize → Synthesis.

use super::RunPipelineUseCase;
use super::types::PipelineError;
use crate::ports::pipeline_logger::PipelineEvent;
use crate::ports::progress::PipelineProgressNotifier;
use gated_rag_domain::util::preview;
use gated_rag_domain::{
    FilteredQuestionSet, Normalized, PipelineAnswer, Question, Stage, SummarizedChunks, normalize,
};
use tracing::{debug, info, warn};

impl RunPipelineUseCase {
    /// Run the five retrieval stages and final synthesis strictly in order.
    ///
    /// Each stage consumes only the previous stage's output. The first
    /// failing stage aborts the rest.
    pub(super) async fn run_rag(
        &self,
        question: &Question,
        progress: &dyn PipelineProgressNotifier,
    ) -> Result<PipelineAnswer, PipelineError> {
        let c = &self.collaborators;

        // Step 1: Decompose
        let sub_questions = self
            .run_stage(Stage::Decomposition, progress, c.decomposer.decompose(question))
            .await?;
        debug!("Decomposed into {} sub-questions", sub_questions.len());

        // Step 2: Filter, then reconcile the untrusted output
        let raw = self
            .run_stage(
                Stage::Filter,
                progress,
                c.filter.filter(question, &sub_questions),
            )
            .await?;
        let filtered = self.reconcile_filter_output(normalize(raw), progress);

        // Step 3: Retrieve
        let chunks = self
            .run_stage(Stage::Retrieval, progress, c.retriever.retrieve(&filtered))
            .await?;
        debug!("Retrieved chunks for {} questions", chunks.len());

        // Step 4: Rerank
        let ranked = self
            .run_stage(Stage::Rerank, progress, c.reranker.rerank(chunks))
            .await?;

        // Step 5: Summarize
        let summarized = self
            .run_stage(Stage::Summarization, progress, c.summarizer.summarize(ranked))
            .await?;

        // Final answer
        let answer = self
            .run_stage(
                Stage::Synthesis,
                progress,
                c.synthesizer.synthesize(question, &summarized),
            )
            .await?;

        info!("Pipeline completed successfully");
        Ok(PipelineAnswer {
            filtered_questions: filtered,
            summarized_chunks: SummarizedChunks::Records(summarized),
            answer,
        })
    }

    /// Turn the normalized filter output into a [`FilteredQuestionSet`].
    ///
    /// Degradation is reported, never raised: the run continues with the
    /// original text.
    fn reconcile_filter_output(
        &self,
        normalized: Normalized,
        progress: &dyn PipelineProgressNotifier,
    ) -> FilteredQuestionSet {
        if let Normalized::Degraded { text, reason } = &normalized {
            warn!("Could not parse filter output ({}), using raw response", reason);
            progress.on_normalization_degraded(reason);
            self.logger.log(PipelineEvent::new(
                "filter_degraded",
                serde_json::json!({
                    "reason": reason.to_string(),
                    "text": preview(text, 500),
                }),
            ));
        }

        let (filtered, dropped) = FilteredQuestionSet::from_normalized(normalized);
        if dropped > 0 {
            warn!("Dropped {} filter entries without a question", dropped);
        }
        info!("Filtered sub-questions: {}", filtered.len());
        filtered
    }
}
