//! Run Pipeline use case.
//!
//! Answers one question end to end:
//!
//! 1. **Classifier gate**: one classifier call decides the route
//! 2. **Direct path** (`TRUE`): synthesize from a single synthetic record
//! 3. **RAG path** (anything else): Decompose → Filter → Retrieve → Rerank →
//!    Summarize → Synthesis, strictly in sequence
//!
//! Every collaborator call site is isolated. A failure at any stage, or a
//! panic inside a collaborator, becomes a [`PipelineResult`] carrying only an
//! `error` message; nothing escapes to the caller.
//!
//! The use case holds no mutable state. One instance can serve any number of
//! concurrent questions, and running the same question twice performs two
//! full, independent executions.

mod direct;
mod gate;
mod rag;
mod types;

pub use types::PipelineError;

use crate::ports::collaborators::{CollaboratorError, PipelineCollaborators};
use crate::ports::pipeline_logger::{NoPipelineLogger, PipelineEvent, PipelineLogger};
use crate::ports::progress::{NoProgress, PipelineProgressNotifier};
use futures::FutureExt;
use gated_rag_domain::util::preview;
use gated_rag_domain::{PipelineAnswer, PipelineResult, Question, Stage};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Use case for answering a question through the gated pipeline.
#[derive(Clone)]
pub struct RunPipelineUseCase {
    collaborators: PipelineCollaborators,
    logger: Arc<dyn PipelineLogger>,
}

impl RunPipelineUseCase {
    pub fn new(collaborators: PipelineCollaborators) -> Self {
        Self {
            collaborators,
            logger: Arc::new(NoPipelineLogger),
        }
    }

    /// Create with a pipeline event logger.
    pub fn with_logger(mut self, logger: Arc<dyn PipelineLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the pipeline with default (no-op) progress
    pub async fn execute(&self, question: Question) -> PipelineResult {
        self.execute_with_progress(question, &NoProgress).await
    }

    /// Execute the pipeline with progress callbacks
    pub async fn execute_with_progress(
        &self,
        question: Question,
        progress: &dyn PipelineProgressNotifier,
    ) -> PipelineResult {
        let start = Instant::now();
        info!("Processing question: '{}'", preview(question.content(), 100));
        self.logger.log(PipelineEvent::new(
            "pipeline_started",
            serde_json::json!({ "question": question.content() }),
        ));

        let outcome = AssertUnwindSafe(self.dispatch(&question, progress))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(PipelineError::from_panic(payload)));

        let result = match outcome {
            Ok(answer) => PipelineResult::success(answer),
            Err(e) => {
                warn!("{}", e);
                self.logger.log(PipelineEvent::new(
                    "stage_failed",
                    serde_json::json!({
                        "stage": e.stage().map(|s| s.as_str()),
                        "error": e.to_string(),
                    }),
                ));
                e.into_result()
            }
        };

        self.logger.log(PipelineEvent::new(
            "pipeline_completed",
            serde_json::json!({
                "success": result.is_success(),
                "duration_ms": start.elapsed().as_millis() as u64,
            }),
        ));
        result
    }

    /// Classify, then run the selected path.
    async fn dispatch(
        &self,
        question: &Question,
        progress: &dyn PipelineProgressNotifier,
    ) -> Result<PipelineAnswer, PipelineError> {
        let verdict = self.classify(question, progress).await?;

        progress.on_route_selected(verdict);
        self.logger.log(PipelineEvent::new(
            "route_selected",
            serde_json::json!({ "verdict": verdict.as_str() }),
        ));

        if verdict.is_direct() {
            self.run_direct(question, progress).await
        } else {
            self.run_rag(question, progress).await
        }
    }

    /// Await one collaborator call, reporting progress and tagging failures
    /// with the stage.
    async fn run_stage<T, F>(
        &self,
        stage: Stage,
        progress: &dyn PipelineProgressNotifier,
        call: F,
    ) -> Result<T, PipelineError>
    where
        F: Future<Output = Result<T, CollaboratorError>>,
    {
        info!("Stage: {}", stage);
        progress.on_stage_start(stage);
        let result = call.await;
        progress.on_stage_complete(stage, result.is_ok());
        result.map_err(|source| PipelineError::at(stage, source))
    }
}
