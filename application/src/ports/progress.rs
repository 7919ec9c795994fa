//! Progress notification port
//!
//! Defines the interface for reporting progress during a pipeline run.

use gated_rag_domain::{ClassificationVerdict, DegradeReason, Stage};

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console spinner, plain lines, nothing).
/// All methods default to no-ops.
pub trait PipelineProgressNotifier: Send + Sync {
    /// Called once the classifier gate has decided the route
    fn on_route_selected(&self, _verdict: ClassificationVerdict) {}

    /// Called before a collaborator is invoked
    fn on_stage_start(&self, _stage: Stage) {}

    /// Called after a collaborator returns
    fn on_stage_complete(&self, _stage: Stage, _success: bool) {}

    /// Called when the filter output could not be reconciled
    fn on_normalization_degraded(&self, _reason: &DegradeReason) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PipelineProgressNotifier for NoProgress {}
