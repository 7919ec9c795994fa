//! Port for structured pipeline event logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one
//! machine-readable record per pipeline event (route decisions, degraded
//! filter output, stage failures, completions).

use serde_json::Value;

/// A structured pipeline event.
pub struct PipelineEvent {
    /// Event type identifier (e.g., "route_selected", "stage_failed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl PipelineEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging pipeline events to a structured log.
///
/// The `log` method is synchronous and infallible; a logging failure must
/// never affect the pipeline result.
pub trait PipelineLogger: Send + Sync {
    /// Record a pipeline event.
    fn log(&self, event: PipelineEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoPipelineLogger;

impl PipelineLogger for NoPipelineLogger {
    fn log(&self, _event: PipelineEvent) {}
}
