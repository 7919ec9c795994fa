//! Progress reporting for pipeline runs

use colored::Colorize;
use gated_rag_application::ports::progress::PipelineProgressNotifier;
use gated_rag_domain::{ClassificationVerdict, DegradeReason, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn route_label(verdict: ClassificationVerdict) -> &'static str {
        match verdict {
            ClassificationVerdict::MathOrTheory => "direct answer (mathematical/theoretical)",
            ClassificationVerdict::General => "retrieval pipeline",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgressNotifier for ProgressReporter {
    fn on_route_selected(&self, verdict: ClassificationVerdict) {
        let _ = self.multi.println(format!(
            "{} {}",
            "Route:".cyan().bold(),
            Self::route_label(verdict)
        ));
    }

    fn on_stage_start(&self, stage: Stage) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(stage.display_name());
        pb.set_message("running...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_stage_complete(&self, _stage: Stage, success: bool) {
        let Some(pb) = self.stage_bar.lock().ok().and_then(|mut slot| slot.take()) else {
            return;
        };
        if success {
            pb.finish_with_message(format!("{}", "done".green()));
        } else {
            pb.finish_with_message(format!("{}", "failed".red()));
        }
    }

    fn on_normalization_degraded(&self, reason: &DegradeReason) {
        let _ = self.multi.println(format!(
            "  {} filter output not structured ({}), continuing with raw text",
            "!".yellow().bold(),
            reason
        ));
    }
}

/// Simple text-based progress (no fancy UI)
///
/// Writes to stderr so `--output json` stays machine-readable.
pub struct SimpleProgress;

impl PipelineProgressNotifier for SimpleProgress {
    fn on_route_selected(&self, verdict: ClassificationVerdict) {
        eprintln!(
            "{} {}",
            "Route:".cyan().bold(),
            ProgressReporter::route_label(verdict)
        );
    }

    fn on_stage_start(&self, stage: Stage) {
        eprintln!("{} {}", "->".cyan(), stage.display_name().bold());
    }

    fn on_stage_complete(&self, stage: Stage, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), stage.display_name());
        } else {
            eprintln!("  {} {} (failed)", "x".red(), stage.display_name());
        }
    }

    fn on_normalization_degraded(&self, reason: &DegradeReason) {
        eprintln!(
            "  {} filter output not structured ({}), continuing with raw text",
            "!".yellow(),
            reason
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_handles_unbalanced_calls() {
        let reporter = ProgressReporter::new();
        // Completion without a start is ignored
        reporter.on_stage_complete(Stage::Rerank, true);
        reporter.on_stage_start(Stage::Classification);
        reporter.on_stage_complete(Stage::Classification, false);
        assert!(reporter.stage_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_route_labels() {
        let direct = ProgressReporter::route_label(ClassificationVerdict::MathOrTheory);
        assert!(direct.contains("direct"));
        let rag = ProgressReporter::route_label(ClassificationVerdict::General);
        assert!(rag.contains("retrieval"));
    }
}
