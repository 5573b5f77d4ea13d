//! Progress reporting for council operations
//!
//! Both reporters write to stderr so stdout carries only results.

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::Phase;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;

/// Reports progress with indicatif progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::with_draw_target(ProgressDrawTarget::stderr()),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.label());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, model: &str, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), model)
            } else {
                format!("{} {}", "x".red(), model)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Some(pb) = self.phase_bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.finish_with_message(format!("{} complete", phase.label().green()));
        }
    }
}

/// Simple text-based progress (no fancy UI), for non-terminal stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase.label().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _phase: &Phase, model: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {}
}
