use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use restraintvis::engine::progress::{Progress, ProgressCallback};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// Renders workflow events on stderr: a spinner per phase and a counted bar
/// while restraints are drawn.
#[derive(Clone)]
pub struct RenderProgress {
    bar: ProgressBar,
}

impl RenderProgress {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        Self {
            bar: ProgressBar::with_draw_target(None, target),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let view = self.clone();
        Box::new(move |event| view.apply(event))
    }

    fn apply(&self, event: Progress) {
        match event {
            Progress::PhaseStart { name } => {
                self.bar.reset();
                self.bar.set_style(phase_style());
                self.bar.set_message(name);
                self.bar.enable_steady_tick(TICK);
            }
            Progress::RestraintsFound { count } => {
                self.bar.disable_steady_tick();
                self.bar.set_style(restraint_style());
                self.bar.set_length(count);
                self.bar.set_position(0);
            }
            // Indices are zero-based.
            Progress::RestraintRendered { index } => {
                self.bar.set_position(index as u64 + 1);
            }
            Progress::RenderingFinished => {
                if let Some(len) = self.bar.length() {
                    self.bar.set_position(len);
                }
            }
            Progress::PhaseFinish => {
                self.bar.disable_steady_tick();
                let phase = self.bar.message();
                self.bar.finish_with_message(format!("✓ {}", phase));
            }
            Progress::Message(text) => {
                self.bar.suspend(|| eprintln!("  note: {}", text));
            }
        }
    }
}

impl Default for RenderProgress {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn restraint_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<12} [{bar:30.cyan/blue}] {pos}/{len} restraints")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}
