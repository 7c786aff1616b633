use coulex::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// Terminal view of an energy run: a spinner per phase, a bar per counted task.
///
/// `ProgressBar` is a shared handle, so clones of the view drive the same bar from any worker.
#[derive(Clone)]
pub struct ProgressView {
    bar: ProgressBar,
}

impl ProgressView {
    pub fn stderr() -> Self {
        Self::drawing_to(ProgressDrawTarget::stderr())
    }

    /// A view that draws nothing, for quiet runs.
    pub fn hidden() -> Self {
        Self::drawing_to(ProgressDrawTarget::hidden())
    }

    fn drawing_to(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(phase_style());
        bar.finish_and_clear();
        Self { bar }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let view = self.clone();
        Box::new(move |event| view.apply(event))
    }

    fn apply(&self, event: Progress) {
        let bar = &self.bar;
        match event {
            Progress::PhaseStart { name } => {
                bar.reset();
                bar.set_length(0);
                bar.set_style(phase_style());
                bar.set_message(name);
                bar.enable_steady_tick(TICK);
            }
            Progress::TaskStart { total_steps } => {
                bar.disable_steady_tick();
                bar.reset();
                bar.set_length(total_steps);
                bar.set_style(task_style());
            }
            Progress::TaskIncrement => bar.inc(1),
            Progress::TaskFinish => {
                if let Some(len) = bar.length() {
                    bar.set_position(len);
                }
                bar.finish();
            }
            Progress::PhaseFinish => {
                bar.disable_steady_tick();
                bar.finish_with_message("done");
            }
            // The run summary arrives after the last phase; it replaces the final line.
            Progress::Message(text) if bar.is_finished() => bar.finish_with_message(text),
            Progress::Message(text) => bar.println(text),
        }
    }
}

fn phase_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn task_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg} {wide_bar:.cyan/blue} {human_pos}/{human_len} {per_sec}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}
