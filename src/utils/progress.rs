use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Batch-level progress: one tick per successfully converted file.
pub struct BatchProgress {
    progress_bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(total: u64, visible: bool) -> Self {
        let progress_bar = if visible {
            ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr())
        } else {
            ProgressBar::hidden()
        };
        progress_bar.set_length(total);

        let style = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} files | {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ");
        progress_bar.set_style(style);

        if visible {
            progress_bar.enable_steady_tick(Duration::from_millis(200));
        }

        Self { progress_bar }
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.progress_bar.set_message(message.into());
    }

    pub fn advance(&self) {
        self.progress_bar.inc(1);
    }

    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    /// Runs `f` with the bar cleared so log output is not interleaved with it.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.progress_bar.suspend(f)
    }

    pub fn finish(&self) {
        self.progress_bar.finish_with_message("done");
    }

    pub fn abandon(&self) {
        self.progress_bar.abandon_with_message("cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_counts() {
        let progress = BatchProgress::new(3, false);
        assert_eq!(progress.position(), 0);

        progress.advance();
        progress.advance();
        assert_eq!(progress.position(), 2);

        let value = progress.suspend(|| 42);
        assert_eq!(value, 42);
        progress.finish();
    }
}
