//! Spinner shown while a provider request is pending.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A single steady-ticking spinner line. Hidden in quiet mode.
pub(crate) struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub(crate) fn start(msg: impl Into<String>, quiet: bool) -> Self {
        if quiet {
            return Self {
                pb: ProgressBar::hidden(),
            };
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("  {spinner:.cyan} {msg} {elapsed:.dim}")
            .map(|s| s.tick_chars("/-\\|"))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(msg.into());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// Stop ticking and clear the line.
    pub(crate) fn finish(self) {
        self.pb.finish_and_clear();
    }
}
