//! Progress indicators for Graph retrieval.
//!
//! Responsibilities:
//! - Show a spinner for short calls and a counter for paged user retrieval.
//! - Write ALL progress output to STDERR, never stdout.
//! - Become no-ops when disabled (driven by `--quiet`).
//!
//! Non-responsibilities:
//! - Deciding *when* progress should be shown; callers do.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

fn styled(pb: ProgressBar, template: &str) -> ProgressBar {
    pb.set_draw_target(ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template(template) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Counts users as pages arrive.
///
/// Starts as a spinner and switches to a bar once Graph reports
/// `@odata.count`.
pub(crate) struct UserProgress {
    pb: Option<ProgressBar>,
    has_total: bool,
}

impl UserProgress {
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                pb: None,
                has_total: false,
            };
        }

        let pb = styled(ProgressBar::new_spinner(), "{spinner} {msg}");
        pb.set_message("Fetching licensed users");
        Self {
            pb: Some(pb),
            has_total: false,
        }
    }

    /// Record that `fetched` users have arrived so far.
    pub(crate) fn update(&mut self, fetched: usize, total: Option<u64>) {
        let Some(pb) = &self.pb else {
            return;
        };

        if let Some(total) = total
            && !self.has_total
        {
            pb.set_length(total);
            if let Ok(style) =
                ProgressStyle::with_template("{spinner} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
            {
                pb.set_style(style.progress_chars("=>-"));
            }
            self.has_total = true;
        }
        pb.set_position(fetched as u64);
    }

    pub(crate) fn finish(&self, fetched: usize) {
        if let Some(pb) = &self.pb {
            pb.finish_with_message(format!("Fetched {fetched} licensed users"));
        }
    }
}

impl Drop for UserProgress {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}

/// An indefinite spinner for calls of unknown duration.
pub(crate) struct Spinner {
    label: String,
    pb: Option<ProgressBar>,
}

impl Spinner {
    /// `enabled` should be `!quiet`.
    pub(crate) fn new(enabled: bool, label: impl Into<String>) -> Self {
        let label = label.into();

        if !enabled {
            return Self { label, pb: None };
        }

        let pb = styled(ProgressBar::new_spinner(), "{spinner} {msg}");
        pb.set_message(label.clone());
        Self {
            label,
            pb: Some(pb),
        }
    }

    pub(crate) fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_with_message(format!("{} done", self.label));
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(pb) = &self.pb
            && !pb.is_finished()
        {
            pb.finish_and_clear();
        }
    }
}
