use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinners around the read/merge/export steps. Every bar is hidden in quiet
/// mode so the pipeline code can drive them unconditionally.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn finish_spinner(&self, pb: &ProgressBar, message: &str) {
        if self.enabled {
            pb.finish_with_message(message.to_string());
        } else {
            pb.finish_and_clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
