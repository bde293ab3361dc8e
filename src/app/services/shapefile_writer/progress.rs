//! Progress reporting for feature writing
//!
//! Wraps an optional `indicatif` bar sized to the grid's cell count. When
//! progress is disabled every call is a no-op.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Features between progress bar redraws
const UPDATE_INTERVAL: u64 = 1024;

/// Progress reporter for Shapefile writing
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    total_features: u64,
    pending: u64,
}

impl ProgressReporter {
    /// Create a reporter that shows nothing
    pub fn disabled() -> Self {
        Self {
            progress_bar: None,
            total_features: 0,
            pending: 0,
        }
    }

    /// Create a progress bar for the given number of features
    pub fn new(total_features: u64) -> Self {
        let pb = ProgressBar::new(total_features);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} points ({percent}%) | {msg}")
            .map(|style| style.progress_chars("█▉▊▋▌▍▎▏  "))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message("Writing Shapefile");

        debug!("Progress bar initialized for {} features", total_features);
        Self {
            progress_bar: Some(pb),
            total_features,
            pending: 0,
        }
    }

    /// Record one written feature
    pub fn increment(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            self.pending += 1;
            if self.pending >= UPDATE_INTERVAL {
                pb.inc(self.pending);
                self.pending = 0;
            }
        }
    }

    /// Finish with a completion message
    pub fn finish(&mut self, features_written: u64) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(self.pending);
            self.pending = 0;
            pb.finish_with_message(format!("Completed: {} points", features_written));
        }
    }

    /// Finish with an error message
    pub fn finish_with_error(&mut self, error_message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.abandon_with_message(format!("Failed: {}", error_message));
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.progress_bar.is_some()
    }

    pub fn total_features(&self) -> u64 {
        self.total_features
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}
