//! Progress bar display for wheel downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for remote fetches
///
/// Cloning shares the underlying bar, so worker threads can report into it.
#[derive(Clone)]
pub struct FetchProgress {
    bar: ProgressBar,
}

impl FetchProgress {
    /// Create a visible bar with the total number of downloads
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        // Template is static; fall back to the default style if it ever fails to parse
        if let Ok(style) = ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {pos}/{len} {msg}") {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }

    /// A progress display that draws nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Show which package is being downloaded
    pub fn started(&self, name: &str) {
        self.bar.set_message(format!("fetching {}", name));
    }

    /// Count one finished download
    pub fn finished(&self) {
        self.bar.inc(1);
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
