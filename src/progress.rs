//! Progress bar display for remote entry fetches

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a batch of remote entry fetches
pub struct FetchProgress {
    pb: ProgressBar,
}

impl FetchProgress {
    /// Create a new progress display with the number of remotes to fetch
    pub fn new(total_remotes: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(total_remotes);
        pb.set_style(style);

        Self { pb }
    }

    /// Record a finished fetch
    pub fn fetched(&self, remote_name: &str) {
        // Truncate long names for display
        let display_name = if remote_name.len() > 50 {
            let start = remote_name
                .char_indices()
                .map(|(i, _)| i)
                .find(|&i| remote_name.len() - i <= 47)
                .unwrap_or(0);
            format!("...{}", &remote_name[start..])
        } else {
            remote_name.to_string()
        };
        self.pb.set_message(display_name);
        self.pb.inc(1);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
