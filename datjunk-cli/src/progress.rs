//! Spinner shown while input files load.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use datjunk_lib::LoadProgress;

pub(crate) struct LoadSpinner {
    pb: ProgressBar,
}

impl LoadSpinner {
    pub(crate) fn new() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        Self { pb }
    }
}

impl LoadProgress for LoadSpinner {
    fn on_start(&self, total: usize) {
        self.pb.set_message(format!("Loading {total} file(s)"));
        self.pb.enable_steady_tick(Duration::from_millis(100));
    }

    fn on_file(&self, current: usize, total: usize, path: &Path, records: usize) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.pb
            .set_message(format!("[{current}/{total}] {name} ({records} records)"));
    }

    fn on_failure(&self, path: &Path, error: &str) {
        // Keep the error line from being overdrawn by the spinner.
        self.pb
            .suspend(|| log::error!("Failed to load {}: {}", path.display(), error));
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::debug!("{}", message);
    }
}
