//! Load progress reporting.

use std::path::Path;

/// Trait for receiving progress while input catalogs load.
pub trait LoadProgress {
    /// Called once the input list is known.
    fn on_start(&self, total: usize);

    /// Called as each file finishes, in completion order.
    fn on_file(&self, current: usize, total: usize, path: &Path, records: usize);

    /// Called when a file could not be loaded.
    fn on_failure(&self, path: &Path, error: &str);

    /// Called when every file has been processed.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl LoadProgress for SilentProgress {
    fn on_start(&self, _total: usize) {}
    fn on_file(&self, _current: usize, _total: usize, _path: &Path, _records: usize) {}
    fn on_failure(&self, _path: &Path, _error: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl LoadProgress for LogProgress {
    fn on_start(&self, total: usize) {
        log::info!("Loading {} input file(s)", total);
    }

    fn on_file(&self, current: usize, total: usize, path: &Path, records: usize) {
        log::info!("  [{}/{}] {} ({} records)", current, total, path.display(), records);
    }

    fn on_failure(&self, path: &Path, error: &str) {
        log::error!("  Failed to load {}: {}", path.display(), error);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
