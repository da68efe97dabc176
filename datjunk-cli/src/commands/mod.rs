pub(crate) mod cascade;
pub(crate) mod diff;
pub(crate) mod merge;
pub(crate) mod split;
pub(crate) mod stats;

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datjunk_core::Catalog;
use datjunk_lib::{
    EmitReport, LoadOptions, LoadProgress, LoadReport, LogProgress, Settings, SilentProgress,
    emit_outputs, load_inputs,
};

use crate::CliError;
use crate::cli_types::{FilterArgs, OutputArgs};
use crate::progress::LoadSpinner;

/// State shared by every command: the settings file plus global flags.
pub(crate) struct RunContext {
    pub settings: Settings,
    pub threads: Option<usize>,
    pub quiet: bool,
    /// Log per-file progress as lines instead of drawing a spinner.
    pub plain_progress: bool,
}

impl RunContext {
    fn progress(&self) -> Box<dyn LoadProgress> {
        if self.quiet {
            Box::new(SilentProgress)
        } else if self.plain_progress {
            Box::new(LogProgress)
        } else {
            Box::new(LoadSpinner::new())
        }
    }

    /// Load and admit every input, logging a one-line summary.
    pub(crate) fn load(
        &self,
        inputs: &[PathBuf],
        filter: &FilterArgs,
    ) -> Result<LoadReport, CliError> {
        let options = LoadOptions {
            threads: self.settings.threads(self.threads),
            criteria: filter.criteria(),
        };
        log::debug!("Loading with {} worker(s)", options.threads);

        let rt = tokio::runtime::Runtime::new()
            .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;
        let progress = self.progress();
        let report = rt.block_on(load_inputs(inputs, &options, progress.as_ref()));

        log_load_summary(&report);
        Ok(report)
    }

    pub(crate) fn output_dir(&self, args: &OutputArgs) -> PathBuf {
        self.settings.directory(args.output.clone())
    }

    /// Write `outputs` with the format and directory `args` resolve to.
    pub(crate) fn emit(&self, outputs: Vec<Catalog>, args: &OutputArgs) -> EmitReport {
        let format = self.settings.format(args.format);
        let dir = self.output_dir(args);
        let no_rename = self.settings.no_rename(args.no_rename);
        log::info!(
            "Writing {} catalog(s) as {} to {}",
            outputs.len(),
            format.if_supports_color(Stdout, |t| t.cyan()),
            dir.display().if_supports_color(Stdout, |t| t.cyan()),
        );
        emit_outputs(outputs, format, &dir, no_rename)
    }
}

fn log_load_summary(report: &LoadReport) {
    let filtered: usize = report.loaded.iter().map(|l| l.counts.filtered).sum();
    let malformed: usize = report.loaded.iter().map(|l| l.counts.malformed).sum();

    log::info!(
        "Loaded {} input(s), {} record(s)",
        report
            .loaded
            .len()
            .if_supports_color(Stdout, |t| t.bold()),
        report.record_count().if_supports_color(Stdout, |t| t.bold()),
    );
    if filtered > 0 {
        log::info!(
            "{}",
            format!("  {filtered} record(s) rejected by filter")
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    if malformed > 0 {
        log::warn!("{malformed} malformed record(s) skipped");
    }
    for failure in &report.failures {
        log::debug!("  {}: {}", failure.path.display(), failure.error);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Report what was written and turn accumulated failures into the
/// command's result.
pub(crate) fn finish(load_failures: usize, emitted: &EmitReport) -> Result<(), CliError> {
    crate::log_blank();
    for written in &emitted.written {
        log::info!(
            "  {} {} ({} records)",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            display_name(&written.path),
            written.records,
        );
    }
    for failure in &emitted.failures {
        log::info!(
            "  {} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            display_name(&failure.path),
        );
    }
    if emitted.skipped > 0 {
        log::info!(
            "{}",
            format!("  {} empty output(s) skipped", emitted.skipped)
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    if load_failures > 0 {
        return Err(CliError::InputsFailed(load_failures));
    }
    if emitted.has_failures() {
        return Err(CliError::OutputsFailed(emitted.failures.len()));
    }
    if emitted.written.is_empty() {
        return Err(CliError::NoRecords);
    }
    Ok(())
}
