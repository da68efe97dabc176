use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datjunk_core::diff;
use datjunk_core::{DiffModes, DiffOptions};

use crate::CliError;
use crate::cli_types::{FilterArgs, HeaderArgs, OutputArgs};

use super::{RunContext, finish};

/// Modes selected by the flags; no flag at all means every mode.
pub(crate) fn modes_from_flags(no_dupes: bool, dupes: bool, individuals: bool) -> DiffModes {
    let modes = DiffModes {
        no_dupes,
        dupes,
        individuals,
    };
    if modes.is_empty() { DiffModes::ALL } else { modes }
}

/// Run the diff command.
pub(crate) fn run_diff(
    ctx: &RunContext,
    inputs: &[PathBuf],
    modes: DiffModes,
    output: &OutputArgs,
    header: &HeaderArgs,
    filter: &FilterArgs,
) -> Result<(), CliError> {
    log::info!("{}", "Diffing DATs".if_supports_color(Stdout, |t| t.bold()));

    let (catalogs, failures) = ctx.load(inputs, filter)?.into_inputs();
    if catalogs.len() < 2 {
        log::warn!("Diffing fewer than two inputs; every record is unique");
    }

    let header = header.to_header("Diff");
    let options = DiffOptions {
        modes,
        ..DiffOptions::default()
    };
    let outputs = diff::run(catalogs, &header, &options);
    for out in &outputs {
        log::info!(
            "  {:<16} {:>8} records",
            out.kind.to_string(),
            out.catalog.len()
        );
    }

    let emitted = ctx.emit(outputs.into_iter().map(|o| o.catalog).collect(), output);
    finish(failures.len(), &emitted)
}
