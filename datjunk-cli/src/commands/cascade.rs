use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datjunk_core::DiffOptions;
use datjunk_core::diff;

use crate::CliError;
use crate::cli_types::{FilterArgs, HeaderArgs, OutputArgs};

use super::{RunContext, finish};

/// Run the cascade command.
pub(crate) fn run_cascade(
    ctx: &RunContext,
    inputs: &[PathBuf],
    skip_first: bool,
    output: &OutputArgs,
    header: &HeaderArgs,
    filter: &FilterArgs,
) -> Result<(), CliError> {
    log::info!("{}", "Cascading DATs".if_supports_color(Stdout, |t| t.bold()));
    if skip_first {
        log::info!(
            "{}",
            "The first input will not be written".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let (catalogs, failures) = ctx.load(inputs, filter)?.into_inputs();

    let header = header.to_header("Cascade");
    let options = DiffOptions {
        cascade: true,
        skip_first,
        ..DiffOptions::default()
    };
    let outputs = diff::run(catalogs, &header, &options);
    for out in &outputs {
        log::debug!("{}: {} records", out.kind, out.catalog.len());
    }

    let emitted = ctx.emit(outputs.into_iter().map(|o| o.catalog).collect(), output);
    finish(failures.len(), &emitted)
}
