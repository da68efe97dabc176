use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datjunk_core::DiffOptions;
use datjunk_core::diff;

use crate::CliError;
use crate::cli_types::{FilterArgs, HeaderArgs, OutputArgs};

use super::{RunContext, finish};

/// Run the merge command.
pub(crate) fn run_merge(
    ctx: &RunContext,
    inputs: &[PathBuf],
    superdat: bool,
    dedupe: bool,
    output: &OutputArgs,
    header: &HeaderArgs,
    filter: &FilterArgs,
) -> Result<(), CliError> {
    log::info!("{}", "Merging DATs".if_supports_color(Stdout, |t| t.bold()));
    if superdat {
        log::info!(
            "{}",
            "SuperDAT: machine names keep their source paths"
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let (catalogs, failures) = ctx.load(inputs, filter)?.into_inputs();

    let mut header = header.to_header("Merged");
    header.is_superdat = superdat;
    header.dedupe_on_write = dedupe;

    let outputs = diff::run(catalogs, &header, &DiffOptions::default());
    let emitted = ctx.emit(outputs.into_iter().map(|o| o.catalog).collect(), output);
    finish(failures.len(), &emitted)
}
