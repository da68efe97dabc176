use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use datjunk_core::split_by_hash;

use crate::CliError;
use crate::cli_types::{FilterArgs, OutputArgs};

use super::{RunContext, finish};

/// Run the split command: each input is partitioned on its own.
pub(crate) fn run_split(
    ctx: &RunContext,
    inputs: &[PathBuf],
    output: &OutputArgs,
    filter: &FilterArgs,
) -> Result<(), CliError> {
    log::info!("{}", "Splitting DATs by hash".if_supports_color(Stdout, |t| t.bold()));

    let (catalogs, failures) = ctx.load(inputs, filter)?.into_inputs();

    let mut outputs = Vec::new();
    for input in catalogs {
        let parts = split_by_hash(input.catalog);
        let summary: Vec<String> = parts
            .iter()
            .map(|(split, catalog)| format!("{split} {}", catalog.len()))
            .collect();
        log::info!(
            "  {}: {}",
            input.label.if_supports_color(Stdout, |t| t.cyan()),
            summary.join(", ")
        );
        outputs.extend(parts.into_iter().map(|(_, catalog)| catalog));
    }

    let emitted = ctx.emit(outputs, output);
    finish(failures.len(), &emitted)
}
