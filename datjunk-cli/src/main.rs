//! datjunk CLI
//!
//! Command-line interface for merging, diffing and splitting ROM DAT
//! catalogs.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;

use clap::Parser;

use datjunk_lib::Settings;

use cli_types::{Cli, Commands};
use commands::RunContext;
use commands::cascade::run_cascade;
use commands::diff::{modes_from_flags, run_diff};
use commands::merge::run_merge;
use commands::split::run_split;
use commands::stats::run_stats;

pub(crate) use error::CliError;
pub(crate) use logging::log_blank;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load_or_default(cli.config.as_deref())?;

    let ctx = RunContext {
        settings,
        threads: cli.threads,
        quiet: cli.quiet,
        plain_progress: cli.verbose || cli.logfile.is_some(),
    };

    match cli.command {
        Commands::Merge {
            inputs,
            superdat,
            dedupe,
            output,
            header,
            filter,
        } => run_merge(&ctx, &inputs, superdat, dedupe, &output, &header, &filter),
        Commands::Diff {
            inputs,
            no_dupes,
            dupes,
            individuals,
            output,
            header,
            filter,
        } => {
            let modes = modes_from_flags(no_dupes, dupes, individuals);
            run_diff(&ctx, &inputs, modes, &output, &header, &filter)
        }
        Commands::Cascade {
            inputs,
            skip_first,
            output,
            header,
            filter,
        } => run_cascade(&ctx, &inputs, skip_first, &output, &header, &filter),
        Commands::Split {
            inputs,
            output,
            filter,
        } => run_split(&ctx, &inputs, &output, &filter),
        Commands::Stats { inputs, filter } => run_stats(&ctx, &inputs, &filter),
    }
}
