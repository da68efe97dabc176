//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use datjunk_core::{CatalogHeader, FilterCriteria, ItemKind};
use datjunk_formats::OutputFormat;

#[derive(Parser)]
#[command(name = "datjunk")]
#[command(about = "Merge, diff and split ROM DAT catalogs", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Settings file (defaults to ~/.config/datjunk/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of files to parse in parallel
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and how output catalogs are written.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct OutputArgs {
    /// Output directory (defaults to the settings file, then the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: logiqx, clrmamepro, romcenter, sabredat, csv, tsv, sfv, md5, sha1
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Group machines by name only, without keeping same-named machines from
    /// different sources apart
    #[arg(long)]
    pub no_rename: bool,
}

/// Header fields for the catalogs a command produces.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct HeaderArgs {
    /// Catalog name (also used for output file names)
    #[arg(long)]
    pub name: Option<String>,

    /// Catalog description (defaults to the name)
    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    /// Catalog version (defaults to today's date)
    #[arg(long)]
    pub version: Option<String>,

    #[arg(long)]
    pub author: Option<String>,
}

impl HeaderArgs {
    pub(crate) fn to_header(&self, default_name: &str) -> CatalogHeader {
        let today = chrono::Local::now();
        let name = self.name.clone().unwrap_or_else(|| default_name.to_string());
        CatalogHeader {
            description: self.description.clone().unwrap_or_else(|| name.clone()),
            name,
            category: self.category.clone().unwrap_or_default(),
            version: self
                .version
                .clone()
                .unwrap_or_else(|| today.format("%Y%m%d").to_string()),
            date: today.format("%Y-%m-%d").to_string(),
            author: self.author.clone().unwrap_or_else(|| "datjunk".to_string()),
            ..CatalogHeader::default()
        }
    }
}

/// Which records are admitted from the inputs.
///
/// Name patterns accept a leading and/or trailing `*` wildcard.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct FilterArgs {
    /// Keep only machines whose name matches
    #[arg(long)]
    pub game_name: Option<String>,

    /// Keep only items whose name matches
    #[arg(long)]
    pub item_name: Option<String>,

    /// Keep only items of this kind: rom, disk, release, biosset, sample, archive
    #[arg(long)]
    pub item_type: Option<ItemKind>,

    /// Keep only ROMs of exactly this size (overrides --size-gte/--size-lte)
    #[arg(long)]
    pub size: Option<i64>,

    /// Keep only ROMs at least this large
    #[arg(long)]
    pub size_gte: Option<i64>,

    /// Keep only ROMs at most this large
    #[arg(long)]
    pub size_lte: Option<i64>,

    /// Keep only ROMs with this CRC32
    #[arg(long)]
    pub crc: Option<String>,

    #[arg(long)]
    pub md5: Option<String>,

    #[arg(long)]
    pub sha1: Option<String>,

    /// true keeps only nodump items, false drops them
    #[arg(long)]
    pub nodump: Option<bool>,
}

impl FilterArgs {
    pub(crate) fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            game_name: self.game_name.clone(),
            item_name: self.item_name.clone(),
            item_type: self.item_type,
            size_eq: self.size,
            size_gte: self.size_gte,
            size_lte: self.size_lte,
            crc: self.crc.clone(),
            md5: self.md5.clone(),
            sha1: self.sha1.clone(),
            nodump: self.nodump,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Merge every input into one deduplicated catalog
    Merge {
        /// DAT files or directories of DAT files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Prefix machine names with each input's relative path
        #[arg(long)]
        superdat: bool,

        /// Collapse duplicates within each machine when writing
        #[arg(long)]
        dedupe: bool,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        header: HeaderArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Compare inputs against each other (all modes when none is given)
    Diff {
        /// DAT files or directories of DAT files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write records found in only one input
        #[arg(long)]
        no_dupes: bool,

        /// Write records found in more than one input
        #[arg(long)]
        dupes: bool,

        /// Write each input's unique records to its own catalog
        #[arg(long)]
        individuals: bool,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        header: HeaderArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Reduce each input to what earlier inputs do not already provide
    Cascade {
        /// DAT files or directories of DAT files, highest priority first
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Do not write a catalog for the first input
        #[arg(long)]
        skip_first: bool,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        header: HeaderArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Split each input by the strongest hash its records carry
    Split {
        /// DAT files or directories of DAT files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show record and hash counts for each input
    Stats {
        /// DAT files or directories of DAT files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },
}
