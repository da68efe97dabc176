//! Readers and writers for DAT catalog formats.
//!
//! Input dialects are detected from content: Logiqx and SabreDAT XML,
//! ClrMamePro and RomCenter. Output adds delimited tables and checksum
//! listings.

mod clrmamepro;
pub mod error;
mod fields;
pub mod format;
mod listing;
mod logiqx;
pub mod natural;
pub mod read;
mod romcenter;
mod sabredat;
mod xml;

pub use error::FormatError;
pub use format::{OutputFormat, write_catalog};
pub use natural::natural_cmp;
pub use read::{InputFormat, ParsedDat, SourceTag, parse_dat, parse_dat_file};
