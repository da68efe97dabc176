//! Reconciliation core for DAT catalogs.
//!
//! Holds the record model, hash sanitization, admission filtering, the
//! merge/dedup engine, bucketing and the multi-catalog diff engine. Nothing
//! here performs I/O; codecs and file handling live in other crates.

pub mod bucket;
pub mod catalog;
pub mod diff;
pub mod error;
pub mod filter;
pub mod header;
pub mod item;
pub mod machine;
pub mod merge;
pub mod record;
pub mod sanitize;
pub mod split;

pub use bucket::{Bucketed, bucket_by_hash, bucket_by_machine, machine_key};
pub use catalog::{Admission, Catalog, CatalogStats};
pub use diff::{DiffModes, DiffOptions, DiffOutput, InputCatalog, OutputKind};
pub use error::CoreError;
pub use filter::FilterCriteria;
pub use header::{CatalogHeader, ForceMerging, ForceNodump, ForcePacking};
pub use item::{Archive, BiosSet, Disk, Item, ItemKind, Release, Rom, Sample};
pub use machine::Machine;
pub use merge::{is_partial_match, merge};
pub use record::{DupeType, Record};
pub use sanitize::{HashKind, normalize_hash, sanitize};
pub use split::{HashSplit, split_by_hash};
