//! Multi-catalog diffing.
//!
//! All inputs are concatenated into one working set, bucketed by hash with
//! merge applied (which assigns every record its [`DupeType`]), and the
//! merged records are then routed into output catalogs according to the
//! requested modes.

use std::collections::BTreeMap;
use std::fmt;

use crate::bucket::bucket_by_hash;
use crate::catalog::Catalog;
use crate::header::CatalogHeader;
use crate::record::{DupeType, Record};

/// An input catalog together with where it came from.
#[derive(Debug, Clone)]
pub struct InputCatalog {
    /// File name without extension; suffixes machine names in shared outputs.
    pub label: String,
    /// Relative directory plus file stem, `/`-separated; prefixes machine
    /// names when writing a SuperDAT.
    pub relative_path: String,
    pub catalog: Catalog,
}

impl InputCatalog {
    pub fn new(label: impl Into<String>, catalog: Catalog) -> Self {
        let label = label.into();
        Self {
            relative_path: label.clone(),
            label,
            catalog,
        }
    }
}

/// Independent non-cascading diff modes. Any combination may be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffModes {
    /// Records with no cross-source duplicate, in one shared catalog.
    pub no_dupes: bool,
    /// Records duplicated across sources, in one shared catalog.
    pub dupes: bool,
    /// Records with no cross-source duplicate, one catalog per source.
    pub individuals: bool,
}

impl DiffModes {
    pub const ALL: Self = Self {
        no_dupes: true,
        dupes: true,
        individuals: true,
    };

    pub fn is_empty(&self) -> bool {
        !(self.no_dupes || self.dupes || self.individuals)
    }
}

/// What to produce from a set of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffOptions {
    pub modes: DiffModes,
    /// Reduce each source to what earlier sources do not already provide.
    /// Takes precedence over `modes`.
    pub cascade: bool,
    /// In cascade mode, do not emit the first source's catalog.
    pub skip_first: bool,
}

/// Which partition an output catalog holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Merged,
    NoDupes,
    Dupes,
    /// Unique records of the source at this index.
    Individual(usize),
    /// Cascade remainder of the source at this index.
    Cascade(usize),
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merged => f.write_str("merged"),
            Self::NoDupes => f.write_str("no duplicates"),
            Self::Dupes => f.write_str("duplicates"),
            Self::Individual(i) => write!(f, "individual #{i}"),
            Self::Cascade(i) => write!(f, "cascade #{i}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiffOutput {
    pub kind: OutputKind,
    pub catalog: Catalog,
}

/// Run the operation `options` selects: cascade, non-cascading diff, or a
/// plain merge when neither is requested.
///
/// Outputs with no records are omitted.
pub fn run(inputs: Vec<InputCatalog>, header: &CatalogHeader, options: &DiffOptions) -> Vec<DiffOutput> {
    if options.cascade {
        diff_cascade(inputs, header, options.skip_first)
    } else if !options.modes.is_empty() {
        diff_no_cascade(inputs, header, options.modes)
    } else {
        merge_catalogs(inputs, header).into_iter().collect()
    }
}

/// Concatenate every input and collapse duplicates across them.
fn merged_records(inputs: &mut [InputCatalog]) -> Vec<Record> {
    let mut working: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for input in inputs.iter_mut() {
        let catalog = std::mem::take(&mut input.catalog);
        let (_, buckets) = catalog.into_parts();
        for (key, records) in buckets {
            working.entry(key).or_default().extend(records);
        }
    }
    bucket_by_hash(working, true).into_records().collect()
}

fn label_for(inputs: &[InputCatalog], record: &Record) -> String {
    usize::try_from(record.machine.source_system_id)
        .ok()
        .and_then(|i| inputs.get(i))
        .map(|input| input.label.clone())
        .unwrap_or_default()
}

fn suffixed(inputs: &[InputCatalog], record: &Record) -> Record {
    let mut copy = record.clone();
    copy.machine.name = format!("{} ({})", copy.machine.name, label_for(inputs, record));
    copy
}

fn push(catalog: &mut Catalog, record: Record) {
    catalog.insert(record.hash_key(), record);
}

fn collect_outputs(pairs: impl IntoIterator<Item = (OutputKind, Catalog)>) -> Vec<DiffOutput> {
    pairs
        .into_iter()
        .filter(|(kind, catalog)| {
            if catalog.is_empty() {
                log::debug!("Skipping empty {kind} output");
                false
            } else {
                true
            }
        })
        .map(|(kind, catalog)| DiffOutput { kind, catalog })
        .collect()
}

/// Route merged records into the shared and per-source outputs.
///
/// A record may land in several outputs at once.
pub fn diff_no_cascade(
    mut inputs: Vec<InputCatalog>,
    header: &CatalogHeader,
    modes: DiffModes,
) -> Vec<DiffOutput> {
    let merged = merged_records(&mut inputs);

    let mut no_dupes = Catalog::new(header.with_suffix(" (No Duplicates)"));
    let mut dupes = Catalog::new(header.with_suffix(" (Duplicates)"));
    let mut individuals: Vec<Catalog> = inputs
        .iter()
        .map(|input| Catalog::new(header.with_suffix(&format!(" ({})", input.label))))
        .collect();

    for record in merged {
        let external = record.dupe_type >= DupeType::ExternalHash;
        if modes.no_dupes && !external {
            push(&mut no_dupes, suffixed(&inputs, &record));
        }
        if modes.dupes && external {
            push(&mut dupes, suffixed(&inputs, &record));
        }
        if modes.individuals && !external {
            let slot = usize::try_from(record.machine.source_system_id)
                .ok()
                .and_then(|i| individuals.get_mut(i));
            match slot {
                Some(catalog) => push(catalog, record),
                None => log::warn!(
                    "Record '{}' has unknown source {}",
                    record.item.name(),
                    record.machine.source_system_id
                ),
            }
        }
    }

    let mut pairs = Vec::new();
    if modes.no_dupes {
        pairs.push((OutputKind::NoDupes, no_dupes));
    }
    if modes.dupes {
        pairs.push((OutputKind::Dupes, dupes));
    }
    if modes.individuals {
        pairs.extend(
            individuals
                .into_iter()
                .enumerate()
                .map(|(i, catalog)| (OutputKind::Individual(i), catalog)),
        );
    }
    collect_outputs(pairs)
}

/// Give each source the records no earlier source already provides.
///
/// Merge rewrites a duplicate's source to the lowest index that carries
/// it, so routing every merged record by its source is all that is needed.
pub fn diff_cascade(
    mut inputs: Vec<InputCatalog>,
    header: &CatalogHeader,
    skip_first: bool,
) -> Vec<DiffOutput> {
    let merged = merged_records(&mut inputs);

    let mut outputs: Vec<Catalog> = inputs
        .iter()
        .map(|input| Catalog::new(header.with_suffix(&format!(" ({})", input.label))))
        .collect();

    for record in merged {
        let slot = usize::try_from(record.machine.source_system_id)
            .ok()
            .and_then(|i| outputs.get_mut(i));
        if let Some(catalog) = slot {
            push(catalog, record);
        }
    }

    let start = usize::from(skip_first);
    collect_outputs(
        outputs
            .into_iter()
            .enumerate()
            .skip(start)
            .map(|(i, catalog)| (OutputKind::Cascade(i), catalog)),
    )
}

/// Merge every input into one deduplicated catalog.
///
/// When `header.is_superdat` is set, machine names are prefixed with the
/// originating file's relative path.
pub fn merge_catalogs(mut inputs: Vec<InputCatalog>, header: &CatalogHeader) -> Option<DiffOutput> {
    let merged = merged_records(&mut inputs);
    let mut catalog = Catalog::new(header.clone());

    for mut record in merged {
        if header.is_superdat {
            let prefix = usize::try_from(record.machine.source_system_id)
                .ok()
                .and_then(|i| inputs.get(i))
                .map(|input| input.relative_path.as_str())
                .unwrap_or_default();
            if !prefix.is_empty() {
                record.machine.name = format!("{prefix}/{}", record.machine.name);
            }
        }
        push(&mut catalog, record);
    }

    collect_outputs([(OutputKind::Merged, catalog)]).pop()
}
