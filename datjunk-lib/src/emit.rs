//! Writing output catalogs to disk.

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use datjunk_core::{Catalog, CatalogHeader, Record, bucket_by_machine};
use datjunk_formats::{OutputFormat, write_catalog};

use crate::error::LibError;

/// Characters that cannot appear in a file name on common platforms.
const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// File name used when a header name sanitizes to nothing.
const FALLBACK_NAME: &str = "datjunk";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub path: PathBuf,
    pub records: usize,
}

#[derive(Debug)]
pub struct EmitFailure {
    pub path: PathBuf,
    pub error: LibError,
}

#[derive(Debug, Default)]
pub struct EmitReport {
    pub written: Vec<Written>,
    /// Outputs with no records; nothing was written for them.
    pub skipped: usize,
    pub failures: Vec<EmitFailure>,
}

impl EmitReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.written.iter().map(|w| w.records).sum()
    }
}

/// Turn a header name into a usable file stem.
pub fn file_stem_for(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if RESERVED.contains(&c) || c.is_control() { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_end_matches('.').to_string();
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned
    }
}

/// Hands out output paths, numbering repeats so no two outputs of one run
/// share a file.
#[derive(Debug)]
struct PathAllocator<'a> {
    dir: &'a Path,
    extension: &'static str,
    taken: HashSet<String>,
}

impl<'a> PathAllocator<'a> {
    fn new(dir: &'a Path, extension: &'static str) -> Self {
        Self {
            dir,
            extension,
            taken: HashSet::new(),
        }
    }

    fn claim(&mut self, name: &str) -> PathBuf {
        let stem = file_stem_for(name);
        let mut candidate = stem.clone();
        let mut n = 2;
        while !self.taken.insert(candidate.to_lowercase()) {
            candidate = format!("{stem} ({n})");
            n += 1;
        }
        self.dir.join(format!("{candidate}.{}", self.extension))
    }
}

/// Bucket, serialize and write each output catalog into `dir`.
///
/// Empty outputs are skipped. A failed write is recorded and the remaining
/// outputs are still attempted.
pub fn emit_outputs(
    outputs: Vec<Catalog>,
    format: OutputFormat,
    dir: &Path,
    no_rename: bool,
) -> EmitReport {
    let mut report = EmitReport::default();

    if let Err(e) = std::fs::create_dir_all(dir) {
        log::error!("Cannot create output directory {}: {}", dir.display(), e);
        report.failures.push(EmitFailure {
            path: dir.to_path_buf(),
            error: e.into(),
        });
        return report;
    }

    let mut paths = PathAllocator::new(dir, format.extension());

    for catalog in outputs {
        if catalog.is_empty() {
            log::debug!("Skipping empty output '{}'", catalog.header.name);
            report.skipped += 1;
            continue;
        }

        let (header, items) = catalog.into_parts();
        let bucketed = bucket_by_machine(items, header.dedupe_on_write, no_rename);
        let path = paths.claim(&header.name);

        match write_file(&path, format, &header, &bucketed.buckets) {
            Ok(()) => {
                log::info!("  Wrote {} ({} records)", path.display(), bucketed.item_count);
                report.written.push(Written {
                    path,
                    records: bucketed.item_count,
                });
            }
            Err(error) => {
                log::error!("  Failed to write {}: {}", path.display(), error);
                report.failures.push(EmitFailure { path, error });
            }
        }
    }

    report
}

fn write_file(
    path: &Path,
    format: OutputFormat,
    header: &CatalogHeader,
    buckets: &BTreeMap<String, Vec<Record>>,
) -> Result<(), LibError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_catalog(format, header, buckets, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/emit_tests.rs"]
mod tests;
