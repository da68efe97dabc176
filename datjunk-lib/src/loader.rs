//! Parallel loading of input DAT files into private catalogs.
//!
//! Each file is parsed and admitted on its own worker, producing a catalog
//! nobody else touches. Results are re-ordered by submission index before
//! they are handed back, so the caller sees inputs in command-line order
//! regardless of which file finished first.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use datjunk_core::{Admission, Catalog, FilterCriteria, InputCatalog};
use datjunk_formats::{SourceTag, parse_dat_file};

use crate::error::LibError;
use crate::progress::LoadProgress;
use crate::worker_pool::WorkerPool;

/// Extensions picked up when expanding a directory.
const DAT_EXTENSIONS: &[&str] = &["dat", "xml", "txt"];

/// One file scheduled for loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// File name without extension.
    pub label: String,
    /// Path below the directory it was found in, without extension and
    /// `/`-separated. Equal to `label` for files named directly.
    pub relative_path: String,
}

impl InputFile {
    /// A file named directly on the command line.
    pub fn single(path: PathBuf) -> Self {
        let label = file_stem(&path);
        Self {
            relative_path: label.clone(),
            label,
            path,
        }
    }

    /// A file found while walking `root`.
    pub fn under(root: &Path, path: PathBuf) -> Self {
        let label = file_stem(&path);
        let relative_path = match path.strip_prefix(root) {
            Ok(relative) => relative
                .with_extension("")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => label.clone(),
        };
        Self {
            path,
            label,
            relative_path,
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_dat_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DAT_EXTENSIONS.iter().any(|d| ext.eq_ignore_ascii_case(d)))
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Worker count; zero is treated as one.
    pub threads: usize,
    pub criteria: FilterCriteria,
}

/// Per-file admission tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmissionCounts {
    pub accepted: usize,
    pub unnamed: usize,
    pub filtered: usize,
    /// Records the codec skipped as malformed.
    pub malformed: usize,
}

#[derive(Debug)]
pub struct LoadedInput {
    pub path: PathBuf,
    pub input: InputCatalog,
    pub counts: AdmissionCounts,
}

#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: LibError,
}

/// Everything `load_inputs` produced: loaded inputs in submission order,
/// plus the files that could not be loaded.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<LoadedInput>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Total records admitted across every loaded input.
    pub fn record_count(&self) -> usize {
        self.loaded.iter().map(|l| l.input.catalog.len()).sum()
    }

    /// Hand the catalogs over, keeping the failures for reporting.
    pub fn into_inputs(self) -> (Vec<InputCatalog>, Vec<LoadFailure>) {
        let inputs = self.loaded.into_iter().map(|l| l.input).collect();
        (inputs, self.failures)
    }
}

/// Expand `paths` into the files to load. Directories are walked
/// recursively and their DAT files returned in sorted path order; a path
/// that does not exist becomes a failure.
pub fn expand_inputs(paths: &[PathBuf]) -> (Vec<InputFile>, Vec<LoadFailure>) {
    let mut files = Vec::new();
    let mut failures = Vec::new();

    for path in paths {
        if path.is_dir() {
            match collect_dat_files(path) {
                Ok(found) => {
                    if found.is_empty() {
                        log::warn!("No DAT files found in {}", path.display());
                    }
                    files.extend(found.into_iter().map(|f| InputFile::under(path, f)));
                }
                Err(e) => failures.push(LoadFailure {
                    path: path.clone(),
                    error: e.into(),
                }),
            }
        } else if path.is_file() {
            files.push(InputFile::single(path.clone()));
        } else {
            failures.push(LoadFailure {
                path: path.clone(),
                error: io::Error::new(io::ErrorKind::NotFound, "no such file or directory").into(),
            });
        }
    }

    (files, failures)
}

fn collect_dat_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries: Vec<std::fs::DirEntry> = std::fs::read_dir(dir)?.flatten().collect();
    entries.sort_by_key(|e| e.path());

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            files.extend(collect_dat_files(&path)?);
        } else if is_dat_file(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Parse one file and admit its records into a fresh catalog.
///
/// Blocking; the caller runs it off the async workers.
pub fn load_file(
    file: &InputFile,
    index: usize,
    criteria: &FilterCriteria,
) -> Result<LoadedInput, LibError> {
    let tag = SourceTag::new(source_index(index), file.label.clone());
    let parsed = parse_dat_file(&file.path, &tag)?;

    let mut header = parsed.header;
    if header.name.is_empty() {
        header.name = file.label.clone();
    }
    if header.description.is_empty() {
        header.description = header.name.clone();
    }

    let mut catalog = Catalog::new(header);
    let mut counts = AdmissionCounts {
        malformed: parsed.skipped,
        ..AdmissionCounts::default()
    };
    for record in parsed.records {
        match catalog.admit(record, criteria) {
            Admission::Accepted => counts.accepted += 1,
            Admission::Unnamed => counts.unnamed += 1,
            Admission::Filtered => counts.filtered += 1,
        }
    }

    if counts.unnamed > 0 {
        log::warn!(
            "{}: {} item(s) without a name were dropped",
            file.path.display(),
            counts.unnamed
        );
    }
    if counts.filtered > 0 {
        log::debug!(
            "{}: {} item(s) rejected by filter",
            file.path.display(),
            counts.filtered
        );
    }

    Ok(LoadedInput {
        path: file.path.clone(),
        input: InputCatalog {
            label: file.label.clone(),
            relative_path: file.relative_path.clone(),
            catalog,
        },
        counts,
    })
}

fn source_index(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

/// Load every input in `paths` on a pool of `options.threads` workers.
///
/// Each loaded catalog's records carry its position among the successfully
/// loaded inputs as their source ids, which is the priority the diff
/// engine resolves ties with.
pub async fn load_inputs(
    paths: &[PathBuf],
    options: &LoadOptions,
    progress: &dyn LoadProgress,
) -> LoadReport {
    let (files, mut failures) = expand_inputs(paths);
    for failure in &failures {
        progress.on_failure(&failure.path, &failure.error.to_string());
    }

    let total = files.len();
    progress.on_start(total);

    let criteria = Arc::new(options.criteria.clone());
    let pool = WorkerPool::start(options.threads, files, move |index, file: InputFile| {
        let criteria = criteria.clone();
        async move {
            let path = file.path.clone();
            let result = tokio::task::spawn_blocking(move || load_file(&file, index, &criteria))
                .await
                .map_err(|e| LibError::runtime(format!("load task failed: {e}")))
                .and_then(|result| result);
            (path, result)
        }
    });

    let mut done = 0;
    let results = pool
        .collect_ordered(|_, (path, result)| {
            done += 1;
            match result {
                Ok(loaded) => progress.on_file(done, total, path, loaded.input.catalog.len()),
                Err(e) => progress.on_failure(path, &e.to_string()),
            }
        })
        .await;

    let mut loaded = Vec::with_capacity(results.len());
    for (index, (path, result)) in results.into_iter().enumerate() {
        match result {
            Ok(mut input) => {
                let position = loaded.len();
                if position != index {
                    log::debug!(
                        "Renumbering {} from source {} to {}",
                        path.display(),
                        index,
                        position
                    );
                    input.input.catalog.set_source_index(source_index(position));
                }
                loaded.push(input);
            }
            Err(error) => failures.push(LoadFailure { path, error }),
        }
    }

    progress.on_complete(&format!("Loaded {} of {} file(s)", loaded.len(), total));

    LoadReport { loaded, failures }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
