//! User settings (default output format, directory, worker count).
//!
//! The settings file is `~/.config/datjunk/settings.toml` unless the
//! caller names another. Every value is optional; command-line flags take
//! precedence over the file, and the file over built-in defaults.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use datjunk_formats::OutputFormat;

use crate::error::LibError;

/// Canonical path to the settings file: `~/.config/datjunk/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("datjunk").join("settings.toml")
}

/// Number of workers used when neither flag nor settings name one.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub load: LoadSettings,
}

/// `[output]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: Option<OutputFormat>,
    pub directory: Option<PathBuf>,
    pub no_rename: Option<bool>,
}

/// `[load]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadSettings {
    pub threads: Option<usize>,
}

impl Settings {
    /// Read settings from `path`. A missing file yields defaults; a file
    /// that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self, LibError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                log::debug!("Loading settings from {}", path.display());
                Self::parse(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Read settings from `path`, or from [`settings_path`] when `None`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, LibError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::load(&settings_path()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, LibError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn threads(&self, cli: Option<usize>) -> usize {
        cli.or(self.load.threads)
            .filter(|&n| n > 0)
            .unwrap_or_else(default_threads)
    }

    pub fn format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.output.format).unwrap_or_default()
    }

    pub fn directory(&self, cli: Option<PathBuf>) -> PathBuf {
        cli.or_else(|| self.output.directory.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// A set flag always wins; an unset flag defers to the file.
    pub fn no_rename(&self, cli: bool) -> bool {
        cli || self.output.no_rename.unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
