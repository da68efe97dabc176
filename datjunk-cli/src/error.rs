use thiserror::Error;

use datjunk_lib::LibError;

/// Errors that end a CLI command with a non-zero exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be read
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Some inputs could not be loaded; the rest were still processed
    #[error("{0} input file(s) could not be loaded")]
    InputsFailed(usize),

    /// Some outputs could not be written; the rest were still written
    #[error("{0} output file(s) could not be written")]
    OutputsFailed(usize),

    /// Nothing survived loading, filtering and diffing
    #[error("No output catalog had any records")]
    NoRecords,
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Io(e) => Self::Io(e),
            LibError::Runtime(msg) => Self::Runtime(msg),
            other => Self::config(other.to_string()),
        }
    }
}
