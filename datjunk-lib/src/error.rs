use thiserror::Error;

use datjunk_formats::FormatError;

/// Errors from loading inputs, writing outputs, or reading settings.
#[derive(Debug, Error)]
pub enum LibError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Format(#[from] FormatError),

    #[error("Invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),

    /// Worker task panicked or was cancelled
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl LibError {
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
