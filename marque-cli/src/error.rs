use thiserror::Error;

use marque_lib::{ProviderError, SessionError, StorageError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog session operation failed
    #[error("{0}")]
    Session(#[from] SessionError),

    /// Snapshot location could not be resolved
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Suggestion provider could not be set up
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Bad command-line input
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
