use std::fmt;

use marque_catalog::CodecError;
use marque_import::ProviderError;
use thiserror::Error;

use crate::storage::StorageError;

/// A long-running operation that holds the session's busy gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Suggest,
    Initialize,
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suggest => f.write_str("suggestion request"),
            Self::Initialize => f.write_str("catalog initialization"),
            Self::Import => f.write_str("CSV import"),
        }
    }
}

/// Errors from catalog session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A mutating call arrived while another operation was pending.
    #[error("Busy: a {0} is already in progress")]
    Busy(Operation),

    /// A `finish_*` call that doesn't match the pending operation.
    #[error("No {0} is in progress")]
    NotStarted(Operation),

    /// Import text was rejected. The dataset is unchanged.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The suggestion provider failed. The dataset is unchanged.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("There are no pending suggestions to confirm")]
    NoPendingSuggestions,
}
