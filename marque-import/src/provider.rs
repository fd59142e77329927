//! Interface to the external suggestion provider.
//!
//! The provider proposes records the catalog is missing for a manufacturer
//! and model scope, or a starter catalog on first use. Its output is trusted
//! to be well formed (integer start year, digit-only generation); the merge
//! path only screens it for duplicates.

use std::fmt;
use std::str::FromStr;

use marque_catalog::{CandidateRecord, VehicleRecord};
use thiserror::Error;

/// Errors returned by a suggestion provider. None of them touch the dataset.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Could not parse provider response: {0}")]
    Parse(String),

    #[error("Provider configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// One axis of a suggestion scope: everything, or a single named value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Only(String),
}

impl Scope {
    /// Case-insensitive match against a record field.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(name) => name.eq_ignore_ascii_case(value.trim()),
        }
    }
}

impl FromStr for Scope {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Only(name) => f.write_str(name),
        }
    }
}

/// Manufacturer and model scope for a suggestion request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestScope {
    pub manufacturer: Scope,
    pub model: Scope,
}

impl SuggestScope {
    pub fn new(manufacturer: Scope, model: Scope) -> Self {
        Self {
            manufacturer,
            model,
        }
    }

    /// Whether `record` falls inside this scope.
    pub fn contains(&self, record: &VehicleRecord) -> bool {
        self.manufacturer.matches(&record.manufacturer) && self.model.matches(&record.model)
    }
}

impl fmt::Display for SuggestScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.manufacturer, self.model)
    }
}

/// A source of AI-generated catalog records.
///
/// Calls are not cancellable; a caller that loses interest simply drops the
/// result.
#[allow(async_fn_in_trait)]
pub trait SuggestionProvider {
    /// Produce a starter catalog.
    async fn initialize(&self) -> Result<Vec<VehicleRecord>, ProviderError>;

    /// Propose records missing from `current` within `scope`.
    async fn suggest(
        &self,
        scope: &SuggestScope,
        current: &[VehicleRecord],
    ) -> Result<Vec<CandidateRecord>, ProviderError>;
}
