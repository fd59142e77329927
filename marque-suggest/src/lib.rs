//! AI suggestion provider backed by a `generateContent` HTTP API.
//!
//! [`GenerativeClient`] implements [`marque_import::SuggestionProvider`], so
//! the catalog session can drive it without knowing about HTTP or prompts.

pub mod client;
pub mod credentials;
pub mod prompt;
pub mod types;

pub use client::{GenerativeClient, parse_records};
pub use credentials::{ConfigSource, ConfigSources, ProviderConfig, config_sources};
