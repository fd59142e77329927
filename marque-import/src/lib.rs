//! Bring candidate records into the catalog.
//!
//! This crate owns the merge path shared by every source of new records:
//! duplicate screening against the current dataset, merging accepted
//! candidates back into canonical order, CSV import on top of the codec, and
//! the interface to the external suggestion provider.

pub mod csv_import;
pub mod merge;
pub mod progress;
pub mod provider;

pub use csv_import::{ImportOutcome, ImportStats, import_text};
pub use merge::{MergeOutcome, dedupe_by_key, is_duplicate, merge_candidates, screen_candidates};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use provider::{ProviderError, Scope, SuggestScope, SuggestionProvider};
