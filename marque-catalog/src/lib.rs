//! Vehicle catalog data model, canonical ordering, and delimited-text I/O.
//!
//! This crate defines the record shape and everything that can be decided
//! about a record without looking at the rest of the application: identity
//! keys, generation normalization, the dataset sort order, the CSV codec,
//! and the built-in seed dataset. Consumers (`marque-import`, `marque-lib`)
//! build merge, filtering, and persistence on top of these types.

pub mod codec;
pub mod normalize;
pub mod seed;
pub mod sort;
pub mod types;

pub use codec::{CodecError, FIELD_NAMES, from_text, to_text};
pub use normalize::normalize_generation;
pub use seed::seed_dataset;
pub use sort::{collate, sort_dataset};
pub use types::*;
