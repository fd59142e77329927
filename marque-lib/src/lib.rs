//! Catalog application core shared by every frontend.
//!
//! [`CatalogSession`] owns the dataset and its derived views (filter, facets,
//! pagination, selection, pending suggestions). Storage and settings live
//! here too so the CLI and any future frontend agree on file locations.

pub mod error;
pub mod filter;
pub mod pagination;
pub mod session;
pub mod settings;
pub mod storage;

pub use error::{Operation, SessionError};
pub use filter::{Facets, FilterSpec, YearRange, filter_view, manufacturer_counts, models_for, year_bounds};
pub use pagination::{Page, clamp_page, page, total_pages};
pub use session::{
    CatalogSession, ExportFile, MergeSummary, SuggestOutcome, SuggestRequest, export_filename,
};
pub use settings::{Settings, load_settings, settings_path};
pub use storage::{
    FileStore, MemoryStore, SnapshotStore, StorageError, default_data_file, load_dataset,
};

// Re-exported so frontends can depend on this crate alone.
pub use marque_catalog::{RecordKey, VehicleRecord};
pub use marque_import::{ImportStats, ProviderError, Scope, SuggestScope, SuggestionProvider};
