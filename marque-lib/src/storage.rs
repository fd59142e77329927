//! Persisted dataset snapshots.
//!
//! The dataset is stored whole as a JSON array of records after every
//! successful mutation. [`FileStore`] keeps it on disk, [`MemoryStore`] keeps
//! it in memory for tests and throwaway sessions.

use std::io;
use std::path::{Path, PathBuf};

use marque_catalog::{VehicleRecord, seed_dataset, sort_dataset};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine data directory")]
    NoDataDir,
}

/// A blob store holding one serialized dataset snapshot.
pub trait SnapshotStore {
    /// The stored snapshot, or `None` if nothing is stored or it can't be read.
    fn load(&self) -> Option<String>;

    fn save(&mut self, snapshot: &str) -> Result<(), StorageError>;

    /// Remove the stored snapshot. Clearing an empty store is not an error.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Serialize a dataset for storage.
pub fn serialize_snapshot(records: &[VehicleRecord]) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse a stored snapshot.
pub fn deserialize_snapshot(snapshot: &str) -> Result<Vec<VehicleRecord>, StorageError> {
    Ok(serde_json::from_str(snapshot)?)
}

/// Load the dataset from `store`, falling back to the seed dataset when
/// nothing is stored or the snapshot doesn't parse. The result is sorted.
pub fn load_dataset(store: &dyn SnapshotStore) -> Vec<VehicleRecord> {
    let Some(snapshot) = store.load() else {
        log::info!("No saved catalog found, starting from the built-in dataset");
        return seed_dataset();
    };

    match deserialize_snapshot(&snapshot) {
        Ok(records) => {
            log::debug!("Loaded {} record(s) from saved catalog", records.len());
            sort_dataset(&records)
        }
        Err(e) => {
            log::warn!("Saved catalog is unreadable ({}); using the built-in dataset", e);
            seed_dataset()
        }
    }
}

// ── File store ──────────────────────────────────────────────────────────────

/// Default snapshot location: `<data dir>/marque/catalog.json`.
pub fn default_data_file() -> Result<PathBuf, StorageError> {
    let data = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
    Ok(data.join("marque").join("catalog.json"))
}

/// Snapshot stored as a JSON file, written atomically (temp file, then rename).
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl SnapshotStore for FileStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, snapshot: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, snapshot).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

// ── Memory store ────────────────────────────────────────────────────────────

/// In-memory snapshot store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Option<String>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: impl Into<String>) -> Self {
        Self {
            snapshot: Some(snapshot.into()),
            saves: 0,
        }
    }

    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.snapshot.clone()
    }

    fn save(&mut self, snapshot: &str) -> Result<(), StorageError> {
        self.snapshot = Some(snapshot.to_string());
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.snapshot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_store_loads_seed() {
        assert_eq!(load_dataset(&MemoryStore::new()), seed_dataset());
    }

    #[test]
    fn corrupt_snapshot_loads_seed() {
        let store = MemoryStore::with_snapshot("{not json");
        assert_eq!(load_dataset(&store), seed_dataset());
    }

    #[test]
    fn snapshot_is_sorted_on_load() {
        let records = vec![
            VehicleRecord::new("Toyota", "Supra", "5", "J29", 2019, "Present"),
            VehicleRecord::new("Audi", "A4", "9", "B9", 2015, "Present"),
        ];
        let store = MemoryStore::with_snapshot(serialize_snapshot(&records).unwrap());
        let loaded = load_dataset(&store);
        assert_eq!(loaded[0].manufacturer, "Audi");
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn empty_snapshot_stays_empty() {
        let store = MemoryStore::with_snapshot("[]");
        assert!(load_dataset(&store).is_empty());
    }

    #[test]
    fn snapshot_uses_catalog_field_names() {
        let json = r#"[{"Manufacturer":"Honda","Model":"Civic","Generation":"11","Model_Code":"FL","Start_Year":2022,"End_Year":"Present"}]"#;
        let records = deserialize_snapshot(json).unwrap();
        assert_eq!(
            records,
            vec![VehicleRecord::new("Honda", "Civic", "11", "FL", 2022, "Present")]
        );
    }

    #[test]
    fn file_store_round_trip_and_clear() {
        let tmp = TempDir::new().unwrap();
        let mut store = FileStore::new(tmp.path().join("nested").join("catalog.json"));
        assert!(store.load().is_none());

        let seed = seed_dataset();
        store.save(&serialize_snapshot(&seed).unwrap()).unwrap();
        assert_eq!(load_dataset(&store), seed);
        assert!(!store.path().with_extension("json.tmp").exists());

        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }
}
