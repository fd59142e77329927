//! Shared application settings.
//!
//! The settings file is `~/.config/marque/settings.toml`. Missing or corrupt
//! files fall back to defaults.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{StorageError, default_data_file};

/// Rows per page when nothing is configured.
pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Overrides the default snapshot location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            data_file: None,
        }
    }
}

/// Suggestion provider connection settings. Environment variables take
/// precedence over these (see `marque-suggest`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Canonical path to the settings file: `~/.config/marque/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("marque").join("settings.toml")
}

/// Load settings from the canonical path, returning defaults if missing or
/// corrupt.
pub fn load_settings() -> Settings {
    let path = settings_path();
    if !path.exists() {
        return Settings::default();
    }
    load_settings_from(&path).unwrap_or_else(|e| {
        log::warn!("{}; using default settings", e);
        Settings::default()
    })
}

/// Load settings from a specific file.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| SettingsError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

impl Settings {
    /// Resolve the snapshot path using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `catalog.data_file` in `settings.toml`
    /// 3. `<data dir>/marque/catalog.json`
    pub fn resolve_data_file(&self, cli_override: Option<PathBuf>) -> Result<PathBuf, StorageError> {
        if let Some(p) = cli_override {
            return Ok(p);
        }
        if let Some(p) = &self.catalog.data_file {
            return Ok(p.clone());
        }
        default_data_file()
    }

    /// Configured page size, never zero.
    pub fn page_size(&self) -> usize {
        self.catalog.page_size.max(1)
    }
}
