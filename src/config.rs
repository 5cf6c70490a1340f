//! Application Configuration
//! Optional JSON settings file; every field falls back to a default.

use crate::data::DEFAULT_CACHE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "DATA_EXPLORER_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "data_explorer.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("CSV separator must be a single ASCII character, got {0:?}")]
    BadSeparator(char),
}

/// CSV parsing options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub separator: char,
    pub has_header: bool,
    pub infer_schema_length: Option<usize>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: ',',
            has_header: true,
            infer_schema_length: Some(10000),
        }
    }
}

impl CsvOptions {
    /// Separator as the byte polars expects.
    pub fn separator_byte(&self) -> Result<u8, ConfigError> {
        if self.separator.is_ascii() {
            Ok(self.separator as u8)
        } else {
            Err(ConfigError::BadSeparator(self.separator))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_width: f32,
    pub window_height: f32,
    /// Rows shown in the raw data table; `None` shows all.
    pub preview_rows: Option<usize>,
    pub export_width: u32,
    pub export_height: u32,
    /// Parsed files kept in memory for instant reloads.
    pub cache_capacity: usize,
    pub csv: CsvOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1400.0,
            window_height: 900.0,
            preview_rows: Some(1000),
            export_width: 1200,
            export_height: 800,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            csv: CsvOptions::default(),
        }
    }
}

impl AppConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.csv.separator_byte()?;
        Ok(config)
    }

    /// Load from `$DATA_EXPLORER_CONFIG` or `./data_explorer.json`.
    /// A missing default file is not an error; a broken one logs and falls back.
    pub fn load() -> Self {
        let (path, explicit) = match std::env::var_os(CONFIG_ENV) {
            Some(p) => (PathBuf::from(p), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !explicit && !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}
