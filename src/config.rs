//! Configuration for TreeDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, TreeDbError};

/// Main configuration for a TreeDB instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for data files
    /// Internal structure:
    ///   {data_dir}/
    ///     └── records.tdb      (snapshot of the record sequence)
    pub data_dir: PathBuf,

    /// File name of the snapshot inside `data_dir`
    pub snapshot_file: String,

    /// Persist the store when the engine is closed
    pub save_on_close: bool,

    // -------------------------------------------------------------------------
    // Validation Configuration
    // -------------------------------------------------------------------------
    /// Exact key length required by the engine (`None` accepts any non-empty key)
    pub key_length: Option<usize>,

    /// Require keys to consist of ASCII digits only
    pub numeric_keys: bool,

    /// Number of leading payload fields that must be present and non-blank
    pub required_fields: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./treedb_data"),
            snapshot_file: "records.tdb".to_string(),
            save_on_close: true,
            key_length: Some(11),
            numeric_keys: true,
            required_fields: 2, // name, birth date
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the snapshot file
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_file.trim().is_empty() {
            return Err(TreeDbError::Config(
                "snapshot_file must not be empty".to_string(),
            ));
        }
        if self.key_length == Some(0) {
            return Err(TreeDbError::Config(
                "key_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all storage)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the snapshot file name
    pub fn snapshot_file(mut self, name: impl Into<String>) -> Self {
        self.config.snapshot_file = name.into();
        self
    }

    /// Enable or disable saving when the engine closes
    pub fn save_on_close(mut self, enabled: bool) -> Self {
        self.config.save_on_close = enabled;
        self
    }

    /// Set the required key length (`None` disables the length check)
    pub fn key_length(mut self, length: Option<usize>) -> Self {
        self.config.key_length = length;
        self
    }

    /// Require digit-only keys
    pub fn numeric_keys(mut self, enabled: bool) -> Self {
        self.config.numeric_keys = enabled;
        self
    }

    /// Set how many leading fields must be non-blank
    pub fn required_fields(mut self, count: usize) -> Self {
        self.config.required_fields = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
