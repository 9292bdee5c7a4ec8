//! Engine Module
//!
//! Caller-facing layer over a `RecordStore` backed by a snapshot file.
//!
//! ## Responsibilities
//! - Open the data directory and load the last snapshot
//! - Validate keys and fields before they reach the store
//! - Refuse to insert a key that is already live
//! - Save on demand and on close

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, TreeDbError};
use crate::index::{Position, TraversalOrder};
use crate::record::Record;
use crate::storage::SnapshotFile;
use crate::store::{RecordStore, StoreStats};

/// The record engine
///
/// ## Concurrency Model
/// Single-threaded: every mutation takes `&mut self` and runs to completion.
/// Share across threads by wrapping the whole engine in a lock.
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Records and their key index
    store: RecordStore,

    /// Where the store is saved
    snapshot: SnapshotFile,

    /// Unsaved mutations since the last load/save
    dirty: bool,
}

impl Engine {
    /// Open or create an engine with the given config
    ///
    /// On startup:
    /// 1. Validate config
    /// 2. Create data directory
    /// 3. Load the snapshot if present (missing snapshot = empty store)
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        fs::create_dir_all(&config.data_dir)?;

        let snapshot = SnapshotFile::new(config.snapshot_path());
        let mut store = RecordStore::new();
        let loaded = store.load(&snapshot)?;

        tracing::info!(
            data_dir = %config.data_dir.display(),
            records = loaded,
            "Engine opened"
        );

        Ok(Self {
            config,
            store,
            snapshot,
            dirty: false,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Insert a new record
    ///
    /// Fails with `DuplicateKey` if `key` is live. A key whose record was
    /// deleted may be inserted again.
    pub fn insert(&mut self, key: &str, fields: Vec<String>) -> Result<Position> {
        let key = key.trim();
        let fields: Vec<String> = fields.iter().map(|f| f.trim().to_string()).collect();
        self.validate_key(key)?;
        self.validate_fields(&fields)?;

        if self.store.lookup(key).is_some() {
            return Err(TreeDbError::DuplicateKey(key.to_string()));
        }

        let position = self.store.insert(Record::new(key, fields));
        self.dirty = true;
        Ok(position)
    }

    /// Delete a live record
    pub fn remove(&mut self, key: &str) -> Result<()> {
        let key = key.trim();
        self.validate_key(key)?;

        if self.store.lookup(key).is_none() {
            return Err(TreeDbError::KeyNotFound(key.to_string()));
        }

        self.store.delete(key);
        self.dirty = true;
        Ok(())
    }

    /// Live record for `key`
    pub fn get(&self, key: &str) -> Result<Option<&Record>> {
        let key = key.trim();
        self.validate_key(key)?;
        Ok(self.store.lookup(key))
    }

    /// Live records in key order
    pub fn export(&self) -> Vec<&Record> {
        self.store.export_ordered()
    }

    /// Indexed records in the given order
    pub fn traverse(&self, order: TraversalOrder) -> Vec<&Record> {
        self.store.traverse(order)
    }

    /// Write the snapshot now
    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.snapshot)?;
        self.dirty = false;
        Ok(())
    }

    /// Close the engine gracefully
    ///
    /// Saves pending changes when `save_on_close` is set
    pub fn close(mut self) -> Result<()> {
        if self.config.save_on_close && self.dirty {
            self.save()?;
        }
        tracing::info!("Engine closed");
        Ok(())
    }

    // =========================================================================
    // Validation
    // =========================================================================

    fn validate_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(TreeDbError::InvalidKey("key must not be empty".to_string()));
        }

        if let Some(length) = self.config.key_length {
            let actual = key.chars().count();
            if actual != length {
                return Err(TreeDbError::InvalidKey(format!(
                    "expected {} characters, got {}",
                    length, actual
                )));
            }
        }

        if self.config.numeric_keys && !key.chars().all(|c| c.is_ascii_digit()) {
            return Err(TreeDbError::InvalidKey(format!(
                "'{}' must contain digits only",
                key
            )));
        }

        Ok(())
    }

    fn validate_fields(&self, fields: &[String]) -> Result<()> {
        let required = self.config.required_fields;
        if fields.len() < required {
            return Err(TreeDbError::InvalidRecord(format!(
                "expected at least {} fields, got {}",
                required,
                fields.len()
            )));
        }

        if let Some(blank) = fields[..required].iter().position(|f| f.trim().is_empty()) {
            return Err(TreeDbError::InvalidRecord(format!(
                "field {} must not be blank",
                blank
            )));
        }

        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Underlying store
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the snapshot file path
    pub fn snapshot_path(&self) -> &Path {
        self.snapshot.path()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
