//! Record Store
//!
//! Append-only record sequence plus the key index that points into it.
//!
//! ## Responsibilities
//! - Append records and index them by key
//! - Soft delete: flag the record, drop the key from the index
//! - Key lookup that hides tombstoned records
//! - Key-ordered export of live records
//! - Save/load through a `Durable` backend, rebuilding the index on load
//!
//! ## Layout
//! ```text
//!   records:  [0: "30"] [1: "10"] [2: "40" ✝] [3: "20"]
//!                ▲         ▲                     ▲
//!   index:     "30"──────"10"──────────────────"20"
//! ```
//! Positions are never reused or reordered. Removing a key from the index
//! leaves the record in place with its tombstone set.
//!
//! Not thread-safe by itself; callers serialize access (the engine takes
//! `&mut self` for every mutation).

use crate::error::Result;
use crate::index::{OrderedIndex, Position, TraversalOrder};
use crate::record::Record;
use crate::storage::Durable;

/// Record sequence + primary key index
#[derive(Debug, Default)]
pub struct RecordStore {
    /// Every record ever inserted, in insertion order
    records: Vec<Record>,

    /// key → position in `records`
    index: OrderedIndex,
}

/// Counters describing the store's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Physical records, tombstoned ones included
    pub records: usize,

    /// Records reachable through `lookup`
    pub live: usize,

    /// Records with the tombstone set
    pub tombstoned: usize,

    /// Live records no longer reachable through the index (superseded by a
    /// later insert of the same key)
    pub orphaned: usize,

    /// Longest root-to-leaf path in the index
    pub index_height: usize,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt an existing sequence and rebuild the index from it
    ///
    /// Every record's key is indexed in position order, tombstoned ones
    /// included, so a later record wins over an earlier one with the same key.
    pub fn from_records(records: Vec<Record>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.key(), position))
            .collect();

        Self { records, index }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a record and index it; returns its position
    ///
    /// Duplicate keys are not rejected here. The index is repointed to the
    /// new record and the previous one stays stored but unreachable.
    pub fn insert(&mut self, record: Record) -> Position {
        let position = self.records.len();
        let key = record.key().to_string();
        self.records.push(record);

        if let Some(previous) = self.index.insert(key.as_str(), position) {
            tracing::warn!(
                key = %key,
                previous,
                position,
                "Key re-inserted; previous record is now unreachable"
            );
        } else {
            tracing::debug!(key = %key, position, "Record inserted");
        }

        position
    }

    /// Logically delete the record indexed under `key`
    ///
    /// Returns the tombstoned position, or `None` if the key is not indexed.
    pub fn delete(&mut self, key: &str) -> Option<Position> {
        let position = self.index.search(key)?;

        if let Some(record) = self.records.get_mut(position) {
            record.mark_deleted();
        }
        self.index.remove(key);

        tracing::debug!(key = %key, position, "Record deleted");
        Some(position)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Live record for `key`
    pub fn lookup(&self, key: &str) -> Option<&Record> {
        let position = self.index.search(key)?;
        self.records
            .get(position)
            .filter(|record| !record.is_deleted())
    }

    /// Live records in ascending key order
    pub fn export_ordered(&self) -> Vec<&Record> {
        self.index
            .in_order()
            .into_iter()
            .filter_map(|position| self.records.get(position))
            .filter(|record| !record.is_deleted())
            .collect()
    }

    /// Indexed records in the given traversal order
    ///
    /// Diagnostic view: tombstoned records restored from a snapshot are
    /// still indexed and therefore appear here.
    pub fn traverse(&self, order: TraversalOrder) -> Vec<&Record> {
        self.index
            .traverse(order)
            .into_iter()
            .filter_map(|position| self.records.get(position))
            .collect()
    }

    /// Raw positions in the given traversal order
    pub fn traverse_positions(&self, order: TraversalOrder) -> Vec<Position> {
        self.index.traverse(order)
    }

    /// Raw access by position (tombstoned records are returned too)
    pub fn get(&self, position: Position) -> Option<&Record> {
        self.records.get(position)
    }

    /// The full physical sequence
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// The key index
    pub fn index(&self) -> &OrderedIndex {
        &self.index
    }

    /// Physical record count
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records `lookup` can return
    pub fn live_count(&self) -> usize {
        self.index
            .in_order()
            .into_iter()
            .filter_map(|position| self.records.get(position))
            .filter(|record| !record.is_deleted())
            .count()
    }

    pub fn stats(&self) -> StoreStats {
        let mut indexed = vec![false; self.records.len()];
        for position in self.index.in_order() {
            if let Some(slot) = indexed.get_mut(position) {
                *slot = true;
            }
        }

        let mut stats = StoreStats {
            records: self.records.len(),
            index_height: self.index.height(),
            ..StoreStats::default()
        };

        for (record, indexed) in self.records.iter().zip(indexed) {
            match (record.is_deleted(), indexed) {
                (true, _) => stats.tombstoned += 1,
                (false, true) => stats.live += 1,
                (false, false) => stats.orphaned += 1,
            }
        }

        stats
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Persist the full sequence, tombstones included
    pub fn save<D: Durable + ?Sized>(&self, backend: &D) -> Result<()> {
        backend.persist(&self.records)?;
        tracing::info!(records = self.records.len(), "Store saved");
        Ok(())
    }

    /// Replace the contents with what `backend` restores
    ///
    /// - Nothing persisted: the store is reset to empty
    /// - Malformed data: the error is returned and the store is left as it was
    ///
    /// Returns the number of records loaded.
    pub fn load<D: Durable + ?Sized>(&mut self, backend: &D) -> Result<usize> {
        match backend.restore()? {
            Some(records) => {
                *self = Self::from_records(records);
                tracing::info!(
                    records = self.records.len(),
                    indexed = self.index.len(),
                    "Store loaded"
                );
            }
            None => {
                *self = Self::new();
                tracing::info!("No saved data; starting empty");
            }
        }

        Ok(self.records.len())
    }
}
