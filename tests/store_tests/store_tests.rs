//! Tests for RecordStore
//!
//! These tests verify:
//! - Append-assigned positions and key lookup
//! - Soft delete (tombstone kept, key unreachable)
//! - Ordered export without tombstoned records
//! - Re-insert of an indexed key (index repointed, old record orphaned)
//! - Save/load through a Durable backend and index rebuild

use treedb::{
    Durable, MemoryStorage, Record, RecordStore, Result, StoreStats, TraversalOrder, TreeDbError,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn person(key: &str) -> Record {
    Record::person(key, format!("Name {}", key), "1990-01-01")
}

fn store_with(keys: &[&str]) -> RecordStore {
    let mut store = RecordStore::new();
    for key in keys {
        store.insert(person(key));
    }
    store
}

fn exported_keys(store: &RecordStore) -> Vec<String> {
    store
        .export_ordered()
        .into_iter()
        .map(|record| record.key().to_string())
        .collect()
}

/// Backend whose restore always reports corrupt data
struct CorruptStorage;

impl Durable for CorruptStorage {
    fn persist(&self, _records: &[Record]) -> Result<()> {
        Ok(())
    }

    fn restore(&self) -> Result<Option<Vec<Record>>> {
        Err(TreeDbError::Corruption("bad bytes".to_string()))
    }
}

// =============================================================================
// Insert / Lookup Tests
// =============================================================================

#[test]
fn test_insert_assigns_sequential_positions() {
    let mut store = RecordStore::new();

    assert_eq!(store.insert(person("30")), 0);
    assert_eq!(store.insert(person("10")), 1);
    assert_eq!(store.insert(person("40")), 2);

    assert_eq!(store.len(), 3);
    assert_eq!(store.get(1).map(Record::key), Some("10"));
}

#[test]
fn test_lookup_returns_inserted_record() {
    let store = store_with(&["30", "10", "40", "20"]);

    let record = store.lookup("20").unwrap();
    assert_eq!(record.key(), "20");
    assert_eq!(record.field(0), Some("Name 20"));
    assert_eq!(record.field(1), Some("1990-01-01"));
    assert!(!record.is_deleted());
}

#[test]
fn test_lookup_missing_key() {
    let store = store_with(&["30", "10"]);
    assert!(store.lookup("99").is_none());

    let empty = RecordStore::new();
    assert!(empty.lookup("30").is_none());
    assert!(empty.is_empty());
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_tombstones_and_hides_record() {
    let mut store = store_with(&["30", "10", "40"]);

    assert_eq!(store.delete("10"), Some(1));

    assert!(store.lookup("10").is_none());
    assert!(!store.index().contains("10"));

    // Still physically present
    assert_eq!(store.len(), 3);
    let raw = store.get(1).unwrap();
    assert_eq!(raw.key(), "10");
    assert!(raw.is_deleted());
}

#[test]
fn test_delete_missing_key_is_noop() {
    let mut store = store_with(&["30", "10"]);

    assert_eq!(store.delete("99"), None);

    assert_eq!(store.len(), 2);
    assert!(store.records().iter().all(|r| !r.is_deleted()));
}

#[test]
fn test_delete_twice() {
    let mut store = store_with(&["30", "10"]);

    assert_eq!(store.delete("30"), Some(0));
    assert_eq!(store.delete("30"), None);
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_example_scenario() {
    let mut store = store_with(&["30", "10", "40", "20"]);

    let in_order: Vec<&str> = store
        .traverse(TraversalOrder::InOrder)
        .into_iter()
        .map(Record::key)
        .collect();
    assert_eq!(in_order, vec!["10", "20", "30", "40"]);

    store.delete("10");

    assert!(store.lookup("10").is_none());
    assert_eq!(exported_keys(&store), vec!["20", "30", "40"]);
}

#[test]
fn test_export_is_sorted_and_live_only() {
    let mut store = store_with(&["55", "11", "88", "33", "22", "77"]);
    store.delete("33");
    store.delete("88");

    let exported = store.export_ordered();
    assert!(exported.iter().all(|r| !r.is_deleted()));
    assert_eq!(exported_keys(&store), vec!["11", "22", "55", "77"]);
}

#[test]
fn test_export_empty_store() {
    assert!(RecordStore::new().export_ordered().is_empty());
}

// =============================================================================
// Duplicate Key Tests
// =============================================================================

#[test]
fn test_reinsert_points_index_at_newest_record() {
    let mut store = RecordStore::new();
    store.insert(Record::person("10", "Old", "1980-01-01"));
    let newer = store.insert(Record::person("10", "New", "1990-01-01"));

    assert_eq!(newer, 1);
    assert_eq!(store.lookup("10").and_then(|r| r.field(0)), Some("New"));
    assert_eq!(store.len(), 2);
    assert_eq!(store.export_ordered().len(), 1);

    let stats = store.stats();
    assert_eq!(stats.orphaned, 1);
    assert_eq!(stats.live, 1);
}

#[test]
fn test_reinsert_after_delete() {
    let mut store = store_with(&["10", "20"]);
    store.delete("10");
    let position = store.insert(Record::person("10", "Again", "2000-02-02"));

    assert_eq!(position, 2);
    assert_eq!(store.lookup("10").and_then(|r| r.field(0)), Some("Again"));
    assert!(store.get(0).unwrap().is_deleted());
}

// =============================================================================
// Stats Tests
// =============================================================================

#[test]
fn test_stats() {
    let mut store = store_with(&["30", "10", "40", "20"]);
    store.delete("40");

    assert_eq!(
        store.stats(),
        StoreStats {
            records: 4,
            live: 3,
            tombstoned: 1,
            orphaned: 0,
            index_height: 3,
        }
    );
    assert_eq!(store.live_count(), 3);
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_save_and_load_round_trip() {
    let backend = MemoryStorage::new();
    let mut store = store_with(&["30", "10", "40", "20"]);
    store.delete("40");
    store.save(&backend).unwrap();

    let mut reloaded = RecordStore::new();
    let loaded = reloaded.load(&backend).unwrap();

    assert_eq!(loaded, 4);
    assert_eq!(reloaded.records(), store.records());
    assert_eq!(exported_keys(&reloaded), exported_keys(&store));
}

#[test]
fn test_load_reindexes_tombstoned_keys_but_lookup_hides_them() {
    let backend = MemoryStorage::new();
    let mut store = store_with(&["30", "10"]);
    store.delete("10");
    store.save(&backend).unwrap();

    let mut reloaded = RecordStore::new();
    reloaded.load(&backend).unwrap();

    assert_eq!(reloaded.index().search("10"), Some(1));
    assert!(reloaded.lookup("10").is_none());
    assert_eq!(exported_keys(&reloaded), vec!["30"]);

    // Diagnostic traversal still sees the tombstoned record
    assert_eq!(reloaded.traverse(TraversalOrder::InOrder).len(), 2);
}

#[test]
fn test_insert_after_reload_overrides_tombstoned_entry() {
    let backend = MemoryStorage::new();
    let mut store = store_with(&["30", "10"]);
    store.delete("10");
    store.save(&backend).unwrap();

    let mut reloaded = RecordStore::new();
    reloaded.load(&backend).unwrap();
    let position = reloaded.insert(Record::person("10", "Back", "2001-01-01"));

    assert_eq!(position, 2);
    assert_eq!(reloaded.index().search("10"), Some(2));
    assert_eq!(reloaded.lookup("10").and_then(|r| r.field(0)), Some("Back"));
}

#[test]
fn test_load_with_nothing_saved_resets_to_empty() {
    let backend = MemoryStorage::new();
    let mut store = store_with(&["30", "10"]);

    let loaded = store.load(&backend).unwrap();

    assert_eq!(loaded, 0);
    assert!(store.is_empty());
    assert!(store.index().is_empty());
}

#[test]
fn test_load_failure_keeps_existing_contents() {
    let mut store = store_with(&["30", "10"]);

    let err = store.load(&CorruptStorage).unwrap_err();

    assert!(matches!(err, TreeDbError::Corruption(_)));
    assert_eq!(store.len(), 2);
    assert!(store.lookup("30").is_some());
}

#[test]
fn test_from_records_later_duplicate_wins() {
    let records = vec![
        Record::person("10", "First", "1970-01-01"),
        Record::person("20", "Other", "1970-01-01"),
        Record::person("10", "Second", "1970-01-01"),
    ];

    let store = RecordStore::from_records(records);

    assert_eq!(store.index().len(), 2);
    assert_eq!(store.lookup("10").and_then(|r| r.field(0)), Some("Second"));
    assert_eq!(store.stats().orphaned, 1);
}
