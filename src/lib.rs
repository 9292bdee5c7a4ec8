//! # TreeDB
//!
//! A minimal single-node record store with:
//! - Append-only record sequence with soft deletes (tombstones)
//! - Unbalanced binary search tree index from primary key to position
//! - In-order, pre-order, post-order and level-order index traversal
//! - Checksummed snapshot persistence with index rebuild on load
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CLI / Front End                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Engine                                │
//! │           (key validation, duplicate rejection)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     RecordStore                              │
//! └──────────┬─────────────────────────────────┬────────────────┘
//!            │                                 │
//!            ▼                                 ▼
//!   ┌─────────────────┐              ┌──────────────────┐
//!   │  Vec<Record>    │◄─ position ──│  OrderedIndex    │
//!   │  (append-only)  │              │  (BST by key)    │
//!   └────────┬────────┘              └──────────────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐
//!   │    Durable      │
//!   │ (SnapshotFile)  │
//!   └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod index;
pub mod storage;
pub mod store;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TreeDbError, Result};
pub use config::Config;
pub use record::Record;
pub use index::{OrderedIndex, Position, TraversalOrder};
pub use storage::{Durable, MemoryStorage, SnapshotFile};
pub use store::{RecordStore, StoreStats};
pub use engine::Engine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of TreeDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
