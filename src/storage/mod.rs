//! Storage Module
//!
//! Durable save/restore of the full record sequence.
//!
//! ## Responsibilities
//! - Persist every record in position order, tombstones included
//! - Restore the same sequence, or report that nothing was ever saved
//! - Detect and report malformed data instead of treating it as absent
//!
//! ## Snapshot File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (14 bytes)                                       │
//! │   Magic: "TRDB" (4) | Version: u16 (2) | Count: u64 (8) │
//! ├─────────────────────────────────────────────────────────┤
//! │ Body (variable)                                         │
//! │   bincode(Vec<Record>)                                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ Footer (8 bytes)                                        │
//! │   BodyLen: u32 (4) | BodyCRC: u32 (4)                   │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod memory;
mod snapshot;

pub use memory::MemoryStorage;
pub use snapshot::SnapshotFile;

use crate::error::Result;
use crate::record::Record;

// =============================================================================
// Shared Constants
// =============================================================================

/// Magic bytes identifying a TreeDB snapshot file
pub(crate) const MAGIC: &[u8; 4] = b"TRDB";

/// Current snapshot format version
pub(crate) const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + RecordCount (8) = 14 bytes
pub(crate) const HEADER_SIZE: usize = 14;

/// Footer size: BodyLen (4) + BodyCRC (4) = 8 bytes
pub(crate) const FOOTER_SIZE: usize = 8;

// =============================================================================
// Durable Trait
// =============================================================================

/// Save/restore primitive used by the record store
///
/// Implementations must give back, in original order, exactly the records
/// (fields and tombstones) last handed to `persist`.
pub trait Durable {
    /// Replace the persisted sequence with `records`
    fn persist(&self, records: &[Record]) -> Result<()>;

    /// Restore the persisted sequence
    ///
    /// Returns:
    /// - `Ok(Some(records))` — data restored
    /// - `Ok(None)` — nothing has been persisted (resource absent)
    /// - `Err(_)` — data exists but could not be read back intact
    fn restore(&self) -> Result<Option<Vec<Record>>>;
}
