//! In-memory storage backend
//!
//! Keeps a copy of the last persisted sequence. Nothing survives the process.

use parking_lot::Mutex;

use crate::error::Result;
use crate::record::Record;

use super::Durable;

/// Volatile `Durable` implementation
#[derive(Debug, Default)]
pub struct MemoryStorage {
    /// `None` until the first persist
    saved: Mutex<Option<Vec<Record>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything has been persisted yet
    pub fn has_snapshot(&self) -> bool {
        self.saved.lock().is_some()
    }
}

impl Durable for MemoryStorage {
    fn persist(&self, records: &[Record]) -> Result<()> {
        *self.saved.lock() = Some(records.to_vec());
        Ok(())
    }

    fn restore(&self) -> Result<Option<Vec<Record>>> {
        Ok(self.saved.lock().clone())
    }
}
