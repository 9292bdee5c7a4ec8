//! Record value type
//!
//! A primary key, an ordered list of payload fields and a tombstone flag.
//! Records are never edited after creation; the only state change is the
//! tombstone flipping from live to deleted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single stored record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Primary key (opaque, ordered lexicographically)
    key: String,

    /// Payload fields in declaration order (e.g. name, birth date)
    fields: Vec<String>,

    /// Set when the record has been logically deleted
    tombstone: bool,
}

impl Record {
    /// Create a live record
    pub fn new<I, S>(key: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            tombstone: false,
        }
    }

    /// Create a person record: `[name, birth_date]`
    pub fn person(
        key: impl Into<String>,
        name: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        Self::new(key, [name.into(), birth_date.into()])
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Field at `index`, if present
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn is_deleted(&self) -> bool {
        self.tombstone
    }

    /// Flip the tombstone. Deletion is one-way.
    pub(crate) fn mark_deleted(&mut self) {
        self.tombstone = true;
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.fields.join(", "))?;
        if self.tombstone {
            write!(f, " [deleted]")?;
        }
        Ok(())
    }
}
