//! Index Module
//!
//! Unbalanced binary search tree mapping a record key to its position in
//! the record sequence.
//!
//! ## Responsibilities
//! - Upsert a key → position mapping
//! - Remove a key (successor replacement for two-child nodes)
//! - Exact-match search
//! - In-order, pre-order, post-order and level-order traversal
//!
//! ## Shape
//! ```text
//!              "30" → 0
//!             /        \
//!      "10" → 1      "40" → 2
//!             \
//!          "20" → 3
//! ```
//! No rebalancing is ever performed: inserting keys in sorted order builds
//! a linked list. Every operation is iterative so that depth is bounded by
//! heap memory rather than the call stack.

mod traversal;
mod tree;

pub use traversal::TraversalOrder;
pub use tree::OrderedIndex;

/// Position of a record in the record sequence (0-based, append-assigned)
pub type Position = usize;
