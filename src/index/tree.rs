//! OrderedIndex implementation
//!
//! Owned `Box` links: every node exclusively owns its two children.

use std::cmp::Ordering;

use super::Position;

/// A link to an optional subtree
pub(super) type Link = Option<Box<Node>>;

/// Tree node: key, record position and the two child links
#[derive(Debug)]
pub(super) struct Node {
    pub(super) key: String,
    pub(super) position: Position,
    pub(super) left: Link,
    pub(super) right: Link,
}

impl Node {
    fn leaf(key: String, position: Position) -> Box<Self> {
        Box::new(Self {
            key,
            position,
            left: None,
            right: None,
        })
    }
}

/// Binary search tree from key to record position
///
/// Invariant: for every node, all keys in its left subtree are strictly
/// smaller and all keys in its right subtree strictly greater. Keys are
/// unique.
#[derive(Debug, Default)]
pub struct OrderedIndex {
    pub(super) root: Link,
    len: usize,
}

impl OrderedIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the mapping for `key`
    ///
    /// Returns the previous position when the key was already present. In
    /// that case only the position is overwritten; no node is added.
    pub fn insert(&mut self, key: impl Into<String>, position: Position) -> Option<Position> {
        let key = key.into();
        let mut slot = &mut self.root;

        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    return Some(std::mem::replace(&mut node.position, position));
                }
            };
        }

        *slot = Some(Node::leaf(key, position));
        self.len += 1;
        None
    }

    /// Remove `key` from the index
    ///
    /// Returns the position that was mapped, or `None` if the key was absent
    /// (absence is not an error).
    pub fn remove(&mut self, key: &str) -> Option<Position> {
        let mut slot = &mut self.root;

        loop {
            let ordering = key.cmp(slot.as_deref()?.key.as_str());
            if ordering == Ordering::Equal {
                break;
            }
            let node = slot.as_mut()?;
            slot = if ordering == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let mut node = slot.take()?;
        let removed = node.position;

        *slot = match (node.left.is_some(), node.right.is_some()) {
            (false, _) => node.right.take(),
            (_, false) => node.left.take(),
            (true, true) => {
                // Two children: adopt the in-order successor's entry, then
                // unlink the successor from the right subtree.
                if let Some(successor) = detach_min(&mut node.right) {
                    node.key = successor.key;
                    node.position = successor.position;
                }
                Some(node)
            }
        };

        self.len -= 1;
        Some(removed)
    }

    /// Exact-match lookup
    pub fn search(&self, key: &str) -> Option<Position> {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            current = match key.cmp(node.key.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node.position),
            };
        }

        None
    }

    pub fn contains(&self, key: &str) -> bool {
        self.search(key).is_some()
    }

    /// Number of keys in the index
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        height
    }

    /// Smallest key in the index
    pub fn min_key(&self) -> Option<&str> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    /// Largest key in the index
    pub fn max_key(&self) -> Option<&str> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }

    /// Drop every node
    pub fn clear(&mut self) {
        teardown(self.root.take());
        self.len = 0;
    }
}

/// Unlink the minimum node of a subtree, splicing its right child into its
/// place. The minimum never has a left child.
fn detach_min(mut slot: &mut Link) -> Option<Box<Node>> {
    while slot.as_deref()?.left.is_some() {
        slot = &mut slot.as_mut()?.left;
    }

    let mut min = slot.take()?;
    *slot = min.right.take();
    Some(min)
}

/// Free a subtree without recursing (a degenerate tree can be very deep)
fn teardown(root: Link) {
    let mut stack: Vec<Box<Node>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl Drop for OrderedIndex {
    fn drop(&mut self) {
        teardown(self.root.take());
    }
}

impl<K: Into<String>> FromIterator<(K, Position)> for OrderedIndex {
    /// Build by inserting each pair in turn (later duplicates win)
    fn from_iter<T: IntoIterator<Item = (K, Position)>>(iter: T) -> Self {
        let mut index = OrderedIndex::new();
        for (key, position) in iter {
            index.insert(key, position);
        }
        index
    }
}
