//! Tree traversals
//!
//! All four orders yield record positions and leave the tree untouched.
//! Depth-first orders use an explicit stack, level order a FIFO queue.

use std::collections::VecDeque;
use std::fmt;

use super::tree::{Node, OrderedIndex};
use super::Position;

/// Traversal order over the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Left, self, right (ascending key order)
    InOrder,

    /// Self, left, right
    PreOrder,

    /// Left, right, self
    PostOrder,

    /// Breadth-first, left to right within each depth
    LevelOrder,
}

impl TraversalOrder {
    /// Every order, in display order
    pub const ALL: [TraversalOrder; 4] = [
        TraversalOrder::InOrder,
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::LevelOrder,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TraversalOrder::InOrder => "in-order",
            TraversalOrder::PreOrder => "pre-order",
            TraversalOrder::PostOrder => "post-order",
            TraversalOrder::LevelOrder => "level-order",
        }
    }
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl OrderedIndex {
    /// Positions in the requested order
    pub fn traverse(&self, order: TraversalOrder) -> Vec<Position> {
        match order {
            TraversalOrder::InOrder => self.in_order(),
            TraversalOrder::PreOrder => self.pre_order(),
            TraversalOrder::PostOrder => self.post_order(),
            TraversalOrder::LevelOrder => self.level_order(),
        }
    }

    /// Positions in ascending key order
    pub fn in_order(&self) -> Vec<Position> {
        self.in_order_nodes().into_iter().map(|node| node.position).collect()
    }

    pub fn pre_order(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            out.push(node.position);
            // Right first so that left is popped first.
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }

        out
    }

    pub fn post_order(&self) -> Vec<Position> {
        // Self, right, left reversed is left, right, self.
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            out.push(node.position);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        out.reverse();
        out
    }

    pub fn level_order(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.len());
        let mut queue: VecDeque<&Node> = self.root.as_deref().into_iter().collect();

        while let Some(node) = queue.pop_front() {
            out.push(node.position);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }

        out
    }

    /// Keys in ascending order
    pub fn keys(&self) -> Vec<&str> {
        self.in_order_nodes().into_iter().map(|node| node.key.as_str()).collect()
    }

    fn in_order_nodes(&self) -> Vec<&Node> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<&Node> = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = stack.pop() else { break };
            out.push(node);
            current = node.right.as_deref();
        }

        out
    }
}
