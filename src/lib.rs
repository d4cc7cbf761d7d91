//! # Keyed Binary Search Tree
//!
//! A plain binary search tree over integer keys with opaque payloads.
//!
//! ## Core Operations
//!
//! 1. **Insert**: descend by key; a repeated key grows the node's duplicate
//!    chain instead of adding a node
//! 2. **Find / Height**: standard O(height) search, level count
//! 3. **Delete**: leaves are detached; internal nodes have their subtrees
//!    flattened (preorder) and re-inserted
//! 4. **Rebalance**: flatten the whole tree, promote a pivot entry to root,
//!    re-insert the rest
//!
//! The tree does not keep itself balanced. Repeated deletes can skew it;
//! [`Tree::rebalance`] is the explicit remedy.
//!
//! ## Usage Example
//!
//! ```
//! use bintree::{Tree, Node};
//!
//! let mut tree: Tree<()> = [9, 4, 15, 1, 6, 12, 18].into_iter().map(|k| (k, ())).collect();
//! assert_eq!(tree.height(), 3);
//! assert!(tree.delete(9));
//! assert_eq!(tree.keys(), vec![1, 4, 6, 12, 15, 18]);
//! assert_eq!(tree.root().map(Node::key), Some(4));
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod demo;   // Seeded demo harness used by the CLI
pub mod print;  // Level layout and traversal printers
pub mod tree;   // Node, Tree, flattening, traversal

// Re-exports for convenience
pub use tree::{is_leaf, Direction, Entry, Key, Node, Path, Tree, TreeStats};

use thiserror::Error;

/// How [`Tree::rebalance`] picks the new root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum PivotStrategy {
    /// Entry at position n/2 of the preorder flattening
    ///
    /// Positional, not the key median: the result is usually shallower but
    /// carries no height guarantee.
    #[default]
    Preorder,

    /// Key median, rebuilt median-first for height ceil(log2(n+1))
    SortedMedian,
}

/// Configuration parameters for a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeConfig {
    /// Pivot selection for [`Tree::rebalance`]
    pub pivot: PivotStrategy,
}

impl TreeConfig {
    /// Configuration whose rebalance yields a minimum-height tree
    pub fn balanced() -> Self {
        Self {
            pivot: PivotStrategy::SortedMedian,
        }
    }
}

/// Errors reported by invariant checks and input parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Node key on the wrong side of an ancestor
    #[error("key {key} violates ordering bound {bound}")]
    OrderViolation {
        /// Offending key
        key: Key,
        /// Ancestor key it was compared against
        bound: Key,
    },

    /// A key held by more than one tree node
    #[error("key {0} appears in more than one node")]
    DuplicateNode(Key),

    /// Stored array index disagrees with the node's position
    #[error("key {key} stores index {stored}, position implies {expected}")]
    IndexMismatch {
        /// Node key
        key: Key,
        /// Index recorded on the node
        stored: u64,
        /// Index recomputed from the root path
        expected: u64,
    },

    /// Key list entry that is not an integer
    #[error("invalid key {0:?}")]
    InvalidKey(String),

    /// Demo tree size outside the supported range
    #[error("invalid tree size {size} (expected 1..={max})")]
    InvalidSize {
        /// Requested size
        size: usize,
        /// Largest accepted size
        max: usize,
    },
}
