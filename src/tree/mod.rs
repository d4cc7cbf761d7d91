//! Keyed binary search tree
//!
//! Plain (not self-balancing) BST over `i64` keys:
//! - one node per distinct key, repeated keys go to the node's duplicate chain
//! - deleting an internal node flattens its subtrees and re-inserts them
//! - rebalancing is an explicit one-shot rebuild around a pivot entry
//!
//! Insert, find, height and teardown walk the tree with a cursor or an
//! explicit stack, so recursion depth never tracks tree height.

mod flatten;
mod node;
mod traversal;

pub use flatten::Entry;
pub use node::{is_leaf, Key, Node};
pub use traversal::{Direction, Inorder, Levels, Path, Postorder, Preorder};

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace};

use crate::{PivotStrategy, TreeConfig, TreeError};
use flatten::{flatten, flatten_into};
use node::Link;

/// Binary search tree with opaque payloads
pub struct Tree<P> {
    root: Link<P>,
    config: TreeConfig,
}

/// Shape summary of a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeStats {
    /// Distinct keys (tree nodes)
    pub nodes: usize,
    /// Logical entries, duplicates included
    pub entries: usize,
    /// Number of levels
    pub height: usize,
    /// Nodes without children
    pub leaves: usize,
}

impl TreeStats {
    /// Lowest height any BST with this many nodes can have: ceil(log2(n+1))
    pub fn min_height(&self) -> usize {
        (usize::BITS - self.nodes.leading_zeros()) as usize
    }
}

impl<P> Default for Tree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Tree<P> {
    /// Create an empty tree with the default configuration
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree
    pub fn with_config(config: TreeConfig) -> Self {
        Self { root: None, config }
    }

    /// Active configuration
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Root node, `None` when empty
    pub fn root(&self) -> Option<&Node<P>> {
        self.root.as_deref()
    }

    /// Check if the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of tree nodes (distinct keys)
    pub fn node_count(&self) -> usize {
        self.preorder().count()
    }

    /// Number of logical entries, duplicates included
    pub fn len(&self) -> usize {
        self.preorder().map(Node::duplicate_count).sum()
    }

    /// Insert an entry
    ///
    /// A repeated key does not create a node: the payload is appended to the
    /// existing node's duplicate chain. Returns the key's entry count after
    /// the insertion.
    pub fn insert(&mut self, key: Key, payload: P) -> usize {
        attach(&mut self.root, Entry::new(key, payload))
    }

    /// Look up the node holding `key`
    pub fn find(&self, key: Key) -> Option<&Node<P>> {
        let mut node = self.root.as_deref();
        while let Some(current) = node {
            node = match key.cmp(&current.key) {
                Ordering::Less => current.left(),
                Ordering::Greater => current.right(),
                Ordering::Equal => return Some(current),
            };
        }
        None
    }

    /// Look up the node holding `key`, mutably
    ///
    /// Only payloads can be changed through the returned node; keys and
    /// links stay crate-private.
    pub fn find_mut(&mut self, key: Key) -> Option<&mut Node<P>> {
        let mut node = self.root.as_deref_mut();
        while let Some(current) = node {
            node = match key.cmp(&current.key) {
                Ordering::Less => current.left.as_deref_mut(),
                Ordering::Greater => current.right.as_deref_mut(),
                Ordering::Equal => return Some(current),
            };
        }
        None
    }

    /// Check if `key` is present
    pub fn contains(&self, key: Key) -> bool {
        self.find(key).is_some()
    }

    /// Number of levels (empty = 0, single node = 1)
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&Node<P>, usize)> =
            self.root().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        max
    }

    /// Route from the root to `key`
    pub fn path_to(&self, key: Key) -> Option<Path> {
        traversal::path_to(self.root(), key)
    }

    /// Key of the parent of `key`'s node, `None` for the root or absent keys
    pub fn parent_key(&self, key: Key) -> Option<Key> {
        let parent = self.path_to(key)?.parent()?;
        parent.resolve(self.root()).map(Node::key)
    }

    /// Remove one logical entry for `key`
    ///
    /// With duplicates present, the newest chain entry is dropped and the
    /// topology is untouched. Otherwise the node is removed:
    /// - leaf: detached from its parent
    /// - internal root: the left child (else right child) becomes the new
    ///   root, every other node of both subtrees is re-inserted under it
    /// - internal non-root: detached, then both subtrees are re-inserted
    ///   from the root in preorder, left subtree first
    ///
    /// Returns `false` if the key is absent.
    pub fn delete(&mut self, key: Key) -> bool {
        let Some(node) = self.find_mut(key) else {
            trace!(key, "delete: key not found");
            return false;
        };
        if node.duplicates.pop().is_some() {
            trace!(key, remaining = node.duplicate_count(), "delete: dropped duplicate entry");
            return true;
        }

        let is_root = self.root.as_ref().is_some_and(|root| root.key == key);
        let Some(target) = slot_of(&mut self.root, key).take() else {
            return false;
        };
        let (_removed, left, right) = Entry::detach(target);

        if left.is_none() && right.is_none() {
            debug!(key, is_root, "delete: removed leaf");
            return true;
        }

        if is_root {
            self.root = rebuild_from_children(left, right);
            debug!(
                key,
                new_root = ?self.root.as_ref().map(|root| root.key),
                "delete: rebuilt tree after removing root"
            );
        } else {
            let mut displaced = flatten(left);
            flatten_into(right, &mut displaced);
            debug!(key, displaced = displaced.len(), "delete: re-inserting orphaned subtrees");
            for entry in displaced {
                attach(&mut self.root, entry);
            }
        }
        true
    }

    /// Rebuild the tree around a pivot chosen by the configured strategy
    pub fn rebalance(&mut self) {
        self.rebalance_with(self.config.pivot);
    }

    /// Rebuild the tree around a pivot chosen by `strategy`
    ///
    /// The key multiset (with duplicate counts and payload order) is kept.
    pub fn rebalance_with(&mut self, strategy: PivotStrategy) {
        let mut entries = flatten(self.root.take());
        if entries.is_empty() {
            return;
        }
        let count = entries.len();

        match strategy {
            PivotStrategy::Preorder => {
                let pivot = entries.remove(count / 2);
                debug!(count, pivot = pivot.key, "rebalance: preorder pivot");
                let mut root = Some(pivot.into_node(0));
                for entry in entries {
                    attach(&mut root, entry);
                }
                self.root = root;
            }
            PivotStrategy::SortedMedian => {
                entries.sort_by_key(|entry| entry.key);
                debug!(count, pivot = entries[count / 2].key, "rebalance: sorted median pivot");
                for entry in median_first(entries) {
                    attach(&mut self.root, entry);
                }
            }
        }
    }

    /// Drop every node
    pub fn clear(&mut self) {
        let mut stack: Vec<Box<Node<P>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }

    /// Node, left, right
    pub fn preorder(&self) -> Preorder<'_, P> {
        Preorder::new(self.root())
    }

    /// Ascending keys
    pub fn inorder(&self) -> Inorder<'_, P> {
        Inorder::new(self.root(), false)
    }

    /// Descending keys
    pub fn reverse_inorder(&self) -> Inorder<'_, P> {
        Inorder::new(self.root(), true)
    }

    /// Left, right, node
    pub fn postorder(&self) -> Postorder<'_, P> {
        Postorder::new(self.root())
    }

    /// Nodes grouped by depth, top down
    pub fn levels(&self) -> Levels<'_, P> {
        Levels::new(self.root())
    }

    /// Keys in ascending order
    pub fn keys(&self) -> Vec<Key> {
        self.inorder().map(Node::key).collect()
    }

    /// Shape summary in one pass
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            height: self.height(),
            ..TreeStats::default()
        };
        for node in self.preorder() {
            stats.nodes += 1;
            stats.entries += node.duplicate_count();
            if node.is_leaf() {
                stats.leaves += 1;
            }
        }
        stats
    }

    /// Verify strict key order and array indices
    ///
    /// Reports the first violation found; never repairs anything.
    pub fn check_invariants(&self) -> Result<(), TreeError> {
        // (node, exclusive lower bound, exclusive upper bound, expected index)
        let mut stack: Vec<(&Node<P>, Option<Key>, Option<Key>, u64)> =
            self.root().map(|n| (n, None, None, 0)).into_iter().collect();

        while let Some((node, low, high, index)) = stack.pop() {
            let crossed = low
                .filter(|&low| node.key <= low)
                .or(high.filter(|&high| node.key >= high));
            if let Some(bound) = crossed {
                return Err(if node.key == bound {
                    TreeError::DuplicateNode(node.key)
                } else {
                    TreeError::OrderViolation { key: node.key, bound }
                });
            }
            if node.index != index {
                return Err(TreeError::IndexMismatch {
                    key: node.key,
                    stored: node.index,
                    expected: index,
                });
            }
            if let Some(left) = node.left() {
                stack.push((left, low, Some(node.key), node.left_index()));
            }
            if let Some(right) = node.right() {
                stack.push((right, Some(node.key), high, node.right_index()));
            }
        }
        Ok(())
    }
}

impl<P> Drop for Tree<P> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<P: Clone> Clone for Tree<P> {
    fn clone(&self) -> Self {
        Self {
            root: self.root().map(copy_subtree),
            config: self.config.clone(),
        }
    }
}

/// Lists nodes by ascending key; each node shows only its children's keys
impl<P: fmt::Debug> fmt::Debug for Tree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.inorder().map(|node| (node.key, node)))
            .finish()
    }
}

impl<P> FromIterator<(Key, P)> for Tree<P> {
    fn from_iter<I: IntoIterator<Item = (Key, P)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<P> Extend<(Key, P)> for Tree<P> {
    fn extend<I: IntoIterator<Item = (Key, P)>>(&mut self, iter: I) {
        for (key, payload) in iter {
            self.insert(key, payload);
        }
    }
}

/// Descend from `root` and attach `entry`
///
/// New nodes take their array index from the parent. An existing key
/// absorbs the entry's payloads into its duplicate chain. Returns the
/// key's entry count afterwards.
fn attach<P>(root: &mut Link<P>, entry: Entry<P>) -> usize {
    let mut slot = root;
    let mut index = 0;
    loop {
        let ordering = match slot.as_deref() {
            Some(node) => entry.key.cmp(&node.key),
            None => {
                let count = entry.count();
                *slot = Some(entry.into_node(index));
                return count;
            }
        };
        if let Some(node) = slot {
            match ordering {
                Ordering::Less => {
                    index = node.left_index();
                    slot = &mut node.left;
                }
                Ordering::Greater => {
                    index = node.right_index();
                    slot = &mut node.right;
                }
                Ordering::Equal => {
                    node.duplicates.push(entry.payload);
                    node.duplicates.extend(entry.duplicates);
                    return node.duplicate_count();
                }
            }
        }
    }
}

/// Link holding `key`, or the empty link where it would be attached
fn slot_of<P>(mut slot: &mut Link<P>, key: Key) -> &mut Link<P> {
    loop {
        let ordering = match slot.as_deref() {
            Some(node) => key.cmp(&node.key),
            None => return slot,
        };
        if ordering == Ordering::Equal {
            return slot;
        }
        if let Some(node) = slot {
            slot = match ordering {
                Ordering::Less => &mut node.left,
                _ => &mut node.right,
            };
        }
    }
}

/// Deep copy of a subtree, assembled bottom-up from a postorder walk
fn copy_subtree<P: Clone>(root: &Node<P>) -> Box<Node<P>> {
    let mut built: Vec<Box<Node<P>>> = Vec::new();
    for node in Postorder::new(root.left()).chain(Postorder::new(root.right())) {
        let copy = copy_with_children(node, &mut built);
        built.push(copy);
    }
    copy_with_children(root, &mut built)
}

/// Copy one node, taking its already copied children off `built`
fn copy_with_children<P: Clone>(node: &Node<P>, built: &mut Vec<Box<Node<P>>>) -> Box<Node<P>> {
    // Right subtree finished last
    let right = node.right.as_ref().and_then(|_| built.pop());
    let left = node.left.as_ref().and_then(|_| built.pop());
    Box::new(Node {
        key: node.key,
        index: node.index,
        payload: node.payload.clone(),
        duplicates: node.duplicates.clone(),
        left,
        right,
    })
}

/// New tree for a deleted root's children
///
/// The left child (else the right child) is the replacement root; the rest
/// of both subtrees is re-inserted in preorder.
fn rebuild_from_children<P>(left: Link<P>, right: Link<P>) -> Link<P> {
    let (replacement, displaced) = match (left, right) {
        (Some(left), right) => {
            let (replacement, inner_left, inner_right) = Entry::detach(left);
            let mut displaced = flatten(inner_left);
            flatten_into(inner_right, &mut displaced);
            flatten_into(right, &mut displaced);
            (replacement, displaced)
        }
        (None, Some(right)) => {
            let (replacement, inner_left, inner_right) = Entry::detach(right);
            let mut displaced = flatten(inner_left);
            flatten_into(inner_right, &mut displaced);
            (replacement, displaced)
        }
        (None, None) => return None,
    };

    trace!(root = replacement.key, displaced = displaced.len(), "rebuilding under replacement root");
    let mut root = Some(replacement.into_node(0));
    for entry in displaced {
        attach(&mut root, entry);
    }
    root
}

/// Reorder sorted entries so every range median precedes its halves
///
/// Inserting in this order yields a tree of height ceil(log2(n+1)).
fn median_first<P>(sorted: Vec<Entry<P>>) -> Vec<Entry<P>> {
    let mut slots: Vec<Option<Entry<P>>> = sorted.into_iter().map(Some).collect();
    let mut order = Vec::with_capacity(slots.len());
    let mut ranges = VecDeque::from([(0, slots.len())]);

    while let Some((low, high)) = ranges.pop_front() {
        if low >= high {
            continue;
        }
        let mid = low + (high - low) / 2;
        order.extend(slots[mid].take());
        ranges.push_back((low, mid));
        ranges.push_back((mid + 1, high));
    }
    order
}
