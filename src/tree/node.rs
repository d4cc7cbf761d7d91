//! Tree node representation
//!
//! Node = key + array position + payload, children owned by the node.
//! Entries sharing a key live in the node's duplicate chain, never as
//! separate tree nodes.

use std::fmt;

/// Sort/search value of a node
pub type Key = i64;

/// Owned child link
pub(crate) type Link<P> = Option<Box<Node<P>>>;

/// Binary search tree node
///
/// The payload is opaque to the tree: it is stored and handed back, never
/// inspected.
pub struct Node<P> {
    pub(crate) key: Key,

    /// Position in a complete-binary-array encoding (root = 0)
    pub(crate) index: u64,

    pub(crate) payload: P,

    /// Payloads of later insertions of the same key, oldest first
    pub(crate) duplicates: Vec<P>,

    pub(crate) left: Link<P>,
    pub(crate) right: Link<P>,
}

impl<P> Node<P> {
    /// Create a childless node with a duplicate count of 1
    pub fn new(key: Key, index: u64, payload: P) -> Self {
        Self {
            key,
            index,
            payload,
            duplicates: Vec::new(),
            left: None,
            right: None,
        }
    }

    /// Node key
    #[inline]
    pub fn key(&self) -> Key {
        self.key
    }

    /// Array position recorded when the node was attached
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Number of logical entries stored under this key
    #[inline]
    pub fn duplicate_count(&self) -> usize {
        1 + self.duplicates.len()
    }

    /// Payload of the first insertion of this key
    #[inline]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Mutable access to the primary payload
    #[inline]
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Payloads of every entry under this key, in insertion order
    pub fn payloads(&self) -> impl Iterator<Item = &P> {
        std::iter::once(&self.payload).chain(self.duplicates.iter())
    }

    /// Duplicate chain only (excludes the primary payload)
    pub fn same_key_chain(&self) -> &[P] {
        &self.duplicates
    }

    /// Left child
    #[inline]
    pub fn left(&self) -> Option<&Node<P>> {
        self.left.as_deref()
    }

    /// Right child
    #[inline]
    pub fn right(&self) -> Option<&Node<P>> {
        self.right.as_deref()
    }

    /// Check if leaf (no children)
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Array position of the left child of this node
    #[inline]
    pub(crate) fn left_index(&self) -> u64 {
        child_index(self.index, super::Direction::Left)
    }

    /// Array position of the right child of this node
    #[inline]
    pub(crate) fn right_index(&self) -> u64 {
        child_index(self.index, super::Direction::Right)
    }
}

/// Leaf test that accepts an absent node
///
/// An empty link counts as a leaf so printers can treat "no node" and
/// "node without children" alike.
pub fn is_leaf<P>(node: Option<&Node<P>>) -> bool {
    node.map_or(true, Node::is_leaf)
}

/// Array position of a child: 2i+1 (left) or 2i+2 (right), saturating
pub(crate) fn child_index(parent: u64, direction: super::Direction) -> u64 {
    let offset = match direction {
        super::Direction::Left => 1,
        super::Direction::Right => 2,
    };
    parent.saturating_mul(2).saturating_add(offset)
}

/// Shallow: children appear as their keys only
impl<P: fmt::Debug> fmt::Debug for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("index", &self.index)
            .field("payload", &self.payload)
            .field("duplicates", &self.duplicates)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<P> fmt::Display for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.duplicates.is_empty() {
            write!(f, "({})", self.key)
        } else {
            write!(f, "({} x{})", self.key, self.duplicate_count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Direction;

    #[test]
    fn test_new_node_is_leaf_with_count_one() {
        let node = Node::new(5, 0, "five");
        assert!(node.is_leaf());
        assert_eq!(node.duplicate_count(), 1);
        assert_eq!(node.payloads().copied().collect::<Vec<_>>(), vec!["five"]);
        assert!(node.same_key_chain().is_empty());
    }

    #[test]
    fn test_absent_node_counts_as_leaf() {
        assert!(is_leaf::<()>(None));

        let mut node = Node::new(1, 0, ());
        node.left = Some(Box::new(Node::new(0, 1, ())));
        assert!(!is_leaf(Some(&node)));
        assert!(is_leaf(node.left()));
    }

    #[test]
    fn test_child_index_arithmetic() {
        assert_eq!(child_index(0, Direction::Left), 1);
        assert_eq!(child_index(0, Direction::Right), 2);
        assert_eq!(child_index(4, Direction::Left), 9);
        assert_eq!(child_index(4, Direction::Right), 10);
        assert_eq!(child_index(u64::MAX / 2 + 1, Direction::Right), u64::MAX);
    }

    #[test]
    fn test_display_shows_duplicates() {
        let mut node = Node::new(7, 0, ());
        assert_eq!(node.to_string(), "(7)");
        node.duplicates.push(());
        assert_eq!(node.to_string(), "(7 x2)");
    }

    #[test]
    fn test_debug_names_children_by_key() {
        let mut node = Node::new(5, 0, 'p');
        node.right = Some(Box::new(Node::new(8, 2, 'q')));
        assert_eq!(
            format!("{node:?}"),
            "Node { key: 5, index: 0, payload: 'p', duplicates: [], left: None, right: Some(8) }"
        );
    }
}
