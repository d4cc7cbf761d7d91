//! Subtree flattening for delete and rebalance
//!
//! A detached subtree is consumed into a locally owned sequence of entries
//! (preorder), which the caller then feeds back through ordinary insertion.
//! Node identity is not preserved: re-insertion builds fresh nodes from the
//! key, payload and duplicate chain of each entry.

use super::node::{Key, Link, Node};

/// Data extracted from one detached node
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<P> {
    /// Node key
    pub key: Key,
    /// Primary payload
    pub payload: P,
    /// Duplicate chain, oldest first
    pub duplicates: Vec<P>,
}

impl<P> Entry<P> {
    /// Entry for a single logical insertion
    pub fn new(key: Key, payload: P) -> Self {
        Self {
            key,
            payload,
            duplicates: Vec::new(),
        }
    }

    /// Number of logical entries carried (primary + chain)
    pub fn count(&self) -> usize {
        1 + self.duplicates.len()
    }

    /// Split a node from its children
    ///
    /// Returns the node's data and its two (still attached to each other)
    /// child subtrees.
    pub(crate) fn detach(node: Box<Node<P>>) -> (Self, Link<P>, Link<P>) {
        let Node {
            key,
            payload,
            duplicates,
            left,
            right,
            ..
        } = *node;
        (
            Self {
                key,
                payload,
                duplicates,
            },
            left,
            right,
        )
    }

    /// Build a fresh childless node from this entry
    pub(crate) fn into_node(self, index: u64) -> Box<Node<P>> {
        let mut node = Node::new(self.key, index, self.payload);
        node.duplicates = self.duplicates;
        Box::new(node)
    }
}

/// Append a subtree to `out` in preorder (node, left, right)
///
/// Uses an explicit stack, so skewed subtrees do not recurse.
pub(crate) fn flatten_into<P>(subtree: Link<P>, out: &mut Vec<Entry<P>>) {
    let mut stack: Vec<Box<Node<P>>> = subtree.into_iter().collect();

    while let Some(node) = stack.pop() {
        let (entry, left, right) = Entry::detach(node);
        out.push(entry);

        // Right first so that left is visited first
        if let Some(right) = right {
            stack.push(right);
        }
        if let Some(left) = left {
            stack.push(left);
        }
    }
}

/// Flatten a whole subtree into a new preorder sequence
pub(crate) fn flatten<P>(subtree: Link<P>) -> Vec<Entry<P>> {
    let mut out = Vec::new();
    flatten_into(subtree, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(key: Key) -> Link<()> {
        Some(Box::new(Node::new(key, 0, ())))
    }

    fn branch(key: Key, left: Link<()>, right: Link<()>) -> Link<()> {
        let mut node = Node::new(key, 0, ());
        node.left = left;
        node.right = right;
        Some(Box::new(node))
    }

    #[test]
    fn test_flatten_is_preorder() {
        //        9
        //      4   15
        //     1 6 12 18
        let tree = branch(
            9,
            branch(4, leaf(1), leaf(6)),
            branch(15, leaf(12), leaf(18)),
        );
        let keys: Vec<Key> = flatten(tree).into_iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![9, 4, 1, 6, 15, 12, 18]);
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten::<()>(None).is_empty());
    }

    #[test]
    fn test_flatten_keeps_duplicate_chain() {
        let mut node = Node::new(3, 0, 'a');
        node.duplicates = vec!['b', 'c'];
        let entries = flatten(Some(Box::new(node)));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].count(), 3);
        assert_eq!(entries[0].payload, 'a');
        assert_eq!(entries[0].duplicates, vec!['b', 'c']);
    }

    #[test]
    fn test_flatten_into_appends() {
        let mut out = vec![Entry::new(100, ())];
        flatten_into(branch(2, leaf(1), None), &mut out);
        let keys: Vec<Key> = out.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec![100, 2, 1]);
    }
}
