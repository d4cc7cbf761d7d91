//! Tree printers
//!
//! Read-only consumers of the tree: they only use traversal order, height
//! and per-node key/count/index.

mod layout;
mod sink;

pub use layout::{column, label, render_levels, write_levels, LAID_OUT_LEVELS};
pub use sink::{write_io, IoSink};

use std::fmt::{self, Write};

use crate::tree::{Node, Tree};

/// Traversal order for [`write_traversal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Node, left, right
    Preorder,
    /// Ascending keys
    Inorder,
    /// Left, right, node
    Postorder,
    /// Descending keys
    ReverseInorder,
}

/// How much of each node to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeStyle {
    /// `(key) ` on one line
    #[default]
    Compact,
    /// One line per node with index, count and leaf marker
    Verbose,
}

/// Write a single node
pub fn write_node<P, W: Write>(out: &mut W, node: &Node<P>, style: NodeStyle) -> fmt::Result {
    match style {
        NodeStyle::Compact => write!(out, "({}) ", node.key()),
        NodeStyle::Verbose => {
            write!(
                out,
                "({}) <{}> count={}",
                node.key(),
                node.index(),
                node.duplicate_count()
            )?;
            if node.is_leaf() {
                out.write_str(" (leaf node)")?;
            }
            out.write_char('\n')
        }
    }
}

/// Write every node in the given order
pub fn write_traversal<P, W: Write>(
    out: &mut W,
    tree: &Tree<P>,
    order: Order,
    style: NodeStyle,
) -> fmt::Result {
    let nodes: Box<dyn Iterator<Item = &Node<P>> + '_> = match order {
        Order::Preorder => Box::new(tree.preorder()),
        Order::Inorder => Box::new(tree.inorder()),
        Order::Postorder => Box::new(tree.postorder()),
        Order::ReverseInorder => Box::new(tree.reverse_inorder()),
    };
    for node in nodes {
        write_node(out, node, style)?;
    }
    Ok(())
}

/// Render a traversal into a string
pub fn render_traversal<P>(tree: &Tree<P>, order: Order, style: NodeStyle) -> String {
    let mut out = String::new();
    let _ = write_traversal(&mut out, tree, order, style);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree<()> {
        [9, 4, 15, 1, 6, 12, 18].into_iter().map(|k| (k, ())).collect()
    }

    #[test]
    fn test_compact_traversals() {
        let tree = sample();
        assert_eq!(
            render_traversal(&tree, Order::Inorder, NodeStyle::Compact),
            "(1) (4) (6) (9) (12) (15) (18) "
        );
        assert_eq!(
            render_traversal(&tree, Order::ReverseInorder, NodeStyle::Compact),
            "(18) (15) (12) (9) (6) (4) (1) "
        );
        assert_eq!(
            render_traversal(&tree, Order::Preorder, NodeStyle::Compact),
            "(9) (4) (1) (6) (15) (12) (18) "
        );
        assert_eq!(
            render_traversal(&tree, Order::Postorder, NodeStyle::Compact),
            "(1) (6) (4) (12) (18) (15) (9) "
        );
    }

    #[test]
    fn test_verbose_node() {
        let mut tree = sample();
        tree.insert(6, ());
        let mut out = String::new();
        write_node(&mut out, tree.find(6).expect("6 present"), NodeStyle::Verbose).unwrap();
        assert_eq!(out, "(6) <4> count=2 (leaf node)\n");

        out.clear();
        write_node(&mut out, tree.find(4).expect("4 present"), NodeStyle::Verbose).unwrap();
        assert_eq!(out, "(4) <1> count=1\n");
    }

    #[test]
    fn test_empty_traversal() {
        let tree = Tree::<()>::new();
        assert!(render_traversal(&tree, Order::Inorder, NodeStyle::Compact).is_empty());
    }
}
