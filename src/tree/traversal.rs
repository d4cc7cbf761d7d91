//! Path-based positions and stack-driven traversals
//!
//! Nodes do not store parent links. A node's position is a path of
//! directions from the root; parent and array index are recomputed from it.
//! All traversals keep an explicit stack instead of recursing.

use super::node::{child_index, Key, Node};

/// Which child a path step takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Direction {
    /// Towards smaller keys
    Left,

    /// Towards larger keys
    Right,
}

/// Route from the root to a node
///
/// Stack depth equals the node's depth; the root has an empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Path {
    steps: Vec<Direction>,
}

impl Path {
    /// Path of the root
    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    /// Push one level
    pub fn push_level(&mut self, direction: Direction) {
        self.steps.push(direction);
    }

    /// Pop one level
    pub fn pop_level(&mut self) -> Option<Direction> {
        self.steps.pop()
    }

    /// Number of steps below the root
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Steps from the root, top down
    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    /// Recompute the complete-binary-array position from the steps
    ///
    /// Saturates on paths deeper than 63 levels.
    pub fn array_index(&self) -> u64 {
        self.steps
            .iter()
            .fold(0, |index, &direction| child_index(index, direction))
    }

    /// Path of the parent, `None` for the root
    pub fn parent(&self) -> Option<Path> {
        if self.steps.is_empty() {
            return None;
        }
        let mut parent = self.clone();
        parent.pop_level();
        Some(parent)
    }

    /// Follow the path from `root`
    ///
    /// Returns `None` if the path leaves the tree.
    pub fn resolve<'a, P>(&self, root: Option<&'a Node<P>>) -> Option<&'a Node<P>> {
        let mut node = root?;
        for direction in &self.steps {
            node = match direction {
                Direction::Left => node.left()?,
                Direction::Right => node.right()?,
            };
        }
        Some(node)
    }
}

/// Search path to `key`, if present
pub(crate) fn path_to<P>(root: Option<&Node<P>>, key: Key) -> Option<Path> {
    let mut path = Path::root();
    let mut node = root?;
    loop {
        if key == node.key {
            return Some(path);
        }
        let direction = if key < node.key {
            Direction::Left
        } else {
            Direction::Right
        };
        node = match direction {
            Direction::Left => node.left()?,
            Direction::Right => node.right()?,
        };
        path.push_level(direction);
    }
}

/// Preorder iterator: node, left, right
#[derive(Debug)]
pub struct Preorder<'a, P> {
    stack: Vec<&'a Node<P>>,
}

impl<'a, P> Preorder<'a, P> {
    pub(crate) fn new(root: Option<&'a Node<P>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, P> Iterator for Preorder<'a, P> {
    type Item = &'a Node<P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        if let Some(left) = node.left() {
            self.stack.push(left);
        }
        Some(node)
    }
}

/// In-order iterator (ascending keys), or descending when reversed
#[derive(Debug)]
pub struct Inorder<'a, P> {
    stack: Vec<&'a Node<P>>,
    reversed: bool,
}

impl<'a, P> Inorder<'a, P> {
    pub(crate) fn new(root: Option<&'a Node<P>>, reversed: bool) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            reversed,
        };
        iter.descend(root);
        iter
    }

    /// Push the near spine of a subtree
    fn descend(&mut self, mut node: Option<&'a Node<P>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = if self.reversed {
                current.right()
            } else {
                current.left()
            };
        }
    }
}

impl<'a, P> Iterator for Inorder<'a, P> {
    type Item = &'a Node<P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let far = if self.reversed {
            node.left()
        } else {
            node.right()
        };
        self.descend(far);
        Some(node)
    }
}

/// Postorder iterator: left, right, node
#[derive(Debug)]
pub struct Postorder<'a, P> {
    /// (node, children already pushed)
    stack: Vec<(&'a Node<P>, bool)>,
}

impl<'a, P> Postorder<'a, P> {
    pub(crate) fn new(root: Option<&'a Node<P>>) -> Self {
        Self {
            stack: root.map(|node| (node, false)).into_iter().collect(),
        }
    }
}

impl<'a, P> Iterator for Postorder<'a, P> {
    type Item = &'a Node<P>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded || node.is_leaf() {
                return Some(node);
            }
            self.stack.push((node, true));
            if let Some(right) = node.right() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left() {
                self.stack.push((left, false));
            }
        }
        None
    }
}

/// Level-order iterator yielding one `Vec` of nodes per depth
#[derive(Debug)]
pub struct Levels<'a, P> {
    current: Vec<&'a Node<P>>,
}

impl<'a, P> Levels<'a, P> {
    pub(crate) fn new(root: Option<&'a Node<P>>) -> Self {
        Self {
            current: root.into_iter().collect(),
        }
    }
}

impl<'a, P> Iterator for Levels<'a, P> {
    type Item = Vec<&'a Node<P>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_empty() {
            return None;
        }
        let next: Vec<&'a Node<P>> = self
            .current
            .iter()
            .flat_map(|&node| node.left().into_iter().chain(node.right()))
            .collect();
        Some(std::mem::replace(&mut self.current, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;

    fn sample() -> Tree<()> {
        let mut tree = Tree::new();
        for key in [9, 4, 15, 1, 6, 12, 18] {
            tree.insert(key, ());
        }
        tree
    }

    fn keys<'a>(nodes: impl Iterator<Item = &'a Node<()>>) -> Vec<Key> {
        nodes.map(Node::key).collect()
    }

    #[test]
    fn test_traversal_orders() {
        let tree = sample();
        assert_eq!(keys(tree.preorder()), vec![9, 4, 1, 6, 15, 12, 18]);
        assert_eq!(keys(tree.inorder()), vec![1, 4, 6, 9, 12, 15, 18]);
        assert_eq!(keys(tree.postorder()), vec![1, 6, 4, 12, 18, 15, 9]);
        assert_eq!(keys(tree.reverse_inorder()), vec![18, 15, 12, 9, 6, 4, 1]);
    }

    #[test]
    fn test_levels() {
        let tree = sample();
        let levels: Vec<Vec<Key>> = tree
            .levels()
            .map(|level| level.into_iter().map(Node::key).collect())
            .collect();
        assert_eq!(levels, vec![vec![9], vec![4, 15], vec![1, 6, 12, 18]]);
    }

    #[test]
    fn test_recompute_index_from_path() {
        let tree = sample();
        for node in tree.preorder() {
            let path = tree.path_to(node.key()).expect("key is present");
            assert_eq!(path.array_index(), node.index());
            assert_eq!(path.resolve(tree.root()).map(Node::key), Some(node.key()));
        }
    }

    #[test]
    fn test_path_steps_and_parent() {
        let tree = sample();
        let path = tree.path_to(12).expect("12 is present");
        assert_eq!(path.steps(), &[Direction::Right, Direction::Left]);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.array_index(), 5);

        let parent = path.parent().expect("12 is not the root");
        assert_eq!(parent.resolve(tree.root()).map(Node::key), Some(15));
        assert!(Path::root().parent().is_none());
        assert!(tree.path_to(99).is_none());
    }

    #[test]
    fn test_empty_traversals() {
        let tree: Tree<()> = Tree::new();
        assert_eq!(tree.preorder().count(), 0);
        assert_eq!(tree.inorder().count(), 0);
        assert_eq!(tree.postorder().count(), 0);
        assert_eq!(tree.levels().count(), 0);
    }
}
