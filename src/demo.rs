//! Seeded demo harness
//!
//! Builds a tree of random keys and reports on it: height, level layout,
//! a search of every key in range, and sorted traversals.

use std::fmt::{self, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::print::{write_levels, write_traversal, NodeStyle, Order};
use crate::tree::{Key, Tree};
use crate::TreeError;

/// Default number of keys; small enough for the level layout to stay readable
pub const DEFAULT_SIZE: usize = 18;

/// Largest accepted demo size
pub const MAX_SIZE: usize = 1 << 20;

const GREEN: &str = "\x1b[1;32m";
const RED: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

/// Parameters for a demo run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Number of insertions; keys are drawn from `0..size`
    pub size: usize,

    /// RNG seed, `None` for entropy
    pub seed: Option<u64>,

    /// Print verbose node details
    pub verbose: bool,

    /// Colour Found / Not Found markers
    pub color: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            verbose: false,
            color: true,
        }
    }
}

impl DemoConfig {
    /// Reject sizes outside `1..=MAX_SIZE`
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(TreeError::InvalidSize {
                size: self.size,
                max: MAX_SIZE,
            });
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Outcome of searching one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Key searched for
    pub key: Key,
    /// `(duplicate count, array index)` when found
    pub found: Option<(usize, u64)>,
}

/// Build the demo tree
///
/// The root is seeded with the middle key so the tree starts out roughly
/// balanced; the remaining `size - 1` keys are random in `0..size`.
pub fn seeded_tree(config: &DemoConfig) -> Result<Tree<()>, TreeError> {
    config.validate()?;
    let mut rng = config.rng();
    let upper = config.size as Key;

    let mut tree = Tree::new();
    tree.insert(upper / 2, ());
    for _ in 1..config.size {
        tree.insert(rng.gen_range(0..upper), ());
    }
    debug!(
        size = config.size,
        nodes = tree.node_count(),
        height = tree.height(),
        "seeded demo tree"
    );
    Ok(tree)
}

/// Look up every key in `0..size`
pub fn search_all<P>(tree: &Tree<P>, size: usize) -> Vec<SearchResult> {
    (0..size as Key)
        .map(|key| SearchResult {
            key,
            found: tree
                .find(key)
                .map(|node| (node.duplicate_count(), node.index())),
        })
        .collect()
}

/// Parse a comma or whitespace separated key list
pub fn parse_keys(input: &str) -> Result<Vec<Key>, TreeError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<Key>()
                .map_err(|_| TreeError::InvalidKey(token.to_string()))
        })
        .collect()
}

/// Write the full demo report for `tree`
pub fn write_report<P, W: Write>(
    out: &mut W,
    tree: &Tree<P>,
    config: &DemoConfig,
    program: &str,
) -> fmt::Result {
    let style = if config.verbose {
        NodeStyle::Verbose
    } else {
        NodeStyle::Compact
    };
    let (green, red, reset) = if config.color {
        (GREEN, RED, RESET)
    } else {
        ("", "", "")
    };

    writeln!(out, "tree is {} levels high", tree.height())?;
    writeln!(out, "{program} : Print by Level Traversal:")?;
    write_levels(out, tree)?;
    writeln!(out)?;

    writeln!(out, "{program} : test our tree by searching for some values...\n")?;
    for result in search_all(tree, config.size) {
        match result.found {
            Some((count, index)) => writeln!(
                out,
                "{program} : searching for node ({:02})... {green}Found!{reset} \tkey = {:02}, count = {count}, index = {index}",
                result.key, result.key
            )?,
            None => writeln!(
                out,
                "{program} : searching for node ({:02})... {red}Not Found!{reset}",
                result.key
            )?,
        }
    }
    writeln!(out)?;

    for (title, order) in [
        ("Inorder Traversal", Order::Inorder),
        ("Reverse Inorder Traversal", Order::ReverseInorder),
    ] {
        writeln!(out, "{program} : {title}:")?;
        write_traversal(out, tree, order, style)?;
        writeln!(out, "\n")?;
    }
    Ok(())
}

/// Render the demo report into a string
pub fn render_report<P>(tree: &Tree<P>, config: &DemoConfig, program: &str) -> String {
    let mut out = String::new();
    let _ = write_report(&mut out, tree, config, program);
    out
}
