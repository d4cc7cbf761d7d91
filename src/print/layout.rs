//! Level-by-level tree layout
//!
//! The first six levels are drawn like a textbook tree: each node sits at a
//! fixed column looked up by its array index. Deeper levels fall back to a
//! compact line with one space between nodes.

use std::fmt::{self, Write};

use crate::tree::{Node, Tree};

/// Levels drawn with fixed columns
pub const LAID_OUT_LEVELS: usize = 6;

/// Column of each array index for the first six levels (indices 0..63)
const COLUMNS: [usize; (1 << LAID_OUT_LEVELS) - 1] = [
    84, // 0, root
    41, 131, // 1
    19, 62, 112, 152, // 3
    9, 31, 53, 75, 97, 119, 141, 163, // 7
    3, 14, 25, 36, 47, 58, 69, 80, 91, 102, 113, 124, 135, 146, 157, 168, // 15
    0, 5, 11, 16, 22, 27, 33, 38, 44, 49, 55, 60, 66, 71, 77, 82, // 31
    88, 93, 99, 104, 110, 115, 121, 126, 132, 137, 143, 148, 154, 159, 165, 170,
];

/// Column for an array index, `None` past the laid-out levels
pub fn column(index: u64) -> Option<usize> {
    usize::try_from(index)
        .ok()
        .and_then(|index| COLUMNS.get(index).copied())
}

/// Node label used in the layout: key zero-padded to two digits
pub fn label<P>(node: &Node<P>) -> String {
    format!("({:02})", node.key())
}

/// Write one level line (no trailing newline)
fn write_level<P, W: Write>(out: &mut W, level: &[&Node<P>]) -> fmt::Result {
    let mut xpos = 0;
    for node in level {
        match column(node.index()) {
            Some(target) => {
                let pad = target.saturating_sub(xpos);
                write!(out, "{:pad$}", "")?;
                xpos += pad;
            }
            None => {
                out.write_char(' ')?;
                xpos += 1;
            }
        }
        let label = label(node);
        out.write_str(&label)?;
        xpos += label.len();
    }
    Ok(())
}

/// Write every level of the tree, each followed by two blank lines
pub fn write_levels<P, W: Write>(out: &mut W, tree: &Tree<P>) -> fmt::Result {
    for level in tree.levels() {
        write_level(out, &level)?;
        out.write_str("\n\n\n")?;
    }
    Ok(())
}

/// Render the level layout into a string
pub fn render_levels<P>(tree: &Tree<P>) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_levels(&mut out, tree);
    out
}
