//! Shared helpers for integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bintree::{Key, Node, Tree};

/// Tree with unit payloads, keys inserted in the given order
pub fn build(keys: &[Key]) -> Tree<()> {
    keys.iter().map(|&key| (key, ())).collect()
}

/// Tree whose payload records each key's insertion position
pub fn build_tagged(keys: &[Key]) -> Tree<usize> {
    keys.iter().enumerate().map(|(pos, &key)| (key, pos)).collect()
}

/// The 7-node tree used across the scenarios
pub fn sample() -> Tree<()> {
    build(&[9, 4, 15, 1, 6, 12, 18])
}

pub fn inorder_keys<P>(tree: &Tree<P>) -> Vec<Key> {
    tree.inorder().map(Node::key).collect()
}

pub fn preorder_keys<P>(tree: &Tree<P>) -> Vec<Key> {
    tree.preorder().map(Node::key).collect()
}

/// Key -> duplicate count
pub fn multiset<P>(tree: &Tree<P>) -> BTreeMap<Key, usize> {
    tree.preorder()
        .map(|node| (node.key(), node.duplicate_count()))
        .collect()
}

/// Key -> count of a plain key list
pub fn count_keys(keys: &[Key]) -> BTreeMap<Key, usize> {
    let mut counts = BTreeMap::new();
    for &key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

const UPDATE_VAR: &str = "BINTREE_UPDATE_SNAPSHOTS";

fn snapshot_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots")
        .join(name)
}

/// Layout lines are column padded; trailing blanks carry no meaning
fn layout_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim_end).collect()
}

/// Compare printer output with `tests/snapshots/<name>`
///
/// Setting `BINTREE_UPDATE_SNAPSHOTS` rewrites the file instead.
pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_path(name);
    if env::var_os(UPDATE_VAR).is_some() {
        fs::write(&path, actual).unwrap_or_else(|err| panic!("write {}: {err}", path.display()));
        return;
    }

    let stored = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("read {}: {err} (run with {UPDATE_VAR}=1)", path.display()));
    let (expected, actual) = (layout_lines(&stored), layout_lines(actual));
    let first_diff = (0..expected.len().max(actual.len()))
        .find(|&line| expected.get(line) != actual.get(line));
    if let Some(line) = first_diff {
        panic!(
            "{name} differs at line {}\n  stored: {:?}\n  actual: {:?}\nrun with {UPDATE_VAR}=1 to accept",
            line + 1,
            expected.get(line),
            actual.get(line)
        );
    }
}
