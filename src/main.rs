use std::fmt::Write;
use std::io;

use anyhow::{Context, Result};
use bintree::demo::{self, DemoConfig, DEFAULT_SIZE};
use bintree::print::{write_io, write_levels, write_traversal, NodeStyle, Order};
use bintree::{PivotStrategy, Tree, TreeConfig};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

const PROGRAM: &str = "bintree";

#[derive(Parser, Debug)]
#[command(name = "bintree", about = "Exercise a keyed binary search tree")]
struct Cli {
    /// Log tree mutations (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a tree of random keys, then print and search it.
    Demo {
        /// Number of insertions; keys are drawn from 0..size.
        #[arg(short, long, default_value_t = DEFAULT_SIZE)]
        size: usize,
        /// Seed for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,
        /// Disable ANSI colours.
        #[arg(long)]
        no_color: bool,
    },
    /// Build a tree from explicit keys, optionally delete and rebalance.
    Keys {
        /// Keys to insert, comma or space separated (e.g. "9,4,15,1").
        keys: String,
        /// Keys to delete after building (repeatable).
        #[arg(short, long, allow_negative_numbers = true)]
        delete: Vec<i64>,
        /// Rebalance after the deletions.
        #[arg(short, long)]
        rebalance: bool,
        /// Pivot used by --rebalance.
        #[arg(long, value_enum, default_value_t = Pivot::Preorder)]
        pivot: Pivot,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Pivot {
    /// Middle element of the preorder flattening.
    Preorder,
    /// Key median, yields minimum height.
    Median,
}

impl From<Pivot> for PivotStrategy {
    fn from(pivot: Pivot) -> Self {
        match pivot {
            Pivot::Preorder => PivotStrategy::Preorder,
            Pivot::Median => PivotStrategy::SortedMedian,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Demo {
            size,
            seed,
            no_color,
        } => run_demo(DemoConfig {
            size,
            seed,
            verbose: cli.verbose,
            color: !no_color,
        })?,
        Commands::Keys {
            keys,
            delete,
            rebalance,
            pivot,
        } => run_keys(&keys, &delete, rebalance, pivot, cli.verbose)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_demo(config: DemoConfig) -> Result<()> {
    let tree = demo::seeded_tree(&config).context("failed to build demo tree")?;
    write_io(io::stdout().lock(), |out| {
        demo::write_report(out, &tree, &config, PROGRAM)
    })
    .context("failed to write report")?;
    Ok(())
}

fn run_keys(keys: &str, delete: &[i64], rebalance: bool, pivot: Pivot, verbose: bool) -> Result<()> {
    let keys = demo::parse_keys(keys).with_context(|| format!("failed to parse key list {keys:?}"))?;
    let mut tree: Tree<()> = Tree::with_config(TreeConfig {
        pivot: pivot.into(),
    });
    tree.extend(keys.into_iter().map(|key| (key, ())));

    let deleted: Vec<(i64, bool)> = delete.iter().map(|&key| (key, tree.delete(key))).collect();
    if rebalance {
        tree.rebalance();
    }
    tree.check_invariants().context("tree invariants violated")?;

    let stats = tree.stats();
    let style = if verbose {
        NodeStyle::Verbose
    } else {
        NodeStyle::Compact
    };
    write_io(io::stdout().lock(), |out| {
        for &(key, found) in &deleted {
            if found {
                writeln!(out, "{PROGRAM} : deleted ({key})")?;
            } else {
                writeln!(out, "{PROGRAM} : ({key}) not found, nothing deleted")?;
            }
        }
        writeln!(
            out,
            "tree is {} levels high ({} nodes, {} entries, minimum height {})",
            stats.height,
            stats.nodes,
            stats.entries,
            stats.min_height()
        )?;
        write_levels(out, &tree)?;
        for (title, order) in [
            ("Preorder Traversal", Order::Preorder),
            ("Inorder Traversal", Order::Inorder),
        ] {
            writeln!(out, "{PROGRAM} : {title}:")?;
            write_traversal(out, &tree, order, style)?;
            writeln!(out, "\n")?;
        }
        Ok(())
    })
    .context("failed to write tree")?;

    Ok(())
}
