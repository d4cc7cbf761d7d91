//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use bintree::{PivotStrategy, Tree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZE: usize = 10_000;

fn random_keys(seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..SIZE).map(|_| rng.gen_range(0..SIZE as i64 * 4)).collect()
}

fn build(keys: &[i64]) -> Tree<()> {
    keys.iter().map(|&key| (key, ())).collect()
}

fn benchmark_insert_find(c: &mut Criterion) {
    let keys = random_keys(1);

    c.bench_function("insert_random_10k", |b| {
        b.iter(|| black_box(build(&keys)));
    });

    let tree = build(&keys);
    c.bench_function("find_random_10k", |b| {
        b.iter(|| {
            for &key in &keys {
                black_box(tree.find(key));
            }
        });
    });
}

fn benchmark_delete(c: &mut Criterion) {
    let keys = random_keys(2);

    c.bench_function("delete_100_of_10k", |b| {
        b.iter_batched(
            || build(&keys),
            |mut tree| {
                for &key in keys.iter().take(100) {
                    black_box(tree.delete(key));
                }
                tree
            },
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_rebalance(c: &mut Criterion) {
    let keys = random_keys(3);

    for (name, strategy) in [
        ("rebalance_preorder_10k", PivotStrategy::Preorder),
        ("rebalance_median_10k", PivotStrategy::SortedMedian),
    ] {
        c.bench_function(name, |b| {
            b.iter_batched(
                || build(&keys),
                |mut tree| {
                    tree.rebalance_with(strategy);
                    tree
                },
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(benches, benchmark_insert_find, benchmark_delete, benchmark_rebalance);
criterion_main!(benches);
