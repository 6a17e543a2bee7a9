//! Mining throughput benchmarks
//!
//! Measures the level-wise search and rule derivation over synthetic basket
//! collections at several scales, plus the parallel support-counting
//! speedup.

use canasta::basket::Basket;
use canasta::{miner, rules};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Synthetic baskets over a small item universe; a fixed seed keeps runs
/// comparable
fn synthetic_baskets(count: usize, universe: usize, density: f64) -> Vec<Basket> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            (0..universe)
                .filter(|_| rng.gen_bool(density))
                .map(|i| format!("attr{} / v", i))
                .collect()
        })
        .collect()
}

fn bench_mine(c: &mut Criterion) {
    let mut group = c.benchmark_group("mine");
    for &count in &[100usize, 1_000, 5_000] {
        let baskets = synthetic_baskets(count, 12, 0.4);
        group.bench_with_input(BenchmarkId::from_parameter(count), &baskets, |b, baskets| {
            b.iter(|| {
                let frequent = miner::mine(black_box(baskets), 0.2, 1).unwrap();
                black_box(frequent);
            });
        });
    }
    group.finish();
}

fn bench_mine_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("mine_parallel");
    let baskets = synthetic_baskets(5_000, 12, 0.4);
    for &threads in &[1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let frequent = miner::mine(black_box(&baskets), 0.2, threads).unwrap();
                    black_box(frequent);
                });
            },
        );
    }
    group.finish();
}

fn bench_derive_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_rules");
    let baskets = synthetic_baskets(1_000, 12, 0.5);
    let frequent = miner::mine(&baskets, 0.15, 1).unwrap();
    group.bench_function("frequent_set", |b| {
        b.iter(|| {
            let derived = rules::derive_rules(black_box(&frequent), 0.5).unwrap();
            black_box(derived);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_mine, bench_mine_parallel, bench_derive_rules);
criterion_main!(benches);
