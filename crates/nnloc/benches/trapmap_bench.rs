//! Criterion benches for trapezoidal map construction and lookup.
//!
//! Shuffled versus row-sorted insertion of disjoint grid segments shows the
//! effect of insertion order on build time.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nnloc::trapmap::{RegionId, TrapezoidalMap};
use nnloc::{DirectedEdge, Point};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// One segment per 10×10 grid cell, row by row.
fn grid_segments(n: usize, rng: &mut StdRng) -> Vec<DirectedEdge> {
    let side = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|k| {
            let (cx, cy) = ((k % side) as f64 * 10.0, (k / side) as f64 * 10.0);
            let a = Point::new(cx + rng.gen_range(1.0..9.0), cy + rng.gen_range(1.0..9.0));
            let b = Point::new(cx + rng.gen_range(1.0..9.0), cy + rng.gen_range(1.0..9.0));
            DirectedEdge::segment(a, b)
        })
        .collect()
}

fn build(segs: &[DirectedEdge], rng: &mut StdRng) -> TrapezoidalMap {
    let mut map = TrapezoidalMap::new(rng);
    for s in segs {
        let _ = map.insert_edge(s, RegionId(0), RegionId(1));
    }
    map
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("trapmap_build");
    for n in [500usize, 2_000] {
        group.bench_function(BenchmarkId::new("shuffled", n), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(7);
                    let mut segs = grid_segments(n, &mut rng);
                    segs.shuffle(&mut rng);
                    (segs, rng)
                },
                |(segs, mut rng)| build(&segs, &mut rng),
                BatchSize::LargeInput,
            )
        });
        group.bench_function(BenchmarkId::new("row_sorted", n), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(7);
                    (grid_segments(n, &mut rng), rng)
                },
                |(segs, mut rng)| build(&segs, &mut rng),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(8);
    let mut segs = grid_segments(2_000, &mut rng);
    segs.shuffle(&mut rng);
    let map = build(&segs, &mut rng);
    c.bench_function("trapmap_find_region", |b| {
        b.iter_batched(
            || Point::new(rng.gen_range(0.0..450.0), rng.gen_range(0.0..450.0)),
            |p| map.find_region(p),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_build, bench_find);
criterion_main!(benches);
