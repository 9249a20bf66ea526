//! Criterion benches for `PointIndex`: build cost, and query cost against a
//! linear scan over the anchors.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nnloc::geom::distance;
use nnloc::{Point, PointIndex};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn uniform(n: usize, rng: &mut StdRng) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
        .collect()
}

fn linear_scan(anchors: &[Point], q: Point) -> usize {
    let mut best = 0;
    for (i, a) in anchors.iter().enumerate() {
        if distance(q, *a) < distance(q, anchors[best]) {
            best = i;
        }
    }
    best
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");
    for n in [100usize, 1_000, 10_000] {
        group.bench_function(BenchmarkId::new("uniform", n), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(3);
                    (uniform(n, &mut rng), rng)
                },
                |(anchors, mut rng)| PointIndex::build(&anchors, &mut rng),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_query");
    for n in [100usize, 10_000] {
        let mut rng = StdRng::seed_from_u64(4);
        let anchors = uniform(n, &mut rng);
        let Ok(index) = PointIndex::build(&anchors, &mut rng) else {
            continue;
        };
        group.bench_function(BenchmarkId::new("point_location", n), |b| {
            b.iter_batched(
                || Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)),
                |q| index.nearest_index(q),
                BatchSize::SmallInput,
            )
        });
        group.bench_function(BenchmarkId::new("linear_scan", n), |b| {
            b.iter_batched(
                || Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)),
                |q| linear_scan(&anchors, q),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
