//! Build a point index over random anchors and compare it with a linear scan.
//!
//! Run with `cargo run -p nnloc --example nearest_demo --release`.

use std::time::Instant;

use nnloc::geom::distance;
use nnloc::{Point, PointIndex};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() {
    let mut rng = StdRng::seed_from_u64(2024);
    let n = 20_000;
    let anchors: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
        .collect();

    let t = Instant::now();
    let index = match PointIndex::build(&anchors, &mut rng) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("build failed: {e}");
            return;
        }
    };
    let build_ms = t.elapsed().as_secs_f64() * 1e3;

    let queries: Vec<Point> = (0..10_000)
        .map(|_| Point::new(rng.gen_range(-100.0..1100.0), rng.gen_range(-100.0..1100.0)))
        .collect();

    let t = Instant::now();
    let fast: Vec<usize> = queries.iter().map(|&q| index.nearest_index(q)).collect();
    let query_ms = t.elapsed().as_secs_f64() * 1e3;

    let t = Instant::now();
    let mut mismatches = 0;
    for (q, &i) in queries.iter().zip(&fast) {
        let best = anchors
            .iter()
            .map(|a| distance(*q, *a))
            .fold(f64::INFINITY, f64::min);
        if distance(*q, anchors[i]) > best + 1e-9 {
            mismatches += 1;
        }
    }
    let scan_ms = t.elapsed().as_secs_f64() * 1e3;

    println!(
        "anchors={n} borders={} build={build_ms:.1}ms",
        index.diagram().borders().len()
    );
    println!(
        "queries={} located={query_ms:.1}ms linear_scan={scan_ms:.1}ms mismatches={mismatches}",
        queries.len()
    );
}
