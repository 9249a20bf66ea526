//! Point generators and a brute-force oracle shared by unit tests.

use crate::geom::{distance, Point};
use rand::Rng;
use std::collections::HashSet;

/// `n` points uniform in `[0, 1000)²`.
pub(crate) fn random_points<R: Rng>(n: usize, rng: &mut R) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.gen::<f64>() * 1000.0, rng.gen::<f64>() * 1000.0))
        .collect()
}

/// Up to `n` distinct points on the 100-spaced lattice in `[0, 900]²`.
pub(crate) fn lattice_points<R: Rng>(n: usize, rng: &mut R) -> Vec<Point> {
    let mut seen = HashSet::new();
    (0..n)
        .map(|_| {
            Point::new(
                (rng.gen_range(0..10) * 100) as f64,
                (rng.gen_range(0..10) * 100) as f64,
            )
        })
        .filter(|p| seen.insert(*p))
        .collect()
}

/// Index of the point closest to `q` (first one on ties).
pub(crate) fn brute_nearest(points: &[Point], q: Point) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate() {
        if distance(q, *p) < distance(q, points[best]) {
            best = i;
        }
    }
    best
}
