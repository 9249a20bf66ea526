use super::sweep::breakpoint;
use super::*;
use crate::geom::{cross, distance};
use crate::test_support::{brute_nearest, lattice_points, random_points};
use nalgebra::vector;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

fn close(a: Point, b: Point) -> bool {
    distance(a, b) < 1e-9
}

fn parallel(u: nalgebra::Vector2<f64>, v: nalgebra::Vector2<f64>) -> bool {
    cross(u, v).abs() <= 1e-12 * u.norm() * v.norm() && u.dot(&v) > 0.0
}

/// A point that lies on the border's edge.
fn sample_on(b: &Border) -> Point {
    let e = b.edge;
    match (e.start, e.end) {
        (Some(s), Some(t)) => s.midpoint(t),
        (Some(s), None) => s + e.direction,
        (None, Some(t)) => t - e.direction,
        (None, None) => e.origin,
    }
}

/// Every border lies on its bisector, keeps its left site on the left, and
/// no other site is closer.
fn assert_borders_valid(sites: &[Point], d: &VoronoiDiagram) {
    for b in d.borders() {
        let (a, c) = (sites[b.pair.0], sites[b.pair.1]);
        assert!(b.pair.0 < b.pair.1);
        let p = sample_on(b);
        let (da, dc) = (distance(p, a), distance(p, c));
        let scale = da.max(1.0);
        assert!((da - dc).abs() <= 1e-7 * scale, "{:?} not on bisector", b.pair);
        for (k, s) in sites.iter().enumerate() {
            if k != b.pair.0 && k != b.pair.1 {
                assert!(distance(p, *s) >= da - 1e-7 * scale, "site {k} beats border {:?}", b.pair);
            }
        }
        assert!(cross(b.edge.direction, a - p) > 0.0, "left site of {:?} not on the left", b.pair);
    }
}

#[test]
fn two_sites_give_one_bisecting_line() {
    let sites = pts(&[(0.0, 0.0), (100.0, 0.0)]);
    let d = build_voronoi_diagram(&sites).unwrap();
    assert_eq!(d.borders().len(), 1);
    let b = d.borders()[0];
    assert_eq!(b.pair, (0, 1));
    assert_eq!(b.edge.start, None);
    assert_eq!(b.edge.end, None);
    assert_eq!(b.edge.origin, Point::new(50.0, 0.0));
    assert!(parallel(b.edge.direction, vector![0.0, 100.0]));
    assert!(d.vertices().is_empty());
}

#[test]
fn three_sites_meet_at_the_circumcenter() {
    let sites = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)]);
    let d = build_voronoi_diagram(&sites).unwrap();
    let v = Point::new(50.0, 50.0);
    let pairs: Vec<_> = d.borders().iter().map(|b| b.pair).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);

    let b01 = d.border(1, 0).unwrap().edge;
    assert!(b01.start.is_none() && close(b01.end.unwrap(), v));
    assert!(parallel(b01.direction, vector![0.0, 100.0]));
    let b02 = d.border(0, 2).unwrap().edge;
    assert!(close(b02.start.unwrap(), v) && b02.end.is_none());
    assert!(parallel(b02.direction, vector![-100.0, 100.0]));
    let b12 = d.border(1, 2).unwrap().edge;
    assert!(b12.start.is_none() && close(b12.end.unwrap(), v));
    assert!(parallel(b12.direction, vector![-100.0, 0.0]));
    assert_eq!(d.vertices().len(), 1);
}

#[test]
fn square_gives_four_axis_rays_from_the_center() {
    let sites = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]);
    let d = build_voronoi_diagram(&sites).unwrap();
    let pairs: Vec<_> = d.borders().iter().map(|b| b.pair).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
    let center = Point::new(50.0, 50.0);
    // Outward direction of each ray, away from the center.
    let outward = [
        ((0, 1), vector![0.0, -1.0]),
        ((0, 3), vector![-1.0, 0.0]),
        ((1, 2), vector![1.0, 0.0]),
        ((2, 3), vector![0.0, 1.0]),
    ];
    for (pair, out) in outward {
        let e = d.border(pair.0, pair.1).unwrap().edge;
        assert!(!e.is_bounded());
        let (vertex, leaving) = match (e.start, e.end) {
            (Some(s), None) => (s, e.direction),
            (None, Some(t)) => (t, -e.direction),
            other => panic!("expected a ray, got {other:?}"),
        };
        assert!(close(vertex, center));
        assert!(parallel(leaving, out), "{pair:?} leaves along {leaving:?}");
    }
    assert_eq!(d.vertices().len(), 1);
}

#[test]
fn collinear_sites_give_parallel_lines() {
    let sites = pts(&[(0.0, 0.0), (100.0, 0.0), (200.0, 0.0)]);
    let d = build_voronoi_diagram(&sites).unwrap();
    let pairs: Vec<_> = d.borders().iter().map(|b| b.pair).collect();
    assert_eq!(pairs, vec![(0, 1), (1, 2)]);
    for b in d.borders() {
        assert!(b.edge.start.is_none() && b.edge.end.is_none());
    }
    assert_eq!(d.border(0, 1).unwrap().edge.origin, Point::new(50.0, 0.0));
    assert_eq!(d.border(1, 2).unwrap().edge.origin, Point::new(150.0, 0.0));
    assert!(d.vertices().is_empty());
}

#[test]
fn vertical_column_of_sites_gives_horizontal_lines() {
    let sites = pts(&[(0.0, 200.0), (0.0, 0.0), (0.0, 100.0)]);
    let d = build_voronoi_diagram(&sites).unwrap();
    let pairs: Vec<_> = d.borders().iter().map(|b| b.pair).collect();
    assert_eq!(pairs, vec![(0, 2), (1, 2)]);
    assert_borders_valid(&sites, &d);
}

#[test]
fn staircase_has_a_bounded_segment() {
    let sites = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (200.0, 100.0)]);
    let d = build_voronoi_diagram(&sites).unwrap();
    assert_borders_valid(&sites, &d);
    let mid = d.border(1, 2).unwrap().edge;
    assert!(mid.is_bounded());
    assert_eq!(d.vertices().len(), 2);
}

#[test]
fn tiny_inputs_give_empty_diagrams() {
    assert!(build_voronoi_diagram(&[]).unwrap().is_empty());
    let one = build_voronoi_diagram(&[Point::new(3.0, 4.0)]).unwrap();
    assert!(one.is_empty());
    assert_eq!(one.sites().len(), 1);
    assert!(one.regions().is_empty());
}

#[test]
fn bad_sites_are_rejected() {
    let dup = pts(&[(1.0, 1.0), (2.0, 2.0), (1.0, 1.0)]);
    assert_eq!(
        build_voronoi_diagram(&dup).unwrap_err(),
        VoronoiError::DuplicateSite { first: 0, second: 2 }
    );
    let nan = pts(&[(1.0, 1.0), (f64::NAN, 2.0)]);
    assert_eq!(
        build_voronoi_diagram(&nan).unwrap_err(),
        VoronoiError::NonFiniteSite { index: 1 }
    );
}

#[test]
fn breakpoint_of_a_column_pair_is_the_midpoint() {
    let lo = Point::new(0.0, 0.0);
    let hi = Point::new(0.0, 100.0);
    assert_eq!(breakpoint(lo, hi, 100.0), 50.0);
    // A focus on the sweep pins the breakpoint to its own y.
    assert_eq!(breakpoint(lo, Point::new(100.0, 30.0), 100.0), 30.0);
}

#[test]
fn breakpoints_of_a_split_arc_straddle_the_new_site() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(100.0, 0.0);
    let lower = breakpoint(a, b, 200.0);
    let upper = breakpoint(b, a, 200.0);
    assert!(lower < 0.0 && upper > 0.0);
    assert!((lower + upper).abs() < 1e-9);
    // Both lie on the parabolas: equidistant from focus and sweep line.
    for y in [lower, upper] {
        let x = ((y - a.y).powi(2) + a.x * a.x - 200.0f64.powi(2)) / (2.0 * (a.x - 200.0));
        let p = Point::new(x, y);
        assert!((distance(p, a) - distance(p, b)).abs() < 1e-6);
        assert!((distance(p, a) - (200.0 - x)).abs() < 1e-6);
    }
}

#[test]
fn regions_are_closed_chains_around_their_site() {
    let sites = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (50.0, 40.0)]);
    let d = build_voronoi_diagram(&sites).unwrap();
    let regions = d.regions();
    assert_eq!(regions.len(), sites.len());
    // The middle site is enclosed.
    let inner = &regions[&4];
    assert!(inner.is_bounded());
    let n = inner.edges.len();
    for k in 0..n {
        assert_eq!(inner.edges[k].end, inner.edges[(k + 1) % n].start);
        let v = inner.edges[k].start.unwrap();
        assert!(cross(inner.edges[k].direction, sites[4] - v) > 0.0);
    }
    // Hull sites are unbounded and open at both ends.
    let corner = &regions[&0];
    assert!(!corner.is_bounded());
    assert!(corner.edges.first().unwrap().start.is_none());
    assert!(corner.edges.last().unwrap().end.is_none());
}

/// Region corners, nudged toward their site, must be nearest to that site.
fn assert_regions_nearest(sites: &[Point]) {
    const MAX_STEPS: f64 = 1000.0;
    const NUDGE: f64 = 1e-3;
    let d = build_voronoi_diagram(sites).unwrap();
    for (site, region) in d.regions() {
        let p = sites[site];
        for e in &region.edges {
            let Some(corner) = e.to_bounded_segment(MAX_STEPS).start else {
                unreachable!("bounded segment has a start");
            };
            let q = Point::new(
                p.x * NUDGE + corner.x * (1.0 - NUDGE),
                p.y * NUDGE + corner.y * (1.0 - NUDGE),
            );
            let best = brute_nearest(sites, q);
            assert!(
                distance(q, sites[best]) >= distance(q, p) - 1e-9,
                "corner {corner} of site {site} is nearer to {best}"
            );
        }
    }
}

#[test]
fn random_regions_are_nearest_to_their_site() {
    let mut rng = StdRng::seed_from_u64(2915);
    for i in 0..10 {
        let sites = random_points(5 + i, &mut rng);
        assert_regions_nearest(&sites);
        assert_borders_valid(&sites, &build_voronoi_diagram(&sites).unwrap());
    }
}

#[test]
fn lattice_regions_are_nearest_to_their_site() {
    let mut rng = StdRng::seed_from_u64(2915);
    for i in 0..10 {
        let sites = lattice_points(5 + i, &mut rng);
        assert_regions_nearest(&sites);
        assert_borders_valid(&sites, &build_voronoi_diagram(&sites).unwrap());
    }
}

#[test]
fn full_lattice_snaps_cocircular_vertices() {
    let sites: Vec<Point> = (0..5)
        .flat_map(|i| (0..5).map(move |j| Point::new(i as f64 * 100.0, j as f64 * 100.0)))
        .collect();
    let d = build_voronoi_diagram(&sites).unwrap();
    // 4x4 cell corners, each shared by four sites.
    assert_eq!(d.vertices().len(), 16);
    // Only axis-aligned neighbours share a border.
    assert_eq!(d.borders().len(), 2 * 5 * 4);
    assert_borders_valid(&sites, &d);
}

#[test]
fn larger_random_sets_have_valid_borders() {
    let mut rng = StdRng::seed_from_u64(11);
    let sites = random_points(400, &mut rng);
    let d = build_voronoi_diagram(&sites).unwrap();
    assert_borders_valid(&sites, &d);
    // Planar graph: at most 3n - 6 edges.
    assert!(d.borders().len() <= 3 * sites.len() - 6);
    assert_eq!(d.regions().len(), sites.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn small_random_sets_have_valid_borders(seed in any::<u64>(), n in 2usize..40) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sites = random_points(n, &mut rng);
        let d = build_voronoi_diagram(&sites).unwrap();
        assert_borders_valid(&sites, &d);
        prop_assert_eq!(d.regions().len(), sites.len());
    }
}
