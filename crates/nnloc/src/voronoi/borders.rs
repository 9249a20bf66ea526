//! Border assembly: snap vertices, then turn per-pair ray fragments into
//! segments, rays or lines.

use super::sweep::Swept;
use super::{Border, VoronoiCfg};
use crate::geom::{cross, perp, DirectedEdge, Point};
use nalgebra::Vector2;
use std::collections::BTreeMap;

/// Disjoint-set forest over vertex indices (path halving, union by rank).
struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let up = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = up;
            x = up;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra as usize].cmp(&self.rank[rb as usize]) {
            std::cmp::Ordering::Less => self.parent[ra as usize] = rb,
            std::cmp::Ordering::Greater => self.parent[rb as usize] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb as usize] = ra;
                self.rank[ra as usize] += 1;
            }
        }
    }
}

/// Which bound of its border a vertex provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Start,
    End,
}

/// Representative point for every vertex, merging those within tolerance.
fn snap(sites: &[Point], vertices: &[([usize; 3], Point)], cfg: VoronoiCfg) -> Vec<Point> {
    let scale = sites
        .iter()
        .fold(1.0f64, |m, p| m.max(p.x.abs()).max(p.y.abs()));
    let tol = cfg.snap_rel_eps * scale;

    let n = vertices.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| vertices[i].1.x.total_cmp(&vertices[j].1.x));
    let mut uf = UnionFind::new(n);
    for (k, &i) in order.iter().enumerate() {
        let pi = vertices[i].1;
        for &j in &order[k + 1..] {
            let pj = vertices[j].1;
            if pj.x - pi.x > tol {
                break;
            }
            if (pj - pi).norm() <= tol {
                uf.union(i as u32, j as u32);
            }
        }
    }
    (0..n)
        .map(|i| vertices[uf.find(i as u32) as usize].1)
        .collect()
}

/// Borders sorted by pair, plus the distinct snapped vertices.
pub(super) fn extract(sites: &[Point], swept: &Swept, cfg: VoronoiCfg) -> (Vec<Border>, Vec<Point>) {
    if swept.vertices.is_empty() {
        return (lines(sites, &swept.hull_pairs), Vec::new());
    }

    let snapped = snap(sites, &swept.vertices, cfg);
    let mut distinct: Vec<Point> = Vec::new();
    let mut fragments: BTreeMap<(usize, usize), Vec<(Point, Role)>> = BTreeMap::new();
    for (&(triple, _), &at) in swept.vertices.iter().zip(&snapped) {
        if !distinct.contains(&at) {
            distinct.push(at);
        }
        let [i, j, k] = triple;
        for (a, b, third) in [(i, j, k), (i, k, j), (j, k, i)] {
            let along = sites[b] - sites[a];
            // The third site is on the left of a→b: the border leaves the
            // vertex along -perp, so the vertex is where it ends.
            let role = if cross(along, sites[third] - sites[a]) > 0.0 {
                Role::End
            } else {
                Role::Start
            };
            let entry = fragments.entry((a, b)).or_default();
            if !entry.contains(&(at, role)) {
                entry.push((at, role));
            }
        }
    }

    let mut borders = Vec::with_capacity(fragments.len());
    for (pair, frags) in fragments {
        let dir = perp(sites[pair.1] - sites[pair.0]);
        if let Some(edge) = assemble(&frags, dir) {
            borders.push(Border { pair, edge });
        } else {
            tracing::trace!(?pair, "zero-length border dropped");
        }
    }
    (borders, distinct)
}

/// One border from the fragments its vertices contributed.
fn assemble(frags: &[(Point, Role)], dir: Vector2<f64>) -> Option<DirectedEdge> {
    // A point seen in both roles is a zero-length junction of a cocircular
    // group, not a bound.
    let mut ends: Vec<(Point, Role)> = frags
        .iter()
        .copied()
        .filter(|&(p, r)| !frags.iter().any(|&(q, s)| q == p && s != r))
        .collect();
    match ends.len() {
        0 => None,
        1 => {
            let (p, role) = ends[0];
            Some(match role {
                Role::Start => DirectedEdge::ray(p, dir),
                Role::End => DirectedEdge::ray_to(dir, p),
            })
        }
        n => {
            if n > 2 {
                tracing::warn!(endpoints = n, "border has more than two endpoints; keeping extremes");
            }
            ends.sort_by(|u, v| u.0.to_vec().dot(&dir).total_cmp(&v.0.to_vec().dot(&dir)));
            let (start, end) = (ends[0].0, ends[n - 1].0);
            Some(DirectedEdge::segment(start, end))
        }
    }
}

/// Vertex-free diagrams (two sites, or all collinear): one full line per
/// distinct pair of beachline neighbours.
fn lines(sites: &[Point], hull_pairs: &[(usize, usize)]) -> Vec<Border> {
    let mut pairs: Vec<(usize, usize)> = hull_pairs
        .iter()
        .map(|&(a, b)| (a.min(b), a.max(b)))
        .collect();
    pairs.sort_unstable();
    pairs.dedup();
    pairs
        .into_iter()
        .map(|(a, b)| Border {
            pair: (a, b),
            edge: DirectedEdge::line(sites[a].midpoint(sites[b]), perp(sites[b] - sites[a])),
        })
        .collect()
}
