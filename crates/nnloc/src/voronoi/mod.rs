//! Voronoi diagrams by Fortune's sweep.
//!
//! Purpose
//! - Turn a set of distinct sites into the set of borders between
//!   neighbouring cells. Each border is a piece of the perpendicular bisector
//!   of its two sites: a segment, a ray, or (for collinear input) a full line.
//!
//! Model
//! - The sweep line moves in +x. Arcs on the beachline are ordered by y.
//! - Exact coincidences (shared x, shared y, collinear triples, cocircular
//!   groups) are settled by tie-breaks in event order and interval lookup;
//!   input coordinates are never perturbed.
//! - Circumcenters of cocircular groups are snapped together before border
//!   extraction (see `VoronoiCfg::snap_rel_eps`).
//!
//! References
//! - Code cross-refs: `sweep::run`, `borders::extract`, `regions::chain`

mod beachline;
mod borders;
mod regions;
mod sweep;

pub use regions::Region;

use crate::geom::{DirectedEdge, Point};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Border-extraction tolerances.
#[derive(Clone, Copy, Debug)]
pub struct VoronoiCfg {
    /// Vertices closer than `snap_rel_eps * max(1, max |coord|)` are merged.
    pub snap_rel_eps: f64,
}

impl Default for VoronoiCfg {
    fn default() -> Self {
        Self { snap_rel_eps: 1e-9 }
    }
}

/// Rejected builder input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VoronoiError {
    NonFiniteSite { index: usize },
    DuplicateSite { first: usize, second: usize },
}

impl fmt::Display for VoronoiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteSite { index } => write!(f, "site {index} has a non-finite coordinate"),
            Self::DuplicateSite { first, second } => {
                write!(f, "sites {first} and {second} coincide")
            }
        }
    }
}

impl std::error::Error for VoronoiError {}

/// Shared boundary of the cells of `pair.0` and `pair.1` (`pair.0 < pair.1`).
///
/// `edge` runs along `perp(site[pair.1] - site[pair.0])`, which puts
/// `pair.0` on its left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub pair: (usize, usize),
    pub edge: DirectedEdge,
}

impl Border {
    #[inline]
    pub fn left_site(&self) -> usize {
        self.pair.0
    }
    #[inline]
    pub fn right_site(&self) -> usize {
        self.pair.1
    }
}

/// Borders of a Voronoi diagram, sorted by site pair.
#[derive(Clone, Debug, Default)]
pub struct VoronoiDiagram {
    sites: Vec<Point>,
    borders: Vec<Border>,
    vertices: Vec<Point>,
}

impl VoronoiDiagram {
    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    /// Distinct Voronoi vertices after snapping.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.borders.is_empty()
    }

    /// Border between sites `a` and `b`, in either order.
    pub fn border(&self, a: usize, b: usize) -> Option<&Border> {
        let key = (a.min(b), a.max(b));
        self.borders
            .binary_search_by(|br| br.pair.cmp(&key))
            .ok()
            .map(|i| &self.borders[i])
    }

    /// Cell boundary of every site that has at least one border.
    pub fn regions(&self) -> BTreeMap<usize, Region> {
        regions::chain(&self.borders)
    }
}

/// Build the diagram of `points` with default tolerances.
pub fn build_voronoi_diagram(points: &[Point]) -> Result<VoronoiDiagram, VoronoiError> {
    build_voronoi_diagram_with(points, VoronoiCfg::default())
}

/// Build the diagram of `points`.
///
/// Fewer than two sites give an empty diagram. Sites must be finite and
/// pairwise distinct.
pub fn build_voronoi_diagram_with(
    points: &[Point],
    cfg: VoronoiCfg,
) -> Result<VoronoiDiagram, VoronoiError> {
    let mut seen: HashMap<Point, usize> = HashMap::with_capacity(points.len());
    for (index, &p) in points.iter().enumerate() {
        if !p.is_finite() {
            return Err(VoronoiError::NonFiniteSite { index });
        }
        if let Some(&first) = seen.get(&p) {
            return Err(VoronoiError::DuplicateSite {
                first,
                second: index,
            });
        }
        seen.insert(p, index);
    }
    if points.len() < 2 {
        return Ok(VoronoiDiagram {
            sites: points.to_vec(),
            ..Default::default()
        });
    }

    let swept = sweep::run(points);
    let (borders, vertices) = borders::extract(points, &swept, cfg);
    tracing::debug!(
        sites = points.len(),
        vertices = vertices.len(),
        borders = borders.len(),
        "voronoi diagram built"
    );
    Ok(VoronoiDiagram {
        sites: points.to_vec(),
        borders,
        vertices,
    })
}

#[cfg(test)]
mod tests;
