//! Nearest-anchor queries by point location in the Voronoi diagram.
//!
//! Purpose
//! - `PointIndex` answers "which anchor is closest to `p`?" in expected
//!   O(log n) after expected O(n log n) preprocessing.
//!
//! Model
//! - Build the Voronoi diagram of the distinct anchors, shuffle its borders,
//!   and insert each into a trapezoidal map tagged with the sites on its
//!   left and right. A query is a single `find_region`.
//! - Duplicate anchors collapse onto their first occurrence.
//! - The caller's generator is forked twice: one child draws the map shear,
//!   the other shuffles the borders.
//!
//! References
//! - Code cross-refs: `voronoi::build_voronoi_diagram_with`,
//!   `trapmap::TrapezoidalMap::insert_edge`, `rng::fork`

use crate::geom::Point;
use crate::rng;
use crate::trapmap::{MapCfg, MapError, RegionId, TrapezoidalMap};
use crate::voronoi::{build_voronoi_diagram_with, VoronoiCfg, VoronoiDiagram, VoronoiError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Index construction parameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexCfg {
    pub voronoi: VoronoiCfg,
    pub map: MapCfg,
}

#[derive(Clone, Debug, PartialEq)]
pub enum IndexError {
    InvalidInput { reason: &'static str },
    Voronoi(VoronoiError),
    Map(MapError),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "invalid anchors: {reason}"),
            Self::Voronoi(e) => write!(f, "voronoi construction failed: {e}"),
            Self::Map(e) => write!(f, "trapezoidal map construction failed: {e}"),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput { .. } => None,
            Self::Voronoi(e) => Some(e),
            Self::Map(e) => Some(e),
        }
    }
}

impl From<VoronoiError> for IndexError {
    fn from(e: VoronoiError) -> Self {
        Self::Voronoi(e)
    }
}

impl From<MapError> for IndexError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}

/// Planar nearest-anchor index.
#[derive(Clone, Debug)]
pub struct PointIndex {
    anchors: Vec<Point>,
    /// Caller index of each diagram site.
    kept: Vec<usize>,
    diagram: VoronoiDiagram,
    map: TrapezoidalMap,
}

impl PointIndex {
    pub fn build<R: Rng + ?Sized>(points: &[Point], rng: &mut R) -> Result<Self, IndexError> {
        Self::build_with(points, rng, IndexCfg::default())
    }

    /// Fails on an empty or non-finite anchor set.
    ///
    /// Circumcenters and breakpoints square coordinate differences, so
    /// anchors must stay well below `1e150` in magnitude; beyond that the
    /// diagram overflows and the build reports a degenerate edge.
    pub fn build_with<R: Rng + ?Sized>(
        points: &[Point],
        rng: &mut R,
        cfg: IndexCfg,
    ) -> Result<Self, IndexError> {
        if points.is_empty() {
            return Err(IndexError::InvalidInput { reason: "no anchors" });
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(IndexError::InvalidInput {
                reason: "anchor coordinates must be finite",
            });
        }
        let mut seen = HashSet::with_capacity(points.len());
        let (kept, sites): (Vec<usize>, Vec<Point>) = points
            .iter()
            .enumerate()
            .filter(|(_, p)| seen.insert(**p))
            .map(|(i, p)| (i, *p))
            .unzip();

        let mut shear_rng = rng::fork(rng);
        let mut order_rng = rng::fork(rng);

        let diagram = build_voronoi_diagram_with(&sites, cfg.voronoi)?;
        let mut map = TrapezoidalMap::with_cfg(&mut shear_rng, cfg.map);
        let mut borders = diagram.borders().to_vec();
        borders.shuffle(&mut order_rng);
        for b in &borders {
            map.insert_edge(&b.edge, RegionId(b.pair.0), RegionId(b.pair.1))?;
        }
        debug!(
            anchors = points.len(),
            sites = sites.len(),
            borders = borders.len(),
            shear = map.shear(),
            trapezoids = map.trapezoid_count(),
            "point index built"
        );
        Ok(Self {
            anchors: points.to_vec(),
            kept,
            diagram,
            map,
        })
    }

    /// Index into the build slice of the anchor nearest to `p`.
    ///
    /// Points equidistant from several anchors get one of them,
    /// deterministically for a given index.
    pub fn nearest_index(&self, p: Point) -> usize {
        if self.kept.len() == 1 {
            return self.kept[0];
        }
        let region = self.map.find_region(p);
        debug_assert_ne!(
            region,
            RegionId::UNASSIGNED,
            "voronoi borders span the plane, so every trapezoid carries a site tag"
        );
        self.kept[region.0]
    }

    pub fn nearest(&self, p: Point) -> Point {
        self.anchors[self.nearest_index(p)]
    }

    /// The anchors as passed to `build`, duplicates included.
    pub fn anchors(&self) -> &[Point] {
        &self.anchors
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Diagram of the distinct anchors; site `i` is `anchors()[k]` for the
    /// `k` returned by `nearest_index` inside cell `i`.
    pub fn diagram(&self) -> &VoronoiDiagram {
        &self.diagram
    }
}
