//! Arena types for the search DAG.
//!
//! Everything here is in sheared coordinates.

use crate::geom::{cross, Point};
use nalgebra::Vector2;

/// Index of a DAG node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub usize);

/// Index of an inserted edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct EdgeId(pub usize);

/// Opaque tag of the face a trapezoid belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub usize);

impl RegionId {
    /// Tag of the initial, edge-free map.
    pub const UNASSIGNED: RegionId = RegionId(usize::MAX);
}

/// An inserted edge, or a probe used while searching.
///
/// Unbounded ends are stored as `(∓∞, 0)`. Inserted edges have
/// `dir.x > 0`; probes may point either way, and a query point is a probe
/// with zero direction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Segment {
    pub start: Point,
    pub end: Point,
    pub origin: Point,
    pub dir: Vector2<f64>,
}

impl Segment {
    pub fn probe_at(p: Point) -> Self {
        Self {
            start: p,
            end: p,
            origin: p,
            dir: Vector2::zeros(),
        }
    }

    pub fn flipped(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            origin: self.origin,
            dir: -self.dir,
        }
    }

    /// Positive when `p` is left of (above) the supporting line.
    #[inline]
    pub fn side_of(&self, p: Point) -> f64 {
        cross(self.dir, p - self.origin)
    }

    #[inline]
    pub fn y_at(&self, x: f64) -> f64 {
        self.origin.y + (x - self.origin.x) * self.dir.y / self.dir.x
    }
}

/// Leaf cell. `top`/`bottom` are the bounding edges (`None` = unbounded);
/// neighbours follow the two-slot convention: a trapezoid touching only one
/// part of a wall stores that neighbour in both slots of that side.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Trapezoid {
    pub region: RegionId,
    pub left: Point,
    pub right: Point,
    pub top: Option<EdgeId>,
    pub bottom: Option<EdgeId>,
    pub left_top: Option<NodeId>,
    pub left_bottom: Option<NodeId>,
    pub right_top: Option<NodeId>,
    pub right_bottom: Option<NodeId>,
}

impl Trapezoid {
    pub fn unbounded(region: RegionId) -> Self {
        Self {
            region,
            left: Point::new(f64::NEG_INFINITY, 0.0),
            right: Point::new(f64::INFINITY, 0.0),
            top: None,
            bottom: None,
            left_top: None,
            left_bottom: None,
            right_top: None,
            right_bottom: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Node {
    /// Vertical split at `x`.
    X { x: f64, left: NodeId, right: NodeId },
    /// Above/below split by an inserted edge.
    Y {
        edge: EdgeId,
        top: NodeId,
        bottom: NodeId,
    },
    Leaf(Trapezoid),
}

/// The part of a vertical wall above or below the point that defines it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Part {
    Above,
    Below,
}

impl Trapezoid {
    #[inline]
    pub fn left_slot(&self, part: Part) -> Option<NodeId> {
        match part {
            Part::Above => self.left_top,
            Part::Below => self.left_bottom,
        }
    }

    #[inline]
    pub fn right_slot(&self, part: Part) -> Option<NodeId> {
        match part {
            Part::Above => self.right_top,
            Part::Below => self.right_bottom,
        }
    }
}
