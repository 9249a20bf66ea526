//! Planar geometry shared by the Voronoi builder and the trapezoidal map.
//!
//! Purpose
//! - `Point`: exact-valued coordinate pair. Endpoint matching in both
//!   subsystems relies on bitwise-equal coordinates, so equality is exact.
//! - `DirectedEdge`: a line, ray or segment given by an origin, a direction
//!   and optional bounds.
//! - Scalar helpers: `cross`, `cross_product`, `distance`, `circumcenter`.
//!
//! References
//! - Code cross-refs: `voronoi::Border`, `trapmap::TrapezoidalMap`

mod edge;
mod point;

pub use edge::DirectedEdge;
pub use point::{circumcenter, cross, cross_product, distance, perp, GeomError, Point};
