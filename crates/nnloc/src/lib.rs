//! Planar nearest-neighbour index.
//!
//! Two subsystems do the work:
//! - `voronoi`: Fortune's sweep turns anchor points into cell borders.
//! - `trapmap`: a randomized trapezoidal map locates a query point among
//!   those borders.
//!
//! `index::PointIndex` composes them. Everything is single-threaded and
//! built once; queries take `&self`.
//!
//! Logging goes through `tracing`; install a subscriber to see build
//! summaries (`debug`) and per-edge detail (`trace`).

pub mod geom;
pub mod index;
pub mod trapmap;
pub mod voronoi;

mod rng;

#[cfg(test)]
mod test_support;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{DirectedEdge, Point};
pub use index::{IndexCfg, IndexError, PointIndex};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{cross, distance, DirectedEdge, GeomError, Point};
    pub use crate::index::{IndexCfg, IndexError, PointIndex};
    pub use crate::trapmap::{MapCfg, MapError, RegionId, TrapezoidalMap};
    pub use crate::voronoi::{
        build_voronoi_diagram, build_voronoi_diagram_with, Border, VoronoiCfg, VoronoiDiagram,
        VoronoiError,
    };
    pub use nalgebra::Vector2 as Vec2;
}
