//! Randomized incremental trapezoidal map (planar point location).
//!
//! Purpose
//! - Store non-crossing directed edges, each tagged with the region on its
//!   left and on its right, and answer "which region contains this point?"
//!   by walking a search DAG of x-splits, edge splits and trapezoid leaves.
//!
//! Model
//! - Nodes live in an arena addressed by `NodeId`. Every node keeps its
//!   parent list; replacing a node rewrites the parents' child slots.
//! - Coordinates are sheared once (`x' = x + shear·y`, shear drawn at
//!   construction) so distinct points never share an x'. Inputs and
//!   outputs stay unsheared.
//! - Trapezoids remember their bounding edges; which part of a wall a
//!   trapezoid touches follows from whether those edges end at the wall.
//!
//! Complexity
//! - Edges inserted in random order give expected O(n log n) construction
//!   and O(log n) query depth. Adversarial orders can be quadratic, so
//!   callers shuffle first.
//!
//! References
//! - Code cross-refs: `insert` (edge threading), `locate` (DAG descent),
//!   `index::PointIndex`

mod insert;
mod locate;
mod types;

pub use types::RegionId;

use crate::geom::Point;
use rand::Rng;
use std::fmt;
use types::{Node, NodeId, Segment, Trapezoid};

/// Map construction parameters.
#[derive(Clone, Copy, Debug)]
pub struct MapCfg {
    /// The shear is drawn from `[max_shear / 2, max_shear)`.
    pub max_shear: f64,
}

impl Default for MapCfg {
    fn default() -> Self {
        Self { max_shear: 1e-6 }
    }
}

/// Edges the map cannot store.
#[derive(Clone, Debug, PartialEq)]
pub enum MapError {
    DegenerateEdge { reason: &'static str },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateEdge { reason } => write!(f, "degenerate edge: {reason}"),
        }
    }
}

impl std::error::Error for MapError {}

/// Point-location structure over inserted edges.
#[derive(Clone, Debug)]
pub struct TrapezoidalMap {
    shear: f64,
    nodes: Vec<Node>,
    parents: Vec<Vec<NodeId>>,
    edges: Vec<Segment>,
    root: NodeId,
}

impl TrapezoidalMap {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_cfg(rng, MapCfg::default())
    }

    pub fn with_cfg<R: Rng + ?Sized>(rng: &mut R, cfg: MapCfg) -> Self {
        let hi = if cfg.max_shear.is_finite() && cfg.max_shear > 0.0 {
            cfg.max_shear
        } else {
            MapCfg::default().max_shear
        };
        let shear = rng.gen_range(0.5 * hi..hi);
        Self {
            shear,
            nodes: vec![Node::Leaf(Trapezoid::unbounded(RegionId::UNASSIGNED))],
            parents: vec![Vec::new()],
            edges: Vec::new(),
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn shear(&self) -> f64 {
        self.shear
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Region of the trapezoid containing `p`.
    pub fn find_region(&self, p: Point) -> RegionId {
        let (leaf, _) = self.descend(&Segment::probe_at(self.shear_point(p)));
        self.trap(leaf).region
    }

    /// Nodes visited, leaf included, when locating `p`.
    pub fn depth(&self, p: Point) -> usize {
        self.descend(&Segment::probe_at(self.shear_point(p))).1
    }

    /// Trapezoids reachable from the root.
    pub fn trapezoid_count(&self) -> usize {
        self.leaves().len()
    }

    #[inline]
    fn shear_point(&self, p: Point) -> Point {
        Point::new(p.x + self.shear * p.y, p.y)
    }

    fn trap(&self, id: NodeId) -> &Trapezoid {
        match &self.nodes[id.0] {
            Node::Leaf(t) => t,
            _ => panic!("node {} is not a trapezoid", id.0),
        }
    }

    fn trap_mut(&mut self, id: NodeId) -> &mut Trapezoid {
        match &mut self.nodes[id.0] {
            Node::Leaf(t) => t,
            _ => panic!("node {} is not a trapezoid", id.0),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.parents.push(Vec::new());
        id
    }

    /// Hand `old`'s parents over to `new` and point their child slots at it.
    fn replace_node(&mut self, old: NodeId, new: NodeId) {
        let parents = std::mem::take(&mut self.parents[old.0]);
        for &p in &parents {
            match &mut self.nodes[p.0] {
                Node::X { left, right, .. } => {
                    if *left == old {
                        *left = new;
                    } else if *right == old {
                        *right = new;
                    }
                }
                Node::Y { top, bottom, .. } => {
                    if *top == old {
                        *top = new;
                    } else if *bottom == old {
                        *bottom = new;
                    }
                }
                Node::Leaf(_) => panic!("trapezoid {} listed as a parent", p.0),
            }
        }
        if self.root == old {
            self.root = new;
        }
        self.parents[new.0].extend(parents);
    }

    /// Reachable leaves in discovery order.
    fn leaves(&self) -> Vec<NodeId> {
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        let mut out = Vec::new();
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            match self.nodes[id.0] {
                Node::X { left, right, .. } => stack.extend([right, left]),
                Node::Y { top, bottom, .. } => stack.extend([bottom, top]),
                Node::Leaf(_) => out.push(id),
            }
        }
        out
    }

    /// Every neighbour link points at a live trapezoid across a shared wall
    /// that links back.
    #[cfg(test)]
    pub(crate) fn check_neighbors(&self) -> Result<(), String> {
        let live = self.leaves();
        let mut alive = vec![false; self.nodes.len()];
        for id in &live {
            alive[id.0] = true;
        }
        for &id in &live {
            let t = self.trap(id);
            for (slot, n) in [("right_top", t.right_top), ("right_bottom", t.right_bottom)] {
                let Some(n) = n else { continue };
                if !alive[n.0] {
                    return Err(format!("{}.{slot} -> dead node {}", id.0, n.0));
                }
                let b = self.trap(n);
                if b.left != t.right {
                    return Err(format!("{}.{slot} -> {} across different walls", id.0, n.0));
                }
                if b.left_top != Some(id) && b.left_bottom != Some(id) {
                    return Err(format!("{}.{slot} -> {} has no link back", id.0, n.0));
                }
            }
            for (slot, n) in [("left_top", t.left_top), ("left_bottom", t.left_bottom)] {
                let Some(n) = n else { continue };
                if !alive[n.0] {
                    return Err(format!("{}.{slot} -> dead node {}", id.0, n.0));
                }
                let b = self.trap(n);
                if b.right != t.left {
                    return Err(format!("{}.{slot} -> {} across different walls", id.0, n.0));
                }
                if b.right_top != Some(id) && b.right_bottom != Some(id) {
                    return Err(format!("{}.{slot} -> {} has no link back", id.0, n.0));
                }
            }
        }
        Ok(())
    }
}
