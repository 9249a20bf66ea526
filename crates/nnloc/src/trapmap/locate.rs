//! DAG descent.
//!
//! A probe is either a query point (zero direction) or an edge about to be
//! inserted. An edge probe resolves ties at shared endpoints by the
//! direction it leaves the endpoint in, so it always lands in the trapezoid
//! its first (or, flipped, last) piece runs through.

use super::types::{Node, NodeId, Segment};
use super::TrapezoidalMap;
use crate::geom::cross;

impl TrapezoidalMap {
    /// Leaf the probe lands in.
    pub(super) fn locate(&self, probe: &Segment) -> NodeId {
        self.descend(probe).0
    }

    /// Leaf the probe lands in and the number of nodes visited.
    pub(super) fn descend(&self, probe: &Segment) -> (NodeId, usize) {
        let mut cur = self.root;
        let mut depth = 1;
        loop {
            cur = match self.nodes[cur.0] {
                Node::Leaf(_) => return (cur, depth),
                Node::X { x, left, right } => {
                    if goes_left(probe, x) {
                        left
                    } else {
                        right
                    }
                }
                Node::Y { edge, top, bottom } => {
                    if is_above(probe, &self.edges[edge.0]) {
                        top
                    } else {
                        bottom
                    }
                }
            };
            depth += 1;
        }
    }
}

#[inline]
fn goes_left(probe: &Segment, x: f64) -> bool {
    probe.start.x < x || (probe.start.x == x && probe.end.x < x)
}

fn is_above(probe: &Segment, edge: &Segment) -> bool {
    if probe.start.x.is_infinite() {
        // Both unbounded on this side; compare slopes, then offsets.
        let turn = cross(probe.dir, edge.dir);
        if turn != 0.0 {
            return turn > 0.0;
        }
        return probe.y_at(0.0) > edge.y_at(0.0);
    }
    if probe.start == edge.start || probe.start == edge.end {
        return cross(probe.dir, edge.dir) < 0.0;
    }
    edge.side_of(probe.start) > 0.0
}
