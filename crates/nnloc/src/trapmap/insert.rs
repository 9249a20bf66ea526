//! Edge insertion: split the end trapezoids, walk the crossed ones, replace
//! them with merged halves, then rewire neighbours wall by wall.

use super::types::{EdgeId, Node, NodeId, Part, RegionId, Segment, Trapezoid};
use super::{MapError, TrapezoidalMap};
use crate::geom::{DirectedEdge, Point};
use nalgebra::Vector2;
use tracing::trace;

impl TrapezoidalMap {
    /// Insert `edge`, tagging the face on its left with `left` and the face
    /// on its right with `right`.
    ///
    /// The edge must not cross any stored edge or pass through a stored
    /// endpoint; it may share endpoints with stored edges.
    pub fn insert_edge(
        &mut self,
        edge: &DirectedEdge,
        left: RegionId,
        right: RegionId,
    ) -> Result<(), MapError> {
        let (seg, top, bottom) = self.canonical(edge, left, right)?;
        let id = EdgeId(self.edges.len());
        self.edges.push(seg);
        self.thread(id, top, bottom);
        trace!(edge = id.0, nodes = self.nodes.len(), "edge inserted");
        Ok(())
    }

    /// Shear and orient the edge left to right; returns the regions above
    /// and below it.
    fn canonical(
        &self,
        edge: &DirectedEdge,
        left: RegionId,
        right: RegionId,
    ) -> Result<(Segment, RegionId, RegionId), MapError> {
        let d = edge.direction;
        if !(d.x.is_finite() && d.y.is_finite()) || (d.x == 0.0 && d.y == 0.0) {
            return Err(degenerate("direction must be finite and non-zero"));
        }
        let finite = |p: Option<Point>| p.map_or(true, |p| p.is_finite());
        if !edge.origin.is_finite() || !finite(edge.start) || !finite(edge.end) {
            return Err(degenerate("coordinates must be finite"));
        }
        let dx = d.x + self.shear * d.y;
        if dx == 0.0 || !dx.is_finite() {
            return Err(degenerate("edge is vertical after shearing"));
        }
        let (e, top, bottom) = if dx < 0.0 {
            (edge.flip(), right, left)
        } else {
            (*edge, left, right)
        };
        let start = e
            .start
            .map_or(Point::new(f64::NEG_INFINITY, 0.0), |p| self.shear_point(p));
        let end = e
            .end
            .map_or(Point::new(f64::INFINITY, 0.0), |p| self.shear_point(p));
        let seg = if e.is_bounded() {
            let dir = end - start;
            if !(dir.x > 0.0) {
                return Err(degenerate("segment bounds disagree with its direction"));
            }
            Segment { start, end, origin: start, dir }
        } else {
            Segment {
                start,
                end,
                origin: self.shear_point(e.origin),
                dir: Vector2::new(e.direction.x + self.shear * e.direction.y, e.direction.y),
            }
        };
        Ok((seg, top, bottom))
    }

    fn thread(&mut self, id: EdgeId, top_region: RegionId, bottom_region: RegionId) {
        let seg = self.edges[id.0];

        let mut first = self.locate(&seg);
        if self.trap(first).left.x != seg.start.x {
            first = self.split_vertically(first, seg.start).1;
        }
        let mut last = self.locate(&seg.flipped());
        if self.trap(last).right.x != seg.end.x {
            let (left, _) = self.split_vertically(last, seg.end);
            if last == first {
                first = left;
            }
            last = left;
        }

        let (path, passes) = self.walk(&seg, first, last);
        let old: Vec<Trapezoid> = path.iter().map(|&t| *self.trap(t)).collect();
        let (tops, top_of) = self.halves(&old, &passes, id, top_region, Part::Above);
        let (bots, bot_of) = self.halves(&old, &passes, id, bottom_region, Part::Below);

        for (i, &t) in path.iter().enumerate() {
            let (top, bottom) = (tops[top_of[i]], bots[bot_of[i]]);
            let y = self.push(Node::Y { edge: id, top, bottom });
            self.parents[top.0].push(y);
            self.parents[bottom.0].push(y);
            self.replace_node(t, y);
        }

        let p = seg.start;
        if p.x.is_finite() {
            let t0 = &old[0];
            let (above, below) = self.cover_right_of(t0, p);
            if above {
                self.link(p, Part::Above, t0.left_top, Some(tops[0]));
            }
            if below {
                self.link(p, Part::Below, t0.left_bottom, Some(bots[0]));
            }
        }

        for (i, &pass) in passes.iter().enumerate() {
            let (l, r) = (&old[i], &old[i + 1]);
            let wall = l.right;
            let (l_above, l_below) = self.cover_left_of(l, wall);
            let (r_above, r_below) = self.cover_right_of(r, wall);
            let (left_piece, right_piece) = match pass {
                Part::Above => (bots[bot_of[i]], bots[bot_of[i + 1]]),
                Part::Below => (tops[top_of[i]], tops[top_of[i + 1]]),
            };
            for (part, lc, rc) in [(Part::Above, l_above, r_above), (Part::Below, l_below, r_below)] {
                if !lc && !rc {
                    continue;
                }
                let left = if lc { Some(left_piece) } else { r.left_slot(part) };
                let right = if rc { Some(right_piece) } else { l.right_slot(part) };
                self.link(wall, part, left, right);
            }
        }

        let q = seg.end;
        if q.x.is_finite() {
            let tk = &old[old.len() - 1];
            let (above, below) = self.cover_left_of(tk, q);
            if above {
                self.link(q, Part::Above, Some(tops[tops.len() - 1]), tk.right_top);
            }
            if below {
                self.link(q, Part::Below, Some(bots[bots.len() - 1]), tk.right_bottom);
            }
        }
    }

    /// Trapezoids crossed by `seg` from `first` to `last`, and for each
    /// interior wall whether the edge passes above or below its point.
    fn walk(&self, seg: &Segment, first: NodeId, last: NodeId) -> (Vec<NodeId>, Vec<Part>) {
        let mut path = vec![first];
        let mut passes = Vec::new();
        let mut cur = first;
        while cur != last {
            let t = self.trap(cur);
            let side = if t.right.x.is_finite() {
                seg.side_of(t.right)
            } else {
                f64::NAN
            };
            let (pass, next) = if side < 0.0 {
                (Part::Above, t.right_top)
            } else if side > 0.0 {
                (Part::Below, t.right_bottom)
            } else {
                panic!("edge runs through stored endpoint {}", t.right);
            };
            let Some(next) = next else {
                panic!("trapezoid {} has no neighbour across {}", cur.0, t.right);
            };
            passes.push(pass);
            path.push(next);
            cur = next;
        }
        (path, passes)
    }

    /// New trapezoids on one side of the edge. Consecutive crossed
    /// trapezoids share a piece unless the wall between them reaches the
    /// edge from that side. Returns the pieces and, per crossed trapezoid,
    /// the index of the piece covering it.
    fn halves(
        &mut self,
        old: &[Trapezoid],
        passes: &[Part],
        id: EdgeId,
        region: RegionId,
        side: Part,
    ) -> (Vec<NodeId>, Vec<usize>) {
        let mut pieces = Vec::new();
        let mut owner = vec![0; old.len()];
        let mut from = 0;
        for i in 0..old.len() {
            if i + 1 < old.len() && passes[i] == side {
                continue;
            }
            let (a, b) = (&old[from], &old[i]);
            let (top, bottom) = match side {
                Part::Above => (a.top, Some(id)),
                Part::Below => (Some(id), a.bottom),
            };
            let node = self.push(Node::Leaf(Trapezoid {
                region,
                left: a.left,
                right: b.right,
                top,
                bottom,
                left_top: None,
                left_bottom: None,
                right_top: None,
                right_bottom: None,
            }));
            owner[from..=i].fill(pieces.len());
            pieces.push(node);
            from = i + 1;
        }
        (pieces, owner)
    }

    /// Cut trapezoid `id` at `p.x`; returns the left and right parts.
    fn split_vertically(&mut self, id: NodeId, p: Point) -> (NodeId, NodeId) {
        let old = *self.trap(id);
        let left = self.push(Node::Leaf(Trapezoid {
            right: p,
            right_top: None,
            right_bottom: None,
            ..old
        }));
        let right = self.push(Node::Leaf(Trapezoid {
            left: p,
            left_top: None,
            left_bottom: None,
            ..old
        }));
        for n in distinct(old.left_top, old.left_bottom) {
            self.retarget(n, id, left);
        }
        for n in distinct(old.right_top, old.right_bottom) {
            self.retarget(n, id, right);
        }
        self.link(p, Part::Above, Some(left), Some(right));
        self.link(p, Part::Below, Some(left), Some(right));

        let x = self.push(Node::X { x: p.x, left, right });
        self.parents[left.0].push(x);
        self.parents[right.0].push(x);
        self.replace_node(id, x);
        (left, right)
    }

    fn retarget(&mut self, n: NodeId, from: NodeId, to: NodeId) {
        let t = self.trap_mut(n);
        for slot in [
            &mut t.left_top,
            &mut t.left_bottom,
            &mut t.right_top,
            &mut t.right_bottom,
        ] {
            if *slot == Some(from) {
                *slot = Some(to);
            }
        }
    }

    /// Which parts of `wall` a trapezoid to its left touches.
    fn cover_left_of(&self, t: &Trapezoid, wall: Point) -> (bool, bool) {
        let ends_here = |e: Option<EdgeId>| e.map_or(false, |e| self.edges[e.0].end == wall);
        (!ends_here(t.top), !ends_here(t.bottom))
    }

    /// Which parts of `wall` a trapezoid to its right touches.
    fn cover_right_of(&self, t: &Trapezoid, wall: Point) -> (bool, bool) {
        let starts_here = |e: Option<EdgeId>| e.map_or(false, |e| self.edges[e.0].start == wall);
        (!starts_here(t.top), !starts_here(t.bottom))
    }

    /// Make `left` and `right` neighbours across `part` of `wall`. A side
    /// touching only that part gets the link in both of its slots.
    fn link(&mut self, wall: Point, part: Part, left: Option<NodeId>, right: Option<NodeId>) {
        if let Some(l) = left {
            let (above, below) = self.cover_left_of(self.trap(l), wall);
            let t = self.trap_mut(l);
            match part {
                Part::Above => {
                    t.right_top = right;
                    if !below {
                        t.right_bottom = right;
                    }
                }
                Part::Below => {
                    t.right_bottom = right;
                    if !above {
                        t.right_top = right;
                    }
                }
            }
        }
        if let Some(r) = right {
            let (above, below) = self.cover_right_of(self.trap(r), wall);
            let t = self.trap_mut(r);
            match part {
                Part::Above => {
                    t.left_top = left;
                    if !below {
                        t.left_bottom = left;
                    }
                }
                Part::Below => {
                    t.left_bottom = left;
                    if !above {
                        t.left_top = left;
                    }
                }
            }
        }
    }
}

fn degenerate(reason: &'static str) -> MapError {
    MapError::DegenerateEdge { reason }
}

fn distinct(a: Option<NodeId>, b: Option<NodeId>) -> impl Iterator<Item = NodeId> {
    a.into_iter().chain(b.filter(|&b| Some(b) != a))
}
