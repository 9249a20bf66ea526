//! Fortune's sweep: events, arc lookup and vertex recording.

use super::beachline::{ArcId, Beachline};
use crate::geom::{circumcenter, cross, distance, Point};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Raw sweep result, before snapping and border assembly.
#[derive(Clone, Debug, Default)]
pub(super) struct Swept {
    /// Vertices keyed by their sorted site triple, in recording order.
    pub vertices: Vec<([usize; 3], Point)>,
    /// Sites of consecutive arcs left on the beachline at the end.
    pub hull_pairs: Vec<(usize, usize)>,
}

#[derive(Clone, Copy, Debug)]
enum EventKind {
    /// Arc `arc` vanishes if it still sits between `prev` and `next`.
    Circle {
        arc: ArcId,
        prev: ArcId,
        next: ArcId,
        center: Point,
    },
    Site(usize),
}

#[derive(Clone, Copy, Debug)]
struct Event {
    x: f64,
    y: f64,
    seq: u64,
    kind: EventKind,
}

impl Event {
    fn rank(&self) -> u8 {
        match self.kind {
            EventKind::Circle { .. } => 0,
            EventKind::Site(_) => 1,
        }
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: `BinaryHeap` pops the greatest, the sweep wants the
        // smallest x, circles before sites, then lower y, then older.
        other
            .x
            .total_cmp(&self.x)
            .then_with(|| other.rank().cmp(&self.rank()))
            .then_with(|| other.y.total_cmp(&self.y))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

/// Where a new site lands on the beachline.
enum Slot {
    /// Strictly inside an arc: split it.
    Inside(ArcId),
    /// Exactly on the breakpoint of two adjacent arcs.
    Between(ArcId, ArcId),
    /// Above every arc. Only happens while all arcs sit on the first column.
    Above(ArcId),
}

struct Sweep<'a> {
    sites: &'a [Point],
    beach: Beachline,
    queue: BinaryHeap<Event>,
    sweep_x: f64,
    seq: u64,
    seen: HashSet<[usize; 3]>,
    out: Swept,
}

/// Run the sweep over distinct, finite `sites` (at least two).
pub(super) fn run(sites: &[Point]) -> Swept {
    let mut queue = BinaryHeap::with_capacity(2 * sites.len());
    for (i, p) in sites.iter().enumerate() {
        queue.push(Event {
            x: p.x,
            y: p.y,
            seq: i as u64,
            kind: EventKind::Site(i),
        });
    }
    let mut sweep = Sweep {
        sites,
        beach: Beachline::new(),
        queue,
        sweep_x: f64::NEG_INFINITY,
        seq: sites.len() as u64,
        seen: HashSet::new(),
        out: Swept::default(),
    };
    while let Some(ev) = sweep.queue.pop() {
        sweep.sweep_x = sweep.sweep_x.max(ev.x);
        match ev.kind {
            EventKind::Site(i) => sweep.site_event(i),
            EventKind::Circle {
                arc,
                prev,
                next,
                center,
            } => sweep.circle_event(arc, prev, next, center),
        }
    }

    let beach = &sweep.beach;
    let order: Vec<usize> = beach.iter().map(|a| beach.site(a)).collect();
    sweep.out.hull_pairs = order.windows(2).map(|w| (w[0], w[1])).collect();
    sweep.out
}

impl Sweep<'_> {
    fn site_event(&mut self, index: usize) {
        let Some(last) = self.beach.last() else {
            self.beach.push_back(index);
            return;
        };
        let y = self.sites[index].y;
        match self.locate(y, last) {
            Slot::Above(top) => {
                self.beach.insert_after(top, index);
            }
            Slot::Between(lower, upper) => {
                let (a, b) = (self.beach.site(lower), self.beach.site(upper));
                match circumcenter(self.sites[a], self.sites[index], self.sites[b]) {
                    Ok(center) => {
                        self.record([a, index, b], center);
                        self.beach.insert_after(lower, index);
                        self.check_circle(lower);
                        self.check_circle(upper);
                    }
                    Err(_) => self.split(lower, index),
                }
            }
            Slot::Inside(arc) => self.split(arc, index),
        }
        tracing::trace!(site = index, x = self.sweep_x, "site event");
    }

    /// Replace `arc` by `arc`, new, copy-of-`arc`.
    fn split(&mut self, arc: ArcId, index: usize) {
        let new = self.beach.insert_after(arc, index);
        let copy = self.beach.insert_after(new, self.beach.site(arc));
        self.check_circle(arc);
        self.check_circle(copy);
        // The arc above the split now has `copy` as its lower neighbour;
        // its pending event names the old arc id and is stale.
        if let Some(above) = self.beach.next(copy) {
            self.check_circle(above);
        }
    }

    fn circle_event(&mut self, arc: ArcId, prev: ArcId, next: ArcId, center: Point) {
        if !self.beach.is_alive(arc)
            || self.beach.prev(arc) != Some(prev)
            || self.beach.next(arc) != Some(next)
        {
            return;
        }
        let key = [
            self.beach.site(prev),
            self.beach.site(arc),
            self.beach.site(next),
        ];
        self.record(key, center);
        self.beach.remove(arc);
        self.check_circle(prev);
        self.check_circle(next);
        tracing::trace!(?key, x = self.sweep_x, "vertex");
    }

    /// Queue a circle event for `arc` if its neighbours converge on it.
    fn check_circle(&mut self, arc: ArcId) {
        let (Some(prev), Some(next)) = (self.beach.prev(arc), self.beach.next(arc)) else {
            return;
        };
        let p = self.sites[self.beach.site(prev)];
        let m = self.sites[self.beach.site(arc)];
        let q = self.sites[self.beach.site(next)];
        if cross(p - m, q - m) <= 0.0 {
            return;
        }
        let Ok(center) = circumcenter(p, m, q) else {
            return;
        };
        self.seq += 1;
        self.queue.push(Event {
            x: center.x + distance(center, m),
            y: center.y,
            seq: self.seq,
            kind: EventKind::Circle {
                arc,
                prev,
                next,
                center,
            },
        });
    }

    fn record(&mut self, mut key: [usize; 3], center: Point) {
        key.sort_unstable();
        assert!(
            self.seen.insert(key),
            "voronoi vertex for sites {key:?} recorded twice"
        );
        self.out.vertices.push((key, center));
    }

    fn locate(&self, y: f64, last: ArcId) -> Slot {
        let found = self.beach.first_where(|a| self.upper(a) >= y);
        let Some(arc) = found else {
            return Slot::Above(last);
        };
        if self.upper(arc) == y {
            if let Some(next) = self.beach.next(arc) {
                return Slot::Between(arc, next);
            }
        }
        Slot::Inside(arc)
    }

    /// Upper end of the y-interval `arc` covers at the current sweep.
    fn upper(&self, arc: ArcId) -> f64 {
        let focus = self.sites[self.beach.site(arc)];
        if focus.x == self.sweep_x {
            return focus.y;
        }
        match self.beach.next(arc) {
            None => f64::INFINITY,
            Some(n) => breakpoint(focus, self.sites[self.beach.site(n)], self.sweep_x),
        }
    }
}

/// y of the breakpoint where the arc of `lower` meets the arc of `upper`
/// above it, with the sweep at `xs`.
///
/// Equating the two parabolas gives `a y² + b y + c = 0`; the breakpoint is
/// the root where `lower` stops being the rightmost parabola, evaluated in
/// the cancellation-free form.
pub(super) fn breakpoint(lower: Point, upper: Point, xs: f64) -> f64 {
    if lower.x == xs {
        return lower.y;
    }
    if upper.x == xs {
        return upper.y;
    }
    let (d1, d2) = (lower.x - xs, upper.x - xs);
    let a = upper.x - lower.x;
    let b = -2.0 * (d2 * lower.y - d1 * upper.y);
    let c = d2 * lower.y * lower.y - d1 * upper.y * upper.y + (lower.x - upper.x) * d1 * d2;
    if a == 0.0 {
        return -c / b;
    }
    let s = (b * b - 4.0 * a * c).max(0.0).sqrt();
    if b < 0.0 {
        2.0 * c / (s - b)
    } else {
        (-b - s) / (2.0 * a)
    }
}
