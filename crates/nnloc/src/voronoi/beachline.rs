//! Beachline: arcs in y order, with O(log n) expected lookup.
//!
//! Arcs live in an arena and are linked twice: a doubly linked list gives
//! `prev`/`next` in constant time, and a treap (priority from SplitMix64 of
//! the arc id) gives the ordered search used by site events. Removed arcs
//! keep their slot with `alive = false` so stale circle events can be
//! recognised by id.

use crate::rng::mix;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) struct ArcId(pub usize);

#[derive(Clone, Debug)]
struct Arc {
    site: usize,
    prev: Option<ArcId>,
    next: Option<ArcId>,
    parent: Option<ArcId>,
    left: Option<ArcId>,
    right: Option<ArcId>,
    priority: u64,
    alive: bool,
}

#[derive(Clone, Debug, Default)]
pub(super) struct Beachline {
    arcs: Vec<Arc>,
    root: Option<ArcId>,
    head: Option<ArcId>,
    tail: Option<ArcId>,
}

impl Beachline {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    pub fn site(&self, arc: ArcId) -> usize {
        self.arcs[arc.0].site
    }

    #[inline]
    pub fn prev(&self, arc: ArcId) -> Option<ArcId> {
        self.arcs[arc.0].prev
    }

    #[inline]
    pub fn next(&self, arc: ArcId) -> Option<ArcId> {
        self.arcs[arc.0].next
    }

    #[inline]
    pub fn is_alive(&self, arc: ArcId) -> bool {
        self.arcs[arc.0].alive
    }

    #[inline]
    pub fn last(&self) -> Option<ArcId> {
        self.tail
    }

    /// Live arcs from lowest to highest y.
    pub fn iter(&self) -> impl Iterator<Item = ArcId> + '_ {
        std::iter::successors(self.head, move |&a| self.next(a))
    }

    /// Append an arc above every existing one.
    pub fn push_back(&mut self, site: usize) -> ArcId {
        match self.tail {
            Some(t) => self.insert_after(t, site),
            None => {
                let id = self.alloc(site);
                self.root = Some(id);
                self.head = Some(id);
                self.tail = Some(id);
                id
            }
        }
    }

    /// Insert a new arc directly above `anchor`.
    pub fn insert_after(&mut self, anchor: ArcId, site: usize) -> ArcId {
        let id = self.alloc(site);

        let next = self.arcs[anchor.0].next;
        self.arcs[id.0].prev = Some(anchor);
        self.arcs[id.0].next = next;
        self.arcs[anchor.0].next = Some(id);
        match next {
            Some(n) => self.arcs[n.0].prev = Some(id),
            None => self.tail = Some(id),
        }

        // In-order successor slot: right child of `anchor`, or the leftmost
        // free slot of its right subtree.
        match self.arcs[anchor.0].right {
            None => {
                self.arcs[anchor.0].right = Some(id);
                self.arcs[id.0].parent = Some(anchor);
            }
            Some(mut m) => {
                while let Some(l) = self.arcs[m.0].left {
                    m = l;
                }
                self.arcs[m.0].left = Some(id);
                self.arcs[id.0].parent = Some(m);
            }
        }
        while let Some(p) = self.arcs[id.0].parent {
            if self.arcs[id.0].priority <= self.arcs[p.0].priority {
                break;
            }
            self.rotate_up(id);
        }
        id
    }

    /// Unlink `arc` from both the list and the tree.
    pub fn remove(&mut self, arc: ArcId) {
        loop {
            let child = match (self.arcs[arc.0].left, self.arcs[arc.0].right) {
                (None, None) => break,
                (Some(c), None) | (None, Some(c)) => c,
                (Some(l), Some(r)) => {
                    if self.arcs[l.0].priority > self.arcs[r.0].priority {
                        l
                    } else {
                        r
                    }
                }
            };
            self.rotate_up(child);
        }
        match self.arcs[arc.0].parent {
            None => self.root = None,
            Some(p) => {
                let node = &mut self.arcs[p.0];
                if node.left == Some(arc) {
                    node.left = None;
                } else {
                    node.right = None;
                }
            }
        }

        let (prev, next) = (self.arcs[arc.0].prev, self.arcs[arc.0].next);
        match prev {
            Some(p) => self.arcs[p.0].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.arcs[n.0].prev = prev,
            None => self.tail = prev,
        }
        let node = &mut self.arcs[arc.0];
        node.parent = None;
        node.alive = false;
    }

    /// First arc (lowest y) for which `pred` holds. `pred` must be monotone
    /// along the beachline: false for a prefix, true afterwards.
    pub fn first_where(&self, mut pred: impl FnMut(ArcId) -> bool) -> Option<ArcId> {
        let mut node = self.root;
        let mut found = None;
        while let Some(id) = node {
            if pred(id) {
                found = Some(id);
                node = self.arcs[id.0].left;
            } else {
                node = self.arcs[id.0].right;
            }
        }
        found
    }

    fn alloc(&mut self, site: usize) -> ArcId {
        let id = ArcId(self.arcs.len());
        self.arcs.push(Arc {
            site,
            prev: None,
            next: None,
            parent: None,
            left: None,
            right: None,
            priority: mix(id.0 as u64),
            alive: true,
        });
        id
    }

    /// Rotate `x` above its parent, keeping in-order position.
    fn rotate_up(&mut self, x: ArcId) {
        let Some(p) = self.arcs[x.0].parent else {
            return;
        };
        let g = self.arcs[p.0].parent;
        if self.arcs[p.0].left == Some(x) {
            let inner = self.arcs[x.0].right;
            self.arcs[p.0].left = inner;
            if let Some(b) = inner {
                self.arcs[b.0].parent = Some(p);
            }
            self.arcs[x.0].right = Some(p);
        } else {
            let inner = self.arcs[x.0].left;
            self.arcs[p.0].right = inner;
            if let Some(b) = inner {
                self.arcs[b.0].parent = Some(p);
            }
            self.arcs[x.0].left = Some(p);
        }
        self.arcs[p.0].parent = Some(x);
        self.arcs[x.0].parent = g;
        match g {
            None => self.root = Some(x),
            Some(g) => {
                let node = &mut self.arcs[g.0];
                if node.left == Some(p) {
                    node.left = Some(x);
                } else {
                    node.right = Some(x);
                }
            }
        }
    }
}
