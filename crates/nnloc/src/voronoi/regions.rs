//! Cell boundaries as counterclockwise edge chains.

use super::Border;
use crate::geom::{DirectedEdge, Point};
use std::collections::{BTreeMap, HashMap};

/// Boundary of one site's cell. Each edge ends where the next one starts;
/// for an unbounded cell the chain starts at an edge coming from infinity
/// and finishes at one going to infinity.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub edges: Vec<DirectedEdge>,
}

impl Region {
    pub fn is_bounded(&self) -> bool {
        self.edges.iter().all(DirectedEdge::is_bounded)
    }
}

/// Group borders by site and chain them end-to-start.
pub(super) fn chain(borders: &[Border]) -> BTreeMap<usize, Region> {
    let mut by_site: BTreeMap<usize, Vec<DirectedEdge>> = BTreeMap::new();
    for b in borders {
        // Left site keeps the direction; the right site walks it backwards.
        by_site.entry(b.left_site()).or_default().push(b.edge);
        by_site.entry(b.right_site()).or_default().push(b.edge.flip());
    }
    by_site
        .into_iter()
        .map(|(site, edges)| (site, Region { edges: order(edges) }))
        .collect()
}

fn order(edges: Vec<DirectedEdge>) -> Vec<DirectedEdge> {
    // `None` stands for the point at infinity.
    let mut by_start: HashMap<Option<Point>, Vec<usize>> = HashMap::new();
    for (i, e) in edges.iter().enumerate() {
        by_start.entry(e.start).or_default().push(i);
    }
    let first = edges.iter().position(|e| e.start.is_none()).unwrap_or(0);
    if let Some(slot) = by_start.get_mut(&edges[first].start) {
        slot.retain(|&i| i != first);
    }

    let mut out = Vec::with_capacity(edges.len());
    let mut cur = Some(first);
    while let Some(i) = cur {
        out.push(edges[i]);
        cur = by_start.get_mut(&edges[i].end).and_then(Vec::pop);
    }
    out
}
