use std::collections::BinaryHeap;

use labyrinth_core::{Bounds, Cell};

use crate::node::{Node, NodeRef};
use crate::traits::WeightedPather;

/// Cheapest cost from one source to every cell of a grid.
#[derive(Debug, Clone)]
pub struct CostMap {
    bounds: Bounds,
    costs: Vec<f64>,
}

impl CostMap {
    /// Cost from the source to `c`.
    ///
    /// `f64::INFINITY` if `c` is out of bounds or unreachable.
    pub fn at(&self, c: Cell) -> f64 {
        self.bounds
            .index(c)
            .map_or(f64::INFINITY, |i| self.costs[i])
    }

    /// Whether `c` can be reached from the source.
    pub fn is_reachable(&self, c: Cell) -> bool {
        self.at(c).is_finite()
    }

    /// Number of reachable cells, the source included.
    pub fn reachable_count(&self) -> usize {
        self.costs.iter().filter(|c| c.is_finite()).count()
    }
}

/// Compute a single-source Dijkstra cost map over the whole of `bounds`.
///
/// Unlike A*, the search does not stop at any goal, so the map answers
/// "how expensive is it to get there" for every cell at once.
pub fn cost_map<P: WeightedPather>(pather: &P, bounds: Bounds, source: Cell) -> CostMap {
    let mut nodes = vec![Node::default(); bounds.len()];
    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    let mut seq = 0;

    if let Some(si) = bounds.index(source) {
        nodes[si].g = 0.0;
        open.push(NodeRef {
            idx: si,
            f: 0.0,
            h: 0.0,
            seq,
        });
    }

    let mut nbuf = Vec::with_capacity(8);

    while let Some(current) = open.pop() {
        let ci = current.idx;
        if nodes[ci].closed {
            continue;
        }
        nodes[ci].closed = true;
        let current_g = nodes[ci].g;
        let cp = bounds.cell(ci);

        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = bounds.index(np) else {
                continue;
            };
            let tentative = current_g + pather.cost(cp, np);
            let n = &mut nodes[ni];
            if n.closed || tentative >= n.g {
                continue;
            }
            n.g = tentative;
            n.parent = ci;
            seq += 1;
            open.push(NodeRef {
                idx: ni,
                f: tentative,
                h: 0.0,
                seq,
            });
        }
    }

    log::debug!(
        "dijkstra: {} of {} cells reachable from {source}",
        nodes.iter().filter(|n| n.discovered()).count(),
        bounds.len()
    );

    CostMap {
        bounds,
        costs: nodes.into_iter().map(|n| n.g).collect(),
    }
}
