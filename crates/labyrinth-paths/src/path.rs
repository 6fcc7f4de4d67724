use labyrinth_core::{Bounds, Cell};

use crate::node::{NO_PARENT, Node};
use crate::traits::WeightedPather;

/// A solved route: cells from start to end inclusive, with its total cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Cell>,
    cost: f64,
}

impl Path {
    /// The cells in start-to-end order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Total accumulated cost.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `false` for every path returned by a search, which holds at least
    /// its start cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First cell, or `None` for an empty path.
    #[inline]
    pub fn start(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    /// Last cell, or `None` for an empty path.
    #[inline]
    pub fn end(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Consume the path, keeping only the cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Sum the move costs along the path, walking forward from the start.
    ///
    /// Additions happen in the same order as during the search, so for the
    /// pather that produced the path this equals [`cost`](Self::cost)
    /// exactly.
    pub fn walk_cost<P: WeightedPather>(&self, pather: &P) -> f64 {
        self.cells
            .windows(2)
            .fold(0.0, |acc, w| acc + pather.cost(w[0], w[1]))
    }
}

/// Walk predecessor links back from `goal` and return the path in
/// start-to-end order.
///
/// # Panics
///
/// If the walk does not reach `start` within `bounds.len()` steps. That
/// means the predecessor table is corrupt, which is a bug in relaxation.
pub(crate) fn reconstruct(nodes: &[Node], bounds: Bounds, start: usize, goal: usize) -> Path {
    let mut cells = Vec::new();
    let mut idx = goal;
    let mut steps = 0;
    loop {
        cells.push(bounds.cell(idx));
        if idx == start {
            break;
        }
        let parent = nodes[idx].parent;
        steps += 1;
        if parent == NO_PARENT || steps > bounds.len() {
            log::error!(
                "predecessor walk from {} broke at {} after {steps} steps",
                bounds.cell(goal),
                bounds.cell(idx)
            );
            panic!(
                "corrupt predecessor map: walk from {} does not reach {}",
                bounds.cell(goal),
                bounds.cell(start)
            );
        }
        idx = parent;
    }
    cells.reverse();
    Path {
        cells,
        cost: nodes[goal].g,
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn empty_deserialized_path_has_no_endpoints() {
        let path: Path = serde_json::from_str(r#"{"cells":[],"cost":0.0}"#).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.start(), None);
        assert_eq!(path.end(), None);
        assert_eq!(path.len(), 0);
    }
}
