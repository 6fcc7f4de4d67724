use labyrinth_core::Cell;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append the cells reachable in one step from `c` into `buf`.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Cell, to: Cell) -> f64;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible), and must be
    /// consistent so that closed cells never need reopening.
    fn estimate(&self, from: Cell, to: Cell) -> f64;
}
