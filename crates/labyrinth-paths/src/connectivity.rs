//! Movement rules: which offsets are allowed and what each step costs.

use std::f64::consts::SQRT_2;

use labyrinth_core::{Cell, Grid};

use crate::distance::Heuristic;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Orthogonal offsets in expansion order: up, down, left, right.
const ORTHOGONAL: [Cell; 4] = [
    Cell::new(-1, 0),
    Cell::new(1, 0),
    Cell::new(0, -1),
    Cell::new(0, 1),
];

/// Orthogonal offsets followed by the four diagonals.
const OCTAL: [Cell; 8] = [
    Cell::new(-1, 0),
    Cell::new(1, 0),
    Cell::new(0, -1),
    Cell::new(0, 1),
    Cell::new(-1, -1),
    Cell::new(-1, 1),
    Cell::new(1, -1),
    Cell::new(1, 1),
];

/// Connectivity mode, fixed for a whole search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Connectivity {
    /// Orthogonal moves only, each with base cost 1.
    #[default]
    Four,
    /// Orthogonal moves (cost 1) plus diagonal moves (cost √2).
    Eight,
}

impl Connectivity {
    /// `Eight` when diagonal moves are allowed, `Four` otherwise.
    pub fn from_diagonal(diagonal: bool) -> Self {
        if diagonal { Self::Eight } else { Self::Four }
    }

    /// Offsets to candidate neighbors, in expansion order.
    #[inline]
    pub fn offsets(self) -> &'static [Cell] {
        match self {
            Self::Four => &ORTHOGONAL,
            Self::Eight => &OCTAL,
        }
    }

    /// Base cost of a single step along `offset`, before terrain weight.
    #[inline]
    pub fn step_cost(self, offset: Cell) -> f64 {
        if offset.is_diagonal() { SQRT_2 } else { 1.0 }
    }

    /// The admissible heuristic that matches this mode.
    #[inline]
    pub fn heuristic(self) -> Heuristic {
        match self {
            Self::Four => Heuristic::Manhattan,
            Self::Eight => Heuristic::Octile,
        }
    }
}

/// Adapts a [`Grid`] and a [`Connectivity`] to the pather traits.
///
/// A neighbor is valid when it is inside the grid and not an obstacle.
/// Entering a cell costs the base step cost times the target's weight.
#[derive(Debug, Clone, Copy)]
pub struct GridPather<'a> {
    grid: &'a Grid,
    connectivity: Connectivity,
}

impl<'a> GridPather<'a> {
    /// Create a pather over `grid` moving under `connectivity`.
    pub fn new(grid: &'a Grid, connectivity: Connectivity) -> Self {
        Self { grid, connectivity }
    }

    /// The grid being searched.
    #[inline]
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// The active connectivity mode.
    #[inline]
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }
}

impl Pather for GridPather<'_> {
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        for &d in self.connectivity.offsets() {
            let n = c + d;
            if self.grid.is_passable(n) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for GridPather<'_> {
    fn cost(&self, from: Cell, to: Cell) -> f64 {
        // Integer weights keep 4-direction costs exact in f64.
        let weight = self
            .grid
            .terrain(to)
            .and_then(|t| t.weight())
            .unwrap_or(1);
        self.connectivity.step_cost(to - from) * f64::from(weight)
    }
}

impl AstarPather for GridPather<'_> {
    fn estimate(&self, from: Cell, to: Cell) -> f64 {
        self.connectivity.heuristic().estimate(from, to)
    }
}
