use std::f64::consts::SQRT_2;

use labyrinth_core::Cell;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> f64 {
    f64::from((a.row - b.row).abs() + (a.col - b.col).abs())
}

/// Octile distance: straight steps cost 1, diagonal steps cost √2.
#[inline]
pub fn octile(a: Cell, b: Cell) -> f64 {
    let dr = (a.row - b.row).abs();
    let dc = (a.col - b.col).abs();
    f64::from(dr.max(dc)) + (SQRT_2 - 1.0) * f64::from(dr.min(dc))
}

/// Cost-to-go estimator, chosen to match a [`Connectivity`](crate::Connectivity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// For 4-direction movement.
    Manhattan,
    /// For 8-direction movement.
    Octile,
}

impl Heuristic {
    /// Estimate the remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Cell, to: Cell) -> f64 {
        match self {
            Self::Manhattan => manhattan(from, to),
            Self::Octile => octile(from, to),
        }
    }
}
