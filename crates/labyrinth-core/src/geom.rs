//! Geometry primitives: [`Cell`] and [`Bounds`].
//!
//! Coordinates are `(row, col)`. Rows grow downward, columns grow right.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A discrete grid position.
///
/// Also used for offsets between positions, so components may be negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a cell shifted by (dr, dc).
    #[inline]
    pub const fn shift(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Whether this offset moves along both axes at once.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.row != 0 && self.col != 0
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The rectangular extent `[0, rows) × [0, cols)` of a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    /// Create new bounds. Negative sizes are clamped to zero.
    #[inline]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Whether the bounds contain no cell.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the bounds.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Row-major flat index of `c`. Returns `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// Convert a flat index back to a `Cell`.
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        let cols = self.cols.max(1) as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Cell;
    type IntoIter = BoundsIter;
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the cells of a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let c = self.bounds.cell(self.next);
        self.next += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.bounds.len().saturating_sub(self.next);
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for BoundsIter {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_arithmetic() {
        let a = Cell::new(1, 2);
        let b = Cell::new(3, -4);
        assert_eq!(a + b, Cell::new(4, -2));
        assert_eq!(a - b, Cell::new(-2, 6));
        assert_eq!(a.shift(-1, 1), Cell::new(0, 3));
    }

    #[test]
    fn cell_ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn diagonal_offsets() {
        assert!(Cell::new(1, -1).is_diagonal());
        assert!(!Cell::new(0, 1).is_diagonal());
        assert!(!Cell::ZERO.is_diagonal());
    }

    #[test]
    fn bounds_contains() {
        let b = Bounds::new(4, 5);
        assert!(b.contains(Cell::new(0, 0)));
        assert!(b.contains(Cell::new(3, 4)));
        assert!(!b.contains(Cell::new(4, 0)));
        assert!(!b.contains(Cell::new(0, 5)));
        assert!(!b.contains(Cell::new(-1, 2)));
    }

    #[test]
    fn bounds_index_round_trip() {
        let b = Bounds::new(3, 7);
        for c in b {
            let idx = b.index(c).unwrap();
            assert_eq!(b.cell(idx), c);
        }
        assert_eq!(b.index(Cell::new(1, 0)), Some(7));
        assert_eq!(b.index(Cell::new(3, 0)), None);
    }

    #[test]
    fn bounds_iter_count() {
        let b = Bounds::new(4, 5);
        assert_eq!(b.iter().len(), 20);
        assert_eq!(b.iter().count(), 20);
        assert_eq!(b.iter().last(), Some(Cell::new(3, 4)));
    }

    #[test]
    fn empty_bounds() {
        let b = Bounds::new(-2, 3);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
        assert_eq!(b.iter().next(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Cell::new(2, 1).to_string(), "(2, 1)");
        assert_eq!(Bounds::new(4, 5).to_string(), "4x5");
    }
}
