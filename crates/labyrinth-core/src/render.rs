//! Plain-text rendering of a grid, optionally with a path overlaid.

use std::collections::HashSet;
use std::fmt;

use crate::geom::Cell;
use crate::grid::Grid;
use crate::terrain::Terrain;

/// Marker drawn on path cells.
pub const PATH_MARK: char = '*';

/// A `Display` adapter printing a [`Grid`] one row per line, cells
/// separated by a single space.
///
/// ```
/// use labyrinth_core::{Cell, Grid, GridView};
///
/// let grid: Grid = "S 0\n0 E".parse().unwrap();
/// let path = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)];
/// assert_eq!(GridView::new(&grid).with_path(&path).to_string(), "S *\n0 E\n");
/// ```
pub struct GridView<'a> {
    grid: &'a Grid,
    path: HashSet<Cell>,
}

impl<'a> GridView<'a> {
    /// View `grid` without any overlay.
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            path: HashSet::new(),
        }
    }

    /// Mark every cell of `path` except the start and end.
    pub fn with_path(mut self, path: &[Cell]) -> Self {
        self.path = path
            .iter()
            .copied()
            .filter(|&c| !matches!(self.grid.terrain(c), Some(Terrain::Start | Terrain::End)))
            .collect();
        self
    }

    fn glyph(&self, c: Cell, t: Terrain) -> char {
        if self.path.contains(&c) {
            PATH_MARK
        } else {
            t.code()
        }
    }
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (c, t) in self.grid.iter() {
            if c.col > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", self.glyph(c, t))?;
            if c.col == self.grid.cols() - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
