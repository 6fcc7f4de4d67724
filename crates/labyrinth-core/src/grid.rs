//! The validated, immutable labyrinth grid.

use std::fmt;
use std::str::FromStr;

use crate::geom::{Bounds, Cell};
use crate::terrain::{ParseError, Terrain};

/// A rectangular matrix of [`Terrain`] with resolved start and end cells.
///
/// A `Grid` can only be obtained through validation, so every value holds
/// exactly one [`Terrain::Start`] and one [`Terrain::End`]. It is never
/// mutated afterwards and may be shared freely between searches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<Terrain>,
    start: Cell,
    end: Cell,
}

impl Grid {
    /// Build a grid from rows of terrain.
    pub fn new(rows: Vec<Vec<Terrain>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }
        let (Ok(rows_i32), Ok(cols_i32)) = (i32::try_from(height), i32::try_from(width)) else {
            return Err(GridError::TooLarge {
                rows: height,
                cols: width,
            });
        };

        let mut cells = Vec::with_capacity(height * width);
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::Ragged {
                    row: r,
                    expected: width,
                    found: row.len(),
                });
            }
            for (c, t) in row.into_iter().enumerate() {
                // Lossless: both indices are below the checked dimensions.
                let cell = Cell::new(r as i32, c as i32);
                match t {
                    Terrain::Start => starts.push(cell),
                    Terrain::End => ends.push(cell),
                    _ => {}
                }
                cells.push(t);
            }
        }

        let start = match starts.as_slice() {
            [] => return Err(GridError::MissingStart),
            [s] => *s,
            _ => return Err(GridError::DuplicateStart { count: starts.len() }),
        };
        let end = match ends.as_slice() {
            [] => return Err(GridError::MissingEnd),
            [e] => *e,
            _ => return Err(GridError::DuplicateEnd { count: ends.len() }),
        };

        Ok(Self {
            bounds: Bounds::new(rows_i32, cols_i32),
            cells,
            start,
            end,
        })
    }

    /// Build a grid from rows of textual terrain codes.
    ///
    /// See [`Terrain::from_code`] for the accepted codes.
    pub fn from_codes<R, C, S>(rows: R) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terrain = Vec::new();
        for (r, row) in rows.into_iter().enumerate() {
            let mut line = Vec::new();
            for (c, code) in row.into_iter().enumerate() {
                let t = Terrain::from_code(code.as_ref())
                    .map_err(|source| GridError::Code { row: r, col: c, source })?;
                line.push(t);
            }
            terrain.push(line);
        }
        Self::new(terrain)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Extent of the grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// The unique start cell.
    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    /// The unique end cell.
    #[inline]
    pub fn end(&self) -> Cell {
        self.end
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds.contains(c)
    }

    /// Terrain at `c`, or `None` if out of bounds.
    #[inline]
    pub fn terrain(&self, c: Cell) -> Option<Terrain> {
        self.bounds.index(c).map(|i| self.cells[i])
    }

    /// Whether `c` is in bounds and not an obstacle.
    #[inline]
    pub fn is_passable(&self, c: Cell) -> bool {
        self.terrain(c).is_some_and(Terrain::is_passable)
    }

    /// Iterate over every cell with its terrain, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Terrain)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse a grid from text, one row per line.
    ///
    /// A line containing whitespace is split into whitespace-separated
    /// tokens (`S 0 1 0 E`); otherwise every character is a token
    /// (`S010E`). Blank lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<String>> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| {
                if l.contains(char::is_whitespace) {
                    l.split_whitespace().map(str::to_string).collect()
                } else {
                    l.chars().map(String::from).collect()
                }
            })
            .collect();
        Self::from_codes(rows)
    }
}

/// Errors that make a grid unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or rows without cells.
    Empty,
    /// More rows or columns than a [`Cell`] coordinate can address.
    TooLarge { rows: usize, cols: usize },
    /// A row's length differs from the first row's.
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A token is not a terrain code.
    Code {
        row: usize,
        col: usize,
        source: ParseError,
    },
    /// No `S` cell.
    MissingStart,
    /// No `E` cell.
    MissingEnd,
    /// More than one `S` cell.
    DuplicateStart { count: usize },
    /// More than one `E` cell.
    DuplicateEnd { count: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no cells"),
            Self::TooLarge { rows, cols } => {
                write!(f, "grid of {rows}x{cols} cells is too large")
            }
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid is not rectangular: row {row} has {found} cells, expected {expected}"
            ),
            Self::Code { row, col, .. } => {
                write!(f, "invalid terrain at ({row}, {col})")
            }
            Self::MissingStart => write!(f, "expected exactly 1 start 'S', found 0"),
            Self::MissingEnd => write!(f, "expected exactly 1 end 'E', found 0"),
            Self::DuplicateStart { count } => {
                write!(f, "expected exactly 1 start 'S', found {count}")
            }
            Self::DuplicateEnd { count } => {
                write!(f, "expected exactly 1 end 'E', found {count}")
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Code { source, .. } => Some(source),
            _ => None,
        }
    }
}
