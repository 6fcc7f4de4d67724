//! **labyrinth-core**: grid types for the *labyrinth* pathfinder.
//!
//! This crate provides the data model searched by `labyrinth-paths`:
//! cell geometry, terrain codes, the validated [`Grid`], its text format and
//! a plain-text view that can overlay a solved path.

pub mod geom;
pub mod grid;
pub mod render;
pub mod terrain;

pub use geom::{Bounds, Cell};
pub use grid::{Grid, GridError};
pub use render::{GridView, PATH_MARK};
pub use terrain::{ParseError, Terrain};
