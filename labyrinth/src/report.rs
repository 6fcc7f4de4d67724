//! Solving a grid and presenting the result.

use std::io::{self, Write};
use std::process::ExitCode;

use labyrinth_core::{Cell, Grid, GridView};
use labyrinth_paths::{
    AstarSearch, Connectivity, GridPather, SearchLimits, SearchOutcome, cost_map,
};
use serde::Serialize;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Found,
    NoPath,
    ExceededBound,
}

/// Everything worth printing about one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub status: Status,
    pub connectivity: Connectivity,
    pub start: Cell,
    pub end: Cell,
    /// Total cost, present only when a path was found.
    pub cost: Option<f64>,
    /// Route from start to end inclusive; empty without a path.
    pub path: Vec<Cell>,
    pub expansions: usize,
    /// Cells reachable from S, S included. Counted only when there is no
    /// path, since it takes a full sweep of the grid.
    pub reachable: Option<usize>,
}

impl Report {
    /// Search `grid` and record the outcome.
    pub fn solve(grid: &Grid, connectivity: Connectivity, limits: SearchLimits) -> Self {
        let pather = GridPather::new(grid, connectivity);
        let mut search =
            AstarSearch::new(&pather, grid.bounds(), grid.start(), grid.end()).with_limits(limits);
        let (status, cost, path, reachable) = match search.run() {
            SearchOutcome::Found(p) => (Status::Found, Some(p.cost()), p.into_cells(), None),
            SearchOutcome::NoPath => {
                let map = cost_map(&pather, grid.bounds(), grid.start());
                (Status::NoPath, None, Vec::new(), Some(map.reachable_count()))
            }
            SearchOutcome::ExceededBound { .. } => {
                (Status::ExceededBound, None, Vec::new(), None)
            }
        };
        log::info!(
            "{status:?} with {connectivity:?} connectivity after {} expansions",
            search.expansions()
        );
        Self {
            status,
            connectivity,
            start: grid.start(),
            end: grid.end(),
            cost,
            path,
            expansions: search.expansions(),
            reachable,
        }
    }

    /// Process exit status: 0 with a path, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        match self.status {
            Status::Found => 0,
            Status::NoPath | Status::ExceededBound => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Human-readable report.
    pub fn write_text(&self, grid: &Grid, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "Grid:")?;
        write!(w, "{}", GridView::new(grid))?;
        writeln!(w)?;
        match self.status {
            Status::NoPath => {
                writeln!(w, "No solution: there is no path between S and E.")?;
                if let Some(reachable) = self.reachable {
                    writeln!(
                        w,
                        "{reachable} of {} cells are reachable from S.",
                        grid.bounds().len()
                    )?;
                }
            }
            Status::ExceededBound => {
                writeln!(
                    w,
                    "Gave up after {} expansions without reaching E.",
                    self.expansions
                )?;
            }
            Status::Found => {
                writeln!(
                    w,
                    "Path found: {} cells (including S and E).",
                    self.path.len()
                )?;
                writeln!(w, "Total cost: {:.3}", self.cost.unwrap_or_default())?;
                writeln!(w)?;
                writeln!(w, "Path:")?;
                for (i, c) in self.path.iter().enumerate() {
                    writeln!(w, "  step {i}: {c}")?;
                }
                writeln!(w)?;
                writeln!(w, "Grid with path:")?;
                write!(w, "{}", GridView::new(grid).with_path(&self.path))?;
            }
        }
        Ok(())
    }
}
