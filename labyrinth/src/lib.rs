//! The `labyrinth` command: load a grid, find the cheapest route from S to
//! E, and print or animate it.

pub mod args;
pub mod report;
pub mod source;
pub mod viewer;

use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

use labyrinth_paths::{Connectivity, SearchLimits};

use crate::args::Args;
use crate::report::{Report, Status};
use crate::source::GridSource;

/// Run one invocation. Errors are for bad input or I/O; a grid without a
/// route is a normal outcome reported through the exit code.
pub fn run(args: &Args) -> Result<ExitCode, Box<dyn Error>> {
    let source = GridSource::from_args(args);
    let grid = source.load()?;

    let connectivity = Connectivity::from_diagonal(args.diagonal);
    let limits = args
        .max_expansions
        .map_or(SearchLimits::UNBOUNDED, SearchLimits::max_expansions);
    log::info!(
        "solving {} grid from {source} with {connectivity:?} connectivity",
        grid.bounds()
    );
    let report = Report::solve(&grid, connectivity, limits);

    let mut out = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else if args.animate && report.status == Status::Found {
        drop(out);
        viewer::animate(&grid, &report.path, args.delay_ms)?;
        report.write_text(&grid, &mut io::stdout().lock())?;
    } else {
        report.write_text(&grid, &mut out)?;
    }
    Ok(report.exit_code())
}
