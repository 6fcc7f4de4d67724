//! Command line flags.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "labyrinth")]
#[command(about = "Find the cheapest route from S to E through a labyrinth grid")]
#[command(after_help = "Terrain codes: S start, E end, 0 free, 1 or # wall, 2..9 heavy terrain")]
pub struct Args {
    /// Read the grid from a file, one row per line ("-" reads stdin)
    #[arg(long, short, conflicts_with_all = ["example", "random"])]
    pub file: Option<PathBuf>,

    /// Use the built-in example grid (the default when no source is given)
    #[arg(long, conflicts_with = "random")]
    pub example: bool,

    /// Generate a random grid of the given size, e.g. 12x30
    #[arg(long, value_name = "ROWSxCOLS")]
    pub random: Option<Size>,

    /// Seed for --random
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Fraction of walls in a --random grid
    #[arg(long, default_value_t = 0.25, value_parser = parse_density)]
    pub density: f64,

    /// Sprinkle heavy terrain (2..9) into a --random grid
    #[arg(long)]
    pub weights: bool,

    /// Allow diagonal moves (cost √2) and use the octile heuristic
    #[arg(long, short)]
    pub diagonal: bool,

    /// Give up after expanding this many cells
    #[arg(long)]
    pub max_expansions: Option<usize>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Animate the route in the terminal
    #[arg(long, conflicts_with = "json")]
    pub animate: bool,

    /// Delay between animation steps, in milliseconds
    #[arg(long, default_value_t = 120)]
    pub delay_ms: u64,
}

/// Grid dimensions given as `ROWSxCOLS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub rows: usize,
    pub cols: usize,
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (r, c) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected ROWSxCOLS, got \u{201c}{s}\u{201d}"))?;
        let rows: usize = r
            .trim()
            .parse()
            .map_err(|e| format!("bad row count \u{201c}{r}\u{201d}: {e}"))?;
        let cols: usize = c
            .trim()
            .parse()
            .map_err(|e| format!("bad column count \u{201c}{c}\u{201d}: {e}"))?;
        if rows > i32::MAX as usize || cols > i32::MAX as usize {
            return Err(format!("{s} is too large"));
        }
        match rows.checked_mul(cols) {
            None => Err(format!("{s} is too large")),
            Some(n) if n < 2 => Err(format!("{s} is too small to hold both S and E")),
            Some(_) => Ok(Self { rows, cols }),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("density must be between 0 and 1, got {d}"))
    }
}
