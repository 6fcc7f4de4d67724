//! Where a grid comes from: the built-in example, a file, stdin or a
//! seeded random generator.

use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;

use labyrinth_core::{Grid, GridError, Terrain};
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::args::{Args, Size};

/// The built-in example: a 4×5 maze with one heavy cell on the best route.
pub const EXAMPLE: &str = "\
S 0 1 0 0
0 0 1 0 1
0 2 0 0 0
1 0 0 E 1";

/// Chance that a non-wall cell of a random grid is heavy terrain.
const WEIGHT_CHANCE: f64 = 0.2;

/// Parameters of a random grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomParams {
    pub size: Size,
    pub seed: u64,
    pub density: f64,
    pub weights: bool,
}

/// A grid source selected on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSource {
    Example,
    File(PathBuf),
    Stdin,
    Random(RandomParams),
}

impl GridSource {
    /// Pick the source named by `args`, defaulting to the example.
    pub fn from_args(args: &Args) -> Self {
        match (&args.file, args.random) {
            (Some(p), _) if p.as_os_str() == "-" => Self::Stdin,
            (Some(p), _) => Self::File(p.clone()),
            (None, Some(size)) => Self::Random(RandomParams {
                size,
                seed: args.seed,
                density: args.density,
                weights: args.weights,
            }),
            (None, None) => Self::Example,
        }
    }

    /// Read and validate the grid.
    pub fn load(&self) -> Result<Grid, SourceError> {
        let grid: Grid = match self {
            Self::Example => EXAMPLE.parse()?,
            Self::File(path) => std::fs::read_to_string(path)
                .map_err(|source| SourceError::Io {
                    path: path.clone(),
                    source,
                })?
                .parse()?,
            Self::Stdin => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|source| SourceError::Io {
                        path: PathBuf::from("-"),
                        source,
                    })?;
                text.parse()?
            }
            Self::Random(params) => {
                let mut rng = StdRng::seed_from_u64(params.seed);
                random_grid(&mut rng, params)?
            }
        };
        log::debug!("loaded {} grid from {self}", grid.bounds());
        Ok(grid)
    }
}

impl fmt::Display for GridSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Example => write!(f, "built-in example"),
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Stdin => write!(f, "stdin"),
            Self::Random(params) => write!(f, "random {} (seed {})", params.size, params.seed),
        }
    }
}

/// Generate a grid with walls at the given density and distinct start and
/// end cells. The same seed always yields the same grid.
pub fn random_grid(rng: &mut impl Rng, params: &RandomParams) -> Result<Grid, GridError> {
    let Size { rows, cols } = params.size;
    let len = rows
        .checked_mul(cols)
        .ok_or(GridError::TooLarge { rows, cols })?;
    if len < 2 {
        return Err(GridError::Empty);
    }

    let mut cells: Vec<Terrain> = (0..len)
        .map(|_| {
            if rng.random_bool(params.density) {
                Terrain::Obstacle
            } else if params.weights && rng.random_bool(WEIGHT_CHANCE) {
                Terrain::Weight(rng.random_range(Terrain::MIN_WEIGHT..=Terrain::MAX_WEIGHT))
            } else {
                Terrain::Free
            }
        })
        .collect();

    let s = rng.random_range(0..len);
    let mut e = rng.random_range(0..len - 1);
    if e >= s {
        e += 1;
    }
    cells[s] = Terrain::Start;
    cells[e] = Terrain::End;

    Grid::new(cells.chunks(cols).map(<[Terrain]>::to_vec).collect())
}

/// Errors while obtaining a grid.
#[derive(Debug)]
pub enum SourceError {
    /// The grid text could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The grid text is not a valid grid.
    Grid(GridError),
}

impl From<GridError> for SourceError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Grid(e) => Some(e),
        }
    }
}
