use std::collections::BinaryHeap;

use labyrinth_core::{Bounds, Cell, Grid};

use crate::connectivity::{Connectivity, GridPather};
use crate::node::{Node, NodeRef};
use crate::path::{Path, reconstruct};
use crate::traits::AstarPather;

/// Why a search ended without a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailReason {
    /// The open set ran dry before the goal was closed.
    NoPath,
    /// [`SearchLimits::max_expansions`] was reached first.
    ExceededBound,
}

/// State of an [`AstarSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    Running,
    Succeeded,
    Failed(FailReason),
}

/// Optional bounds on a single run. The default is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    /// Give up once this many cells have been expanded.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    /// No bounds.
    pub const UNBOUNDED: Self = Self {
        max_expansions: None,
    };

    /// Stop after `n` expansions.
    pub fn max_expansions(n: usize) -> Self {
        Self {
            max_expansions: Some(n),
        }
    }
}

/// Result of a finished search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// A minimum-cost path.
    Found(Path),
    /// Start and end are not connected.
    NoPath,
    /// The expansion bound was hit before the search could finish.
    ExceededBound { expansions: usize },
}

impl SearchOutcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Consume the outcome and return the path, if one was found.
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(p) => Some(p),
            _ => None,
        }
    }

    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Find a minimum-cost path from the grid's start to its end.
///
/// ```
/// use labyrinth_core::Grid;
/// use labyrinth_paths::{Connectivity, astar};
///
/// let grid: Grid = "S 0 0\n1 1 0\nE 0 0".parse().unwrap();
/// let path = astar(&grid, Connectivity::Four).into_path().unwrap();
/// assert_eq!(path.len(), 7);
/// assert_eq!(path.cost(), 6.0);
/// ```
pub fn astar(grid: &Grid, connectivity: Connectivity) -> SearchOutcome {
    astar_with_limits(grid, connectivity, SearchLimits::UNBOUNDED)
}

/// Like [`astar`], but gives up once `limits` are exceeded.
pub fn astar_with_limits(
    grid: &Grid,
    connectivity: Connectivity,
    limits: SearchLimits,
) -> SearchOutcome {
    let pather = GridPather::new(grid, connectivity);
    AstarSearch::new(&pather, grid.bounds(), grid.start(), grid.end())
        .with_limits(limits)
        .run()
}

/// One A* run.
///
/// Owns all per-run state (best costs, predecessors, closed flags and the
/// open heap). The heap never updates entries in place: every improvement
/// pushes a fresh entry and stale ones are dropped when popped.
///
/// The search can be driven to completion with [`run`](Self::run) or one
/// expansion at a time with [`step`](Self::step).
pub struct AstarSearch<'p, P: AstarPather> {
    pather: &'p P,
    bounds: Bounds,
    start: Cell,
    goal: Cell,
    limits: SearchLimits,
    nodes: Vec<Node>,
    open: BinaryHeap<NodeRef>,
    seq: u64,
    expansions: usize,
    status: SearchStatus,
    // scratch buffer for neighbor queries
    nbuf: Vec<Cell>,
}

impl<'p, P: AstarPather> AstarSearch<'p, P> {
    /// Prepare a search from `start` to `goal` over the cells in `bounds`.
    ///
    /// If either endpoint is outside `bounds` the search fails immediately
    /// with [`FailReason::NoPath`]. If they are equal it succeeds
    /// immediately with a single-cell path.
    pub fn new(pather: &'p P, bounds: Bounds, start: Cell, goal: Cell) -> Self {
        let mut search = Self {
            pather,
            bounds,
            start,
            goal,
            limits: SearchLimits::UNBOUNDED,
            nodes: vec![Node::default(); bounds.len()],
            open: BinaryHeap::new(),
            seq: 0,
            expansions: 0,
            status: SearchStatus::Running,
            nbuf: Vec::with_capacity(8),
        };

        let (Some(si), Some(_)) = (bounds.index(start), bounds.index(goal)) else {
            log::debug!("astar: endpoint outside {bounds}: {start} -> {goal}");
            search.status = SearchStatus::Failed(FailReason::NoPath);
            return search;
        };

        search.nodes[si].g = 0.0;
        if start == goal {
            search.nodes[si].closed = true;
            search.status = SearchStatus::Succeeded;
            return search;
        }

        let h = pather.estimate(start, goal);
        search.open.push(NodeRef {
            idx: si,
            f: h,
            h,
            seq: 0,
        });
        search
    }

    /// Apply bounds to this run.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Current state.
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Number of cells expanded so far. Stale heap entries are not counted.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Best known cost from the start to `c`, or `None` if `c` has not
    /// been reached.
    pub fn g_score(&self, c: Cell) -> Option<f64> {
        let n = &self.nodes[self.bounds.index(c)?];
        n.discovered().then_some(n.g)
    }

    /// Whether `c` has been expanded.
    pub fn is_closed(&self, c: Cell) -> bool {
        self.bounds.index(c).is_some_and(|i| self.nodes[i].closed)
    }

    /// All expanded cells in row-major order.
    pub fn closed_cells(&self) -> Vec<Cell> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.closed)
            .map(|(i, _)| self.bounds.cell(i))
            .collect()
    }

    /// The path to the goal, once the search has succeeded.
    pub fn path(&self) -> Option<Path> {
        if self.status != SearchStatus::Succeeded {
            return None;
        }
        // Both endpoints were checked against `bounds` in `new`.
        let si = self.bounds.index(self.start)?;
        let gi = self.bounds.index(self.goal)?;
        Some(reconstruct(&self.nodes, self.bounds, si, gi))
    }

    /// Perform one iteration: pop an entry and, unless it is stale, expand it.
    pub fn step(&mut self) -> SearchStatus {
        if self.status != SearchStatus::Running {
            return self.status;
        }

        let Some(current) = self.open.pop() else {
            log::debug!(
                "astar: no path {} -> {} after {} expansions",
                self.start,
                self.goal,
                self.expansions
            );
            self.status = SearchStatus::Failed(FailReason::NoPath);
            return self.status;
        };

        let ci = current.idx;
        // Skip stale entries.
        if self.nodes[ci].closed {
            return self.status;
        }

        if self
            .limits
            .max_expansions
            .is_some_and(|max| self.expansions >= max)
        {
            log::debug!("astar: expansion bound {} reached", self.expansions);
            self.status = SearchStatus::Failed(FailReason::ExceededBound);
            return self.status;
        }

        self.nodes[ci].closed = true;
        self.expansions += 1;
        let cp = self.bounds.cell(ci);
        let current_g = self.nodes[ci].g;
        log::trace!("astar: expand {cp} g={current_g} f={}", current.f);

        if cp == self.goal {
            log::debug!(
                "astar: reached {} with cost {current_g} after {} expansions",
                self.goal,
                self.expansions
            );
            self.status = SearchStatus::Succeeded;
            return self.status;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.bounds.index(np) else {
                continue;
            };
            let tentative = current_g + self.pather.cost(cp, np);

            let n = &mut self.nodes[ni];
            if tentative >= n.g {
                continue;
            }
            if n.closed {
                report_reopen(cp, np, n.g, tentative);
                continue;
            }

            n.g = tentative;
            n.parent = ci;
            let h = self.pather.estimate(np, self.goal);
            self.seq += 1;
            self.open.push(NodeRef {
                idx: ni,
                f: tentative + h,
                h,
                seq: self.seq,
            });
        }

        self.nbuf = nbuf;
        self.status
    }

    /// Step until the search finishes.
    pub fn run(&mut self) -> SearchOutcome {
        loop {
            match self.step() {
                SearchStatus::Running => continue,
                SearchStatus::Succeeded => {
                    return self.path().map_or(SearchOutcome::NoPath, SearchOutcome::Found);
                }
                SearchStatus::Failed(FailReason::NoPath) => return SearchOutcome::NoPath,
                SearchStatus::Failed(FailReason::ExceededBound) => {
                    return SearchOutcome::ExceededBound {
                        expansions: self.expansions,
                    };
                }
            }
        }
    }
}

/// A cheaper route to an already closed cell means the heuristic is not
/// consistent with the pather's costs. Differences within floating-point
/// rounding of the accumulated cost are ignored.
fn report_reopen(from: Cell, to: Cell, closed_g: f64, tentative: f64) {
    let tolerance = closed_g.abs().max(1.0) * 1e-9;
    if closed_g - tentative > tolerance {
        log::error!(
            "astar: closed cell {to} improved via {from} ({closed_g} -> {tentative}); \
             heuristic is inconsistent"
        );
        debug_assert!(false, "closed cell {to} would need reopening");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::cost_map;
    use labyrinth_core::Terrain;
    use proptest::prelude::*;
    use std::f64::consts::SQRT_2;

    const EXAMPLE: &str = "\
S 0 1 0 0
0 0 1 0 1
0 2 0 0 0
1 0 0 E 1";

    fn grid(s: &str) -> Grid {
        s.parse().unwrap()
    }

    fn cells(v: &[(i32, i32)]) -> Vec<Cell> {
        v.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn example_grid_four_way() {
        let g = grid(EXAMPLE);
        let path = astar(&g, Connectivity::Four).into_path().unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.cost(), 7.0);
        assert_eq!(path.start(), Some(g.start()));
        assert_eq!(path.end(), Some(g.end()));
        assert_eq!(
            path.cells(),
            cells(&[(0, 0), (1, 0), (2, 0), (2, 1), (3, 1), (3, 2), (3, 3)])
        );
    }

    #[test]
    fn unweighted_cost_equals_manhattan() {
        let g = grid("S 0 0 0\n0 0 0 0\n0 0 0 E");
        let path = astar(&g, Connectivity::Four).into_path().unwrap();
        assert_eq!(path.cost(), 5.0);
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn weight_is_avoided_when_cheaper() {
        // Straight through the 9 costs 10; around it costs 4.
        let g = grid("0 0 0\nS 9 E\n0 0 0");
        let path = astar(&g, Connectivity::Four).into_path().unwrap();
        assert_eq!(path.cost(), 4.0);
        assert!(!path.cells().contains(&Cell::new(1, 1)));
    }

    #[test]
    fn wall_means_no_path() {
        let g = grid(
            "S 0 # 0 0\n\
             0 0 1 0 0\n\
             0 0 # 0 0\n\
             0 0 1 0 E",
        );
        assert_eq!(astar(&g, Connectivity::Four), SearchOutcome::NoPath);
        assert_eq!(astar(&g, Connectivity::Eight), SearchOutcome::NoPath);
    }

    #[test]
    fn diagonal_gap_only_passable_in_eight_way() {
        let g = grid("S 1\n1 E");
        assert_eq!(astar(&g, Connectivity::Four), SearchOutcome::NoPath);
        let path = astar(&g, Connectivity::Eight).into_path().unwrap();
        assert_eq!(path.cells(), cells(&[(0, 0), (1, 1)]));
        assert_eq!(path.cost(), SQRT_2);
    }

    #[test]
    fn diagonal_shortcut_is_cheaper() {
        let g = grid("S 0 0\n0 0 0\n0 0 E");
        let four = astar(&g, Connectivity::Four).into_path().unwrap();
        let eight = astar(&g, Connectivity::Eight).into_path().unwrap();
        assert_eq!(four.cost(), 4.0);
        assert_eq!(eight.cost(), 2.0 * SQRT_2);
        assert!(eight.cost() < four.cost());
        assert_eq!(eight.cells(), cells(&[(0, 0), (1, 1), (2, 2)]));
    }

    #[test]
    fn example_grid_eight_way() {
        let g = grid(EXAMPLE);
        let four = astar(&g, Connectivity::Four).into_path().unwrap();
        let eight = astar(&g, Connectivity::Eight).into_path().unwrap();
        assert!(eight.cost() < four.cost());
        let pather = GridPather::new(&g, Connectivity::Eight);
        let diagonal_steps = eight
            .cells()
            .windows(2)
            .filter(|w| (w[1] - w[0]).is_diagonal())
            .count();
        assert!(diagonal_steps >= 1);
        assert_eq!(eight.walk_cost(&pather), eight.cost());
    }

    #[test]
    fn start_equals_goal_is_trivial() {
        let g = grid("S 1\n1 E");
        let pather = GridPather::new(&g, Connectivity::Four);
        let c = Cell::new(0, 1);
        let mut search = AstarSearch::new(&pather, g.bounds(), c, c);
        assert_eq!(search.status(), SearchStatus::Succeeded);
        let path = search.run().into_path().unwrap();
        assert_eq!(path.cells(), &[c]);
        assert_eq!(path.cost(), 0.0);
        assert_eq!(search.expansions(), 0);
    }

    #[test]
    fn endpoint_outside_bounds_fails() {
        let g = grid("S E");
        let pather = GridPather::new(&g, Connectivity::Four);
        let mut search = AstarSearch::new(&pather, g.bounds(), g.start(), Cell::new(5, 5));
        assert_eq!(search.status(), SearchStatus::Failed(FailReason::NoPath));
        assert_eq!(search.run(), SearchOutcome::NoPath);
    }

    #[test]
    fn step_drives_state_machine() {
        let g = grid("S 0 E");
        let pather = GridPather::new(&g, Connectivity::Four);
        let mut search = AstarSearch::new(&pather, g.bounds(), g.start(), g.end());
        assert_eq!(search.status(), SearchStatus::Running);
        assert_eq!(search.step(), SearchStatus::Running);
        assert!(search.is_closed(g.start()));
        assert_eq!(search.g_score(Cell::new(0, 1)), Some(1.0));
        assert_eq!(search.g_score(g.end()), None);
        assert_eq!(search.step(), SearchStatus::Running);
        assert_eq!(search.step(), SearchStatus::Succeeded);
        assert_eq!(search.expansions(), 3);
        // Further steps are no-ops.
        assert_eq!(search.step(), SearchStatus::Succeeded);
        assert_eq!(search.closed_cells(), cells(&[(0, 0), (0, 1), (0, 2)]));
        assert_eq!(search.path().unwrap().cost(), 2.0);
    }

    #[test]
    fn path_unavailable_before_success() {
        let g = grid("S 0 E");
        let pather = GridPather::new(&g, Connectivity::Four);
        let search = AstarSearch::new(&pather, g.bounds(), g.start(), g.end());
        assert!(search.path().is_none());
    }

    #[test]
    fn expansion_bound_is_distinct_from_no_path() {
        let g = grid("S 0 0 0 0 0 E");
        let out = astar_with_limits(&g, Connectivity::Four, SearchLimits::max_expansions(3));
        assert_eq!(out, SearchOutcome::ExceededBound { expansions: 3 });
        assert!(!out.is_found());
        assert!(out.path().is_none());

        // Enough budget: the goal itself is the seventh expansion.
        let out = astar_with_limits(&g, Connectivity::Four, SearchLimits::max_expansions(7));
        assert_eq!(out.into_path().unwrap().cost(), 6.0);
    }

    #[test]
    fn stale_entries_are_not_expansions() {
        // (2, 1) is first reached through the 9 at (1, 1), later more cheaply
        // from (2, 2); its first heap entry goes stale and is skipped.
        let g = grid("0 0 S\n0 9 9\n1 0 0\nE 9 0");
        let pather = GridPather::new(&g, Connectivity::Four);
        let mut search = AstarSearch::new(&pather, g.bounds(), g.start(), g.end());
        let path = search.run().into_path().unwrap();
        assert_eq!(path.cost(), 21.0);
        assert_eq!(search.expansions(), 11);
        assert_eq!(search.closed_cells().len(), search.expansions());
    }

    #[test]
    fn ties_are_broken_deterministically() {
        let g = grid("S 0 0\n0 0 0\n0 0 E");
        let a = astar(&g, Connectivity::Four);
        let b = astar(&g, Connectivity::Four);
        assert_eq!(a, b);
        assert_eq!(
            a.into_path().unwrap().cells(),
            cells(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)])
        );
    }

    #[test]
    fn grid_can_be_searched_from_many_threads() {
        let g = grid(EXAMPLE);
        let expected = astar(&g, Connectivity::Eight);
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| astar(&g, Connectivity::Eight)))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    fn arb_fill() -> impl Strategy<Value = Terrain> {
        prop_oneof![
            5 => Just(Terrain::Free),
            3 => Just(Terrain::Obstacle),
            2 => (Terrain::MIN_WEIGHT..=Terrain::MAX_WEIGHT).prop_map(Terrain::Weight),
        ]
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..7, 2usize..7)
            .prop_flat_map(|(rows, cols)| {
                let len = rows * cols;
                (
                    Just(cols),
                    prop::collection::vec(arb_fill(), len),
                    0..len,
                    0..len - 1,
                )
            })
            .prop_map(|(cols, mut fill, s, e)| {
                let e = if e >= s { e + 1 } else { e };
                fill[s] = Terrain::Start;
                fill[e] = Terrain::End;
                Grid::new(fill.chunks(cols).map(<[Terrain]>::to_vec).collect()).unwrap()
            })
    }

    fn arb_connectivity() -> impl Strategy<Value = Connectivity> {
        prop_oneof![Just(Connectivity::Four), Just(Connectivity::Eight)]
    }

    const EPS: f64 = 1e-9;

    proptest! {
        #[test]
        fn path_is_optimal(g in arb_grid(), conn in arb_connectivity()) {
            let pather = GridPather::new(&g, conn);
            let best = cost_map(&pather, g.bounds(), g.start()).at(g.end());
            match astar(&g, conn) {
                SearchOutcome::Found(path) => {
                    prop_assert!(best.is_finite());
                    prop_assert!((path.cost() - best).abs() < EPS,
                        "astar {} vs dijkstra {}", path.cost(), best);
                }
                SearchOutcome::NoPath => prop_assert!(best.is_infinite()),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }

        #[test]
        fn path_is_well_formed(g in arb_grid(), conn in arb_connectivity()) {
            let pather = GridPather::new(&g, conn);
            if let SearchOutcome::Found(path) = astar(&g, conn) {
                prop_assert_eq!(path.start(), Some(g.start()));
                prop_assert_eq!(path.end(), Some(g.end()));
                for w in path.cells().windows(2) {
                    prop_assert!(conn.offsets().contains(&(w[1] - w[0])));
                    prop_assert!(g.is_passable(w[1]));
                }
                // Forward re-walk reproduces the search's g score exactly.
                prop_assert_eq!(path.walk_cost(&pather), path.cost());
            }
        }

        #[test]
        fn heuristic_is_admissible(g in arb_grid(), conn in arb_connectivity()) {
            let pather = GridPather::new(&g, conn);
            for c in g.bounds() {
                if !g.is_passable(c) {
                    continue;
                }
                let remaining = cost_map(&pather, g.bounds(), c).at(g.end());
                if remaining.is_finite() {
                    prop_assert!(pather.estimate(c, g.end()) <= remaining + EPS);
                }
            }
        }

        #[test]
        fn expansions_never_exceed_cell_count(g in arb_grid(), conn in arb_connectivity()) {
            let pather = GridPather::new(&g, conn);
            let mut search = AstarSearch::new(&pather, g.bounds(), g.start(), g.end());
            search.run();
            prop_assert!(search.expansions() <= g.bounds().len());
        }
    }
}
