//! Pathfinding over labyrinth grids.
//!
//! - **A\*** minimum-cost path search ([`astar`], [`AstarSearch`])
//! - **Dijkstra** single-source cost maps ([`cost_map`])
//!
//! Movement follows a [`Connectivity`]: four orthogonal directions, or eight
//! with diagonal steps costing √2. Entering a weighted cell multiplies the
//! step cost by its weight. The heuristic is picked to match the mode
//! (Manhattan or octile), so A* always returns an optimal path.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbor enumeration |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`GridPather`] implements all three for a [`labyrinth_core::Grid`].

mod astar;
mod connectivity;
mod dijkstra;
mod distance;
mod node;
mod path;
mod traits;

pub use astar::{
    AstarSearch, FailReason, SearchLimits, SearchOutcome, SearchStatus, astar, astar_with_limits,
};
pub use connectivity::{Connectivity, GridPather};
pub use dijkstra::{CostMap, cost_map};
pub use distance::{Heuristic, manhattan, octile};
pub use path::Path;
pub use traits::{AstarPather, Pather, WeightedPather};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use labyrinth_core::Grid;

    #[test]
    fn outcome_round_trip() {
        let g: Grid = "S 0 2\n1 0 E".parse().unwrap();
        let out = astar(&g, Connectivity::Eight);
        let json = serde_json::to_string(&out).unwrap();
        let back: SearchOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(out, back);
    }

    #[test]
    fn connectivity_is_snake_case() {
        assert_eq!(serde_json::to_string(&Connectivity::Four).unwrap(), r#""four""#);
        assert_eq!(serde_json::to_string(&Connectivity::Eight).unwrap(), r#""eight""#);
        let back: Connectivity = serde_json::from_str(r#""eight""#).unwrap();
        assert_eq!(back, Connectivity::Eight);
    }

    #[test]
    fn limits_round_trip() {
        let limits = SearchLimits::max_expansions(12);
        let json = serde_json::to_string(&limits).unwrap();
        assert_eq!(json, r#"{"max_expansions":12}"#);
        let back: SearchLimits = serde_json::from_str(&json).unwrap();
        assert_eq!(back, limits);
    }
}
