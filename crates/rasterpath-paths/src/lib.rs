//! Pathfinding on walkability grids.
//!
//! The centrepiece is an 8-connected A\* search ([`find_path`], [`Astar`])
//! that reports the exact order in which cells were expanded alongside the
//! path, with deterministic tie-breaking so that the trace is reproducible.
//!
//! Supporting searches:
//!
//! - **Dijkstra** multi-source cost maps ([`cost_map`])
//! - **Flood fill** of a connected walkable component ([`component`])
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | flood fill |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! `Grid<bool>` implements all three with the 8-connected move set and a
//! Euclidean estimate.

mod astar;
mod cc;
mod dijkstra;
mod distance;
mod moves;
mod search;
mod traits;

pub use astar::{Astar, find_path};
pub use cc::component;
pub use dijkstra::{CostMap, cost_map};
pub use distance::{euclidean, manhattan};
pub use moves::{MOVES, Move, path_cost, step_cost};
pub use search::{NoPath, Outcome, Path, Search};
pub use traits::{AstarPather, Pather, WeightedPather};
