//! Map queries, deterministic randomness, and closures for the arena.
//!
//! # Modules
//!
//! - [`rng`] -- Salted hash-to-float draws; no generator state.
//! - [`area_graph`] -- Adjacency, enterability, bounded BFS, shortest routes.
//! - [`closure`] -- Daily closure application and batch scheduling.
//! - [`starting_map`] -- Seeded lattice map for runs without an external map.
//! - [`error`] -- Error types for map construction.

pub mod area_graph;
pub mod closure;
pub mod error;
pub mod rng;
pub mod starting_map;

// Re-export primary types at crate root.
pub use area_graph::AreaGraph;
pub use closure::{ClosureReport, ClosureSchedule, apply_closures_for_day};
pub use error::WorldError;
pub use rng::{DayRng, random, random_unscoped, scale_inclusive, scale_index};
pub use starting_map::build_grid_map;
