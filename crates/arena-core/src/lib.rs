//! Day-cycle engine for the arena simulation.
//!
//! This crate turns a committed player turn plus independently generated
//! NPC intents into the next world and a day log. Every operation is a
//! pure function of its inputs: worlds are cloned, never shared, and all
//! randomness comes from salted draws on the world's seed.
//!
//! # Modules
//!
//! - [`config`] -- `arena-config.yaml` loading ([`ArenaConfig`])
//! - [`init`] -- World creation from a seed and a map
//! - [`intent`] -- NPC intent generation ([`IntentSource`])
//! - [`resolver`] -- Immediate resolution of a single action
//! - [`movement`] -- Hop and route validation
//! - [`day`] -- The end-of-day orchestrator
//! - [`engine`] -- The player-facing facade ([`Engine`]) and replay
//! - [`persistence`] -- JSON save files

pub mod config;
pub mod day;
pub mod engine;
pub mod init;
pub mod intent;
pub mod movement;
pub mod persistence;
pub mod resolver;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export primary types at crate root for convenience.
pub use config::{ArenaConfig, AutopilotConfig, AutopilotStyle, ConfigError, LoggingConfig};
pub use engine::{Engine, day_phase, game_status};
pub use init::{WorldParams, create_initial_world};
pub use intent::{IntentSource, SeededIntentGenerator, generate_npc_intents};
pub use movement::{MoveOutcome, move_actor_one_step, move_along_route};
pub use persistence::{PersistenceError, SaveFile, load_world, save_world};
pub use resolver::{Resolution, resolve_action};
