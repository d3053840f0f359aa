//! Actor rules for the arena: items, inventory, combat math, and vitals.
//!
//! This crate contains the logic layer for actors, everything that operates
//! on a single actor without knowing about the day cycle. It sits between
//! `arena-types` (the data) and `arena-core` (the orchestration).
//!
//! # Modules
//!
//! - [`catalog`] -- Item definitions and the [`ItemCatalog`] lookup interface
//! - [`combat`] -- Strike planning, shield interaction, defend reduction
//! - [`config`] -- Tunable rules ([`RulesConfig`])
//! - [`error`] -- Error types for inventory operations ([`AgentError`])
//! - [`inventory`] -- Slot-bounded stacks and equipment
//! - [`spawn`] -- Seeded attributes, districts, and names
//! - [`vitals`] -- Damage, healing, poison, stamina upkeep

pub mod catalog;
pub mod combat;
pub mod config;
pub mod error;
pub mod inventory;
pub mod spawn;
pub mod vitals;

// Re-export primary types at crate root for convenience.
pub use catalog::{
    ConsumableEffect, ItemCatalog, ItemDefinition, StandardCatalog, WeaponFailure, WeaponStats,
};
pub use combat::{ShieldOutcome, Strike, defend_reduction, plan_strike, shield_outcome};
pub use config::RulesConfig;
pub use error::AgentError;
