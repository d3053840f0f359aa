//! Shared type definitions for the arena simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Types defined here flow downstream to `TypeScript` via
//! `ts-rs` for the browser client.
//!
//! # Modules
//!
//! - [`ids`] -- Identifiers for actors, areas, and item definitions
//! - [`enums`] -- Enumeration types (biomes, map sizes, item kinds, game state)
//! - [`districts`] -- The district registry
//! - [`structs`] -- The world aggregate and everything it owns
//! - [`actions`] -- Player and NPC declarations
//! - [`events`] -- Day log events and their reason codes

pub mod actions;
pub mod districts;
pub mod enums;
pub mod events;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use actions::{Action, Declaration, Intent, Movement, PlayerTurn};
pub use districts::{DISTRICT_COUNT, DISTRICTS, District, district_info};
pub use enums::{
    ActorKind, Attribute, Biome, DayPhase, DeathCause, EquipSlot, FlaskKind, GameStatus,
    ItemType, MapSize,
};
pub use events::{
    ActionFailure, DamageSource, DefendNote, Event, IntentRejection, MoveBlockReason,
    NoActionReason, NothingNote,
};
pub use ids::{ActorId, AreaId, HUB_AREA, ItemDefId, PLAYER_ID};
pub use structs::{
    Actor, Area, Attributes, DayRecord, DayScratch, Entities, Equipped, Flags, GameLog,
    Inventory, ItemStack, MapData, Replay, STAT_MAX, StatusEffect, TodayFlags, WORLD_VERSION,
    World, WorldMeta,
};
