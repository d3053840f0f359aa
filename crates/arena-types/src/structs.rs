//! Core entity structs: the world aggregate, actors, areas, and items.
//!
//! Field names serialize in camelCase so a saved world keeps the same
//! structural shape the browser client reads (`areasById`, `visitedAreas`,
//! `willCloseOnDay`, ...). Everything here is plain data: no functions,
//! no cycles, safe to clone and round-trip through JSON.

use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::actions::Declaration;
use crate::enums::{ActorKind, Attribute, Biome, FlaskKind};
use crate::events::Event;
use crate::ids::{ActorId, AreaId, ItemDefId};

/// Upper bound for hit points and stamina.
pub const STAT_MAX: u32 = 100;

/// Current world schema version.
pub const WORLD_VERSION: u32 = 2;

const fn default_true() -> bool {
    true
}

const fn default_qty() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// A node of the map graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Area {
    /// Area identifier.
    pub id: AreaId,
    /// Painted terrain.
    pub biome: Biome,
    /// Whether entering requires a bridge.
    pub has_water: bool,
    /// Whether a bridge crosses the water.
    pub has_bridge: bool,
    /// Whether food can be found here.
    pub has_food: bool,
    /// Inactive areas cannot be entered; occupants are not evicted.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Day on which this area becomes inactive, once scheduled.
    #[serde(default)]
    pub will_close_on_day: Option<u32>,
    /// Items lying on the ground, in pickup order.
    #[serde(default)]
    pub ground_items: Vec<ItemStack>,
}

impl Area {
    /// A fresh, active area with no water, food, or items.
    pub const fn new(id: AreaId, biome: Biome) -> Self {
        Self {
            id,
            biome,
            has_water: false,
            has_bridge: false,
            has_food: false,
            is_active: true,
            will_close_on_day: None,
            ground_items: Vec::new(),
        }
    }

    /// Whether a closure has been scheduled but not yet applied.
    pub const fn is_closing(&self) -> bool {
        self.is_active && self.will_close_on_day.is_some()
    }
}

/// The external map: areas plus an undirected adjacency list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct MapData {
    /// All areas keyed by id.
    pub areas_by_id: BTreeMap<AreaId, Area>,
    /// Neighbours of every area.
    pub adj_by_id: BTreeMap<AreaId, Vec<AreaId>>,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// One inventory slot (or one pile on the ground).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ItemStack {
    /// Catalog definition.
    pub def_id: ItemDefId,
    /// Units in this stack.
    #[serde(default = "default_qty")]
    pub qty: u32,
    /// Remaining uses for limited-use weapons.
    #[serde(default)]
    pub uses_left: Option<u32>,
    /// Hidden nature of a flask, assigned on pickup.
    #[serde(default)]
    pub hidden_kind: Option<FlaskKind>,
    /// Whether the owner has learned `hidden_kind`.
    #[serde(default)]
    pub revealed: bool,
}

impl ItemStack {
    /// A single unit of the given definition.
    pub fn single(def_id: impl Into<ItemDefId>) -> Self {
        Self {
            def_id: def_id.into(),
            qty: 1,
            uses_left: None,
            hidden_kind: None,
            revealed: false,
        }
    }

    /// Same as [`ItemStack::single`] with an explicit quantity.
    pub fn with_qty(def_id: impl Into<ItemDefId>, qty: u32) -> Self {
        Self {
            qty,
            ..Self::single(def_id)
        }
    }
}

/// Definitions currently equipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Equipped {
    /// Equipped weapon definition.
    #[serde(rename = "weaponDefId", default)]
    pub weapon: Option<ItemDefId>,
    /// Equipped defense definition.
    #[serde(rename = "defenseDefId", default)]
    pub defense: Option<ItemDefId>,
}

/// What an actor carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Inventory {
    /// Carried stacks in pickup order.
    #[serde(default)]
    pub items: Vec<ItemStack>,
    /// Equipment slots.
    #[serde(default)]
    pub equipped: Equipped,
}

impl Inventory {
    /// Index of the first stack with the given definition.
    pub fn position(&self, def_id: &ItemDefId) -> Option<usize> {
        self.items.iter().position(|s| &s.def_id == def_id)
    }

    /// Whether any stack of the given definition is carried.
    pub fn holds(&self, def_id: &ItemDefId) -> bool {
        self.position(def_id).is_some()
    }
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

/// Creation attributes. Seven points split across three stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Attributes {
    /// Strength.
    #[serde(rename = "F")]
    pub strength: u8,
    /// Dexterity.
    #[serde(rename = "D")]
    pub dexterity: u8,
    /// Perception.
    #[serde(rename = "P")]
    pub perception: u8,
}

impl Attributes {
    /// Value of a single attribute.
    pub const fn get(self, attr: Attribute) -> u8 {
        match attr {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Perception => self.perception,
        }
    }

    /// Sum of all three attributes.
    pub const fn total(self) -> u8 {
        self.strength
            .saturating_add(self.dexterity)
            .saturating_add(self.perception)
    }
}

/// A persistent condition that ticks once per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum StatusEffect {
    /// Loses `per_day` hp at every day end until cured.
    Poison {
        /// Damage per daily tick.
        #[serde(rename = "perDay")]
        per_day: u32,
    },
}

/// The player or an NPC tribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Actor {
    /// Stable identifier.
    pub id: ActorId,
    /// Player or NPC.
    pub kind: ActorKind,
    /// Display name.
    pub name: String,
    /// Home district, 1 through 12.
    pub district: u8,
    /// Current area.
    pub area_id: AreaId,
    /// Hit points, 0 through 100.
    pub hp: u32,
    /// Stamina, 0 through 100.
    pub stamina: u32,
    /// Creation attributes, fixed for life.
    pub attrs: Attributes,
    /// Active status effects.
    #[serde(default)]
    pub status: Vec<StatusEffect>,
    /// Carried items and equipment.
    #[serde(default)]
    pub inventory: Inventory,
    /// Kills scored (only counted for the player).
    #[serde(default)]
    pub kills: u32,
}

impl Actor {
    /// Living actors have positive hit points.
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Whether this actor is the player.
    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    /// Daily damage of the active poison, if any.
    pub fn poison_per_day(&self) -> Option<u32> {
        self.status.iter().find_map(|s| match s {
            StatusEffect::Poison { per_day } => Some(*per_day),
        })
    }

    /// Whether the actor is currently poisoned.
    pub fn is_poisoned(&self) -> bool {
        self.poison_per_day().is_some()
    }
}

/// The player and the NPC registry.
///
/// The registry keeps insertion order, which is the order intents and
/// moves are resolved in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Entities {
    /// The human-controlled actor.
    pub player: Actor,
    /// NPC tributes in resolution order.
    pub npcs: IndexMap<ActorId, Actor>,
}

// ---------------------------------------------------------------------------
// Flags, log, replay, scratch
// ---------------------------------------------------------------------------

/// Player exploration and closure bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Flags {
    /// Areas the player has stood in, sorted.
    pub visited_areas: BTreeSet<AreaId>,
    /// Areas that have closed, sorted.
    pub closed_areas: BTreeSet<AreaId>,
}

/// Everything that happened during one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DayRecord {
    /// The day these events belong to.
    pub day: u32,
    /// Events in the order they happened.
    pub events: Vec<Event>,
}

/// Append-only history of finished days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameLog {
    /// One record per finished day.
    pub days: Vec<DayRecord>,
}

/// Player declarations per day, enough to rebuild a game from its seed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Replay {
    /// Index `day - 1` holds that day's declarations in commit order.
    pub player_actions_by_day: Vec<Vec<Declaration>>,
}

/// Ephemeral per-actor flags for the current day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TodayFlags {
    /// Shield raised by this actor's latest combat action.
    pub defended_with_shield: bool,
    /// Camouflaged until the day ends.
    pub invisible: bool,
    /// Shield broken by an axe; unusable until the day ends.
    pub shield_broken: bool,
    /// Item actions taken today, used to keep their draws distinct.
    pub item_actions: u32,
}

/// Scratch state that lives for one day and is cleared when it ends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DayScratch {
    /// Flags per actor; absent means all defaults.
    pub flags: BTreeMap<ActorId, TodayFlags>,
    /// Whether the player's combat action for the day is in.
    pub player_committed: bool,
    /// Whether the player's movement for the day is in.
    pub player_moved: bool,
    /// Events produced by the player's commits, awaiting the day's end.
    pub events: Vec<Event>,
}

/// Scalar metadata about the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct WorldMeta {
    /// Schema version.
    pub version: u32,
    /// Seed every draw derives from.
    pub seed: u64,
    /// Current day, starting at 1.
    pub day: u32,
    /// Number of areas requested at creation.
    pub map_size: u32,
    /// Player plus NPCs.
    pub total_players: u32,
}

/// The root aggregate.
///
/// Every engine operation takes a `&World` and returns a new one, so any
/// retained value is a valid snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct World {
    /// Seed, day counter, and sizes.
    pub meta: WorldMeta,
    /// The map graph.
    pub map: MapData,
    /// Player and NPCs.
    pub entities: Entities,
    /// Visited and closed areas.
    pub flags: Flags,
    /// Finished days.
    pub log: GameLog,
    /// Player declarations per day.
    #[serde(default)]
    pub replay: Replay,
    /// Per-day scratch, cleared at day end.
    #[serde(default)]
    pub today: DayScratch,
}

impl World {
    /// Look up an actor by id.
    pub fn actor(&self, id: &ActorId) -> Option<&Actor> {
        if id.is_player() {
            Some(&self.entities.player)
        } else {
            self.entities.npcs.get(id)
        }
    }

    /// Look up an actor by id, mutably.
    pub fn actor_mut(&mut self, id: &ActorId) -> Option<&mut Actor> {
        if id.is_player() {
            Some(&mut self.entities.player)
        } else {
            self.entities.npcs.get_mut(id)
        }
    }

    /// All actors: the player first, then NPCs in registry order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        core::iter::once(&self.entities.player).chain(self.entities.npcs.values())
    }

    /// Ids of living actors standing in `area`, in registry order.
    pub fn living_in(&self, area: AreaId) -> Vec<ActorId> {
        self.actors()
            .filter(|a| a.is_alive() && a.area_id == area)
            .map(|a| a.id.clone())
            .collect()
    }

    /// Number of living actors.
    pub fn living_count(&self) -> usize {
        self.actors().filter(|a| a.is_alive()).count()
    }

    /// Look up an area by id.
    pub fn area(&self, id: AreaId) -> Option<&Area> {
        self.map.areas_by_id.get(&id)
    }

    /// Look up an area by id, mutably.
    pub fn area_mut(&mut self, id: AreaId) -> Option<&mut Area> {
        self.map.areas_by_id.get_mut(&id)
    }

    /// Today's flags for an actor (defaults when none were set).
    pub fn today(&self, id: &ActorId) -> TodayFlags {
        self.today.flags.get(id).copied().unwrap_or_default()
    }

    /// Today's flags for an actor, created on first access.
    pub fn today_mut(&mut self, id: &ActorId) -> &mut TodayFlags {
        self.today.flags.entry(id.clone()).or_default()
    }
}
