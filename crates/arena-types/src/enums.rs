//! Enumeration types shared across the arena workspace.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Terrain painted onto an area by the map generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Biome {
    /// Open grassland.
    Plains,
    /// Dense woodland.
    Forest,
    /// Tropical undergrowth.
    Jungle,
    /// Wetland; usually carries water.
    Swamp,
    /// Open water.
    Lake,
    /// Dry sand and rock.
    Desert,
    /// High rocky terrain.
    Mountain,
    /// Frozen ground.
    Tundra,
    /// The central supply hub.
    Cornucopia,
}

impl Biome {
    /// Biomes the fixture map builder draws from, excluding the hub.
    pub const WILD: [Self; 8] = [
        Self::Plains,
        Self::Forest,
        Self::Jungle,
        Self::Swamp,
        Self::Lake,
        Self::Desert,
        Self::Mountain,
        Self::Tundra,
    ];

    /// Whether this biome naturally holds water.
    pub const fn is_wet(self) -> bool {
        matches!(self, Self::Swamp | Self::Lake)
    }
}

/// Supported arena sizes, expressed as the number of areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum MapSize {
    /// 24 areas.
    Small,
    /// 48 areas.
    Medium,
    /// 72 areas.
    Large,
}

impl MapSize {
    /// Number of areas for this map size.
    pub const fn area_count(self) -> u32 {
        match self {
            Self::Small => 24,
            Self::Medium => 48,
            Self::Large => 72,
        }
    }

    /// Map an area count back to a size, if it matches one exactly.
    pub const fn from_area_count(count: u32) -> Option<Self> {
        match count {
            24 => Some(Self::Small),
            48 => Some(Self::Medium),
            72 => Some(Self::Large),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

/// Whether an actor is the human player or an autonomous tribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ActorKind {
    /// The human-controlled actor.
    Player,
    /// An AI-controlled tribute.
    Npc,
}

/// One of the three creation attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Attribute {
    /// Raw strength (`F`).
    #[serde(rename = "F")]
    Strength,
    /// Dexterity (`D`).
    #[serde(rename = "D")]
    Dexterity,
    /// Perception (`P`).
    #[serde(rename = "P")]
    Perception,
}

/// The hidden nature of a flask, fixed when it is picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum FlaskKind {
    /// Cures poison or heals.
    Medicine,
    /// Kills whoever drinks it.
    Poison,
}

/// How an actor died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DeathCause {
    /// Killed by another actor's strike.
    Combat,
    /// Killed by the environment.
    Hazard,
    /// Killed by a poison status tick or a poisoned flask.
    Poison,
    /// Killed by their own weapon (grenade blast).
    SelfInflicted,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Broad category of an item definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ItemType {
    /// Equippable in the weapon slot.
    Weapon,
    /// Equippable in the defense slot.
    Defense,
    /// Used up by `USE_ITEM`.
    Consumable,
    /// Opened on pickup, replaced by its contents.
    Container,
    /// Consumed by ranged weapons.
    Ammo,
}

/// Equipment slot an item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EquipSlot {
    /// The weapon slot.
    Weapon,
    /// The defense slot.
    Defense,
}

// ---------------------------------------------------------------------------
// Day state
// ---------------------------------------------------------------------------

/// Where the current day stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DayPhase {
    /// The player has not committed a combat action yet.
    Open,
    /// The player committed; the day can be ended.
    ReadyToEnd,
}

/// Overall state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GameStatus {
    /// The player is alive and at least one tribute remains.
    Running,
    /// The player has been eliminated.
    PlayerDead,
    /// The player is the last actor alive.
    Victory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_sizes_round_trip_through_area_count() {
        for size in [MapSize::Small, MapSize::Medium, MapSize::Large] {
            assert_eq!(MapSize::from_area_count(size.area_count()), Some(size));
        }
        assert_eq!(MapSize::from_area_count(30), None);
    }

    #[test]
    fn attributes_serialize_as_letters() {
        let json = serde_json::to_string(&Attribute::Dexterity).unwrap_or_default();
        assert_eq!(json, "\"D\"");
    }

    #[test]
    fn only_swamp_and_lake_are_wet() {
        let wet: Vec<Biome> = Biome::WILD.iter().copied().filter(|b| b.is_wet()).collect();
        assert_eq!(wet, vec![Biome::Swamp, Biome::Lake]);
    }
}
