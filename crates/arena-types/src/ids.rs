//! Strongly-typed identifiers for actors, areas, and item definitions.
//!
//! Actor and item identifiers are short stable strings (`"player"`,
//! `"npc_3"`, `"axe"`) so that saved worlds stay readable and salts built
//! from them stay stable across versions. Area identifiers are the numeric
//! ids handed out by the map generator.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_name_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_name_id! {
    /// Unique identifier for an actor (the player or an NPC tribute).
    ActorId
}

define_name_id! {
    /// Identifier of an item definition in the item catalog.
    ItemDefId
}

/// The fixed identifier of the human-controlled actor.
pub const PLAYER_ID: &str = "player";

impl ActorId {
    /// The identifier of the player actor.
    pub fn player() -> Self {
        Self::new(PLAYER_ID)
    }

    /// Identifier of the `n`-th NPC (`npc_1`, `npc_2`, ...).
    pub fn npc(n: u32) -> Self {
        Self(format!("npc_{n}"))
    }

    /// Whether this identifier names the player.
    pub fn is_player(&self) -> bool {
        self.0 == PLAYER_ID
    }
}

/// Numeric identifier of an area (a node in the map graph).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct AreaId(pub u32);

/// The safe hub area where every actor starts and stamina is restored.
pub const HUB_AREA: AreaId = AreaId(1);

impl AreaId {
    /// Return the inner numeric id.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether this is the hub area.
    pub const fn is_hub(self) -> bool {
        self.0 == HUB_AREA.0
    }
}

impl core::fmt::Display for AreaId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AreaId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}
