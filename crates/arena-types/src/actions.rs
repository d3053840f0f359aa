//! Declarations an actor can make for a day.
//!
//! A day has two slots. Action-1 is the combat or item action
//! ([`Action`]); Action-2 is positioning ([`Movement`]). The player commits
//! both through the engine. NPCs declare both as [`Intent`]s produced by the
//! intent generator.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{ActorId, AreaId};

/// Action-1: what an actor does with their day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Action {
    /// Strike a co-located actor.
    Attack {
        /// The actor being attacked.
        #[serde(rename = "targetId")]
        target_id: ActorId,
    },
    /// Brace for incoming attacks, raising a shield if one is equipped.
    Defend,
    /// Do nothing and hope for the best.
    Nothing,
    /// Pick up an item from the ground of the current area.
    Collect {
        /// Index into the area's ground items.
        #[serde(rename = "itemIndex")]
        item_index: usize,
    },
    /// Use a consumable from the inventory.
    UseItem {
        /// Index into the user's inventory.
        #[serde(rename = "itemIndex")]
        item_index: usize,
        /// Who the item is applied to; the user when absent.
        #[serde(rename = "targetId", default)]
        target_id: Option<ActorId>,
    },
}

impl Action {
    /// Item actions do not use up the day's combat slot.
    pub const fn is_item_action(&self) -> bool {
        matches!(self, Self::Collect { .. } | Self::UseItem { .. })
    }
}

/// Action-2: where an actor goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Movement {
    /// Walk a route, one hop per element.
    Move {
        /// Areas to enter, in order. A single far destination is expanded
        /// into a shortest route by the orchestrator.
        route: Vec<AreaId>,
    },
    /// Stay put.
    Stay,
    /// Stay put and recover stamina.
    Rest,
}

impl Movement {
    /// Final area of a move, if any.
    pub fn destination(&self) -> Option<AreaId> {
        match self {
            Self::Move { route } => route.last().copied(),
            Self::Stay | Self::Rest => None,
        }
    }
}

/// One entry of a day's declaration list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Declaration {
    /// An Action-1 declaration.
    Action(Action),
    /// An Action-2 declaration.
    Movement(Movement),
    /// An explicit equip of the inventory item at this index.
    Equip(usize),
}

/// A declaration tagged with the actor who made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Intent {
    /// Declaring actor.
    pub source: ActorId,
    /// What they declared.
    pub declaration: Declaration,
}

impl Intent {
    /// An Action-1 intent.
    pub const fn action(source: ActorId, action: Action) -> Self {
        Self {
            source,
            declaration: Declaration::Action(action),
        }
    }

    /// An Action-2 intent.
    pub const fn movement(source: ActorId, movement: Movement) -> Self {
        Self {
            source,
            declaration: Declaration::Movement(movement),
        }
    }
}

/// Everything the player declares for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerTurn {
    /// Free item actions taken before the combat action.
    #[serde(default)]
    pub item_actions: Vec<Action>,
    /// The day's combat action.
    pub action: Action,
    /// The day's movement.
    pub movement: Movement,
}

impl PlayerTurn {
    /// A turn with no item actions.
    pub const fn new(action: Action, movement: Movement) -> Self {
        Self {
            item_actions: Vec::new(),
            action,
            movement,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_with_kind_tag() {
        let json = serde_json::to_value(Action::Attack {
            target_id: ActorId::npc(4),
        })
        .unwrap();
        assert_eq!(json["kind"], "ATTACK");
        assert_eq!(json["targetId"], "npc_4");
    }

    #[test]
    fn use_item_target_defaults_to_self() {
        let action: Action = serde_json::from_str(r#"{"kind":"USE_ITEM","itemIndex":2}"#).unwrap();
        assert_eq!(
            action,
            Action::UseItem {
                item_index: 2,
                target_id: None
            }
        );
        assert!(action.is_item_action());
    }

    #[test]
    fn move_destination_is_last_hop() {
        let m = Movement::Move {
            route: vec![AreaId(4), AreaId(9)],
        };
        assert_eq!(m.destination(), Some(AreaId(9)));
        assert_eq!(Movement::Rest.destination(), None);
    }
}
