//! Observable occurrences produced while a day is played.
//!
//! Events are tagged records (`{"type": "MOVE", ...}`) appended to the
//! day's list in the order they happen and never mutated afterwards.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{DeathCause, EquipSlot, FlaskKind};
use crate::ids::{ActorId, AreaId, ItemDefId};

// ---------------------------------------------------------------------------
// Reason codes
// ---------------------------------------------------------------------------

/// Why an actor's action was not processed at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NoActionReason {
    /// The player is dead.
    PlayerDead,
    /// A non-player actor is dead.
    ActorDead,
    /// The actor does not exist.
    MissingActor,
    /// The player already committed today's combat action.
    AlreadyCommitted,
}

/// Why an attack, collect, or item use failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ActionFailure {
    /// Target missing, dead, self, or elsewhere.
    NoValidTarget,
    /// Target is camouflaged today.
    TargetHidden,
    /// The area has no ground items.
    NothingHere,
    /// Index does not point at an item.
    BadIndex,
    /// The inventory is at capacity.
    InventoryFull,
    /// The item cannot be used.
    NotConsumable,
    /// The item has no equipment slot.
    NotEquippable,
    /// The target refused the item.
    TargetDeclined,
}

/// Extra detail on a successful defend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DefendNote {
    /// Nobody else stands in the area.
    NoThreats,
    /// Others were present but nobody attacked.
    NoAttack,
}

/// Extra detail on a day of doing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NothingNote {
    /// A co-located actor struck first.
    CaughtOffGuard,
    /// The environment hurt the actor.
    Hazard,
    /// Nothing happened.
    QuietDayMoment,
}

/// Why a single movement hop was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum MoveBlockReason {
    /// The area being left has closed.
    StartAreaClosed,
    /// The destination is not a neighbour.
    NotAdjacent,
    /// The destination does not exist.
    MissingArea,
    /// The destination has closed.
    AreaClosed,
    /// The destination is water without a bridge.
    WaterNoBridge,
    /// The route has more hops than the actor's step budget.
    RouteTooLong,
}

/// Why an NPC intent was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum IntentRejection {
    /// The intent's source is not in the registry.
    UnknownSource,
    /// A move with an empty route.
    EmptyRoute,
    /// No enterable route leads to the destination.
    NoRoute,
}

/// Who or what dealt damage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum DamageSource {
    /// Another actor.
    Actor(ActorId),
    /// The environment.
    Hazard,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// One entry in a day's event list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Event {
    /// The action was skipped entirely.
    NoAction {
        /// Actor whose action was skipped.
        who: ActorId,
        /// Why.
        reason: NoActionReason,
    },
    /// An attack was attempted.
    Attack {
        /// Attacker.
        who: ActorId,
        /// Whether the strike was carried out.
        ok: bool,
        /// Target of the strike.
        target: Option<ActorId>,
        /// Damage that landed.
        #[serde(rename = "dmgDealt")]
        dmg_dealt: u32,
        /// Failure reason when `ok` is false.
        reason: Option<ActionFailure>,
    },
    /// An actor took damage they did not initiate.
    DamageReceived {
        /// Victim.
        who: ActorId,
        /// Source of the damage.
        from: DamageSource,
        /// Damage applied.
        dmg: u32,
        /// Damage before defending halved it.
        #[serde(rename = "reducedFrom")]
        reduced_from: Option<u32>,
    },
    /// A raised shield absorbed a strike.
    ShieldBlocked {
        /// Shield bearer.
        who: ActorId,
        /// Striker.
        attacker: ActorId,
    },
    /// An axe split a raised shield.
    ShieldBroken {
        /// Shield bearer.
        who: ActorId,
        /// Striker.
        attacker: ActorId,
    },
    /// A piercing weapon went through a raised shield.
    ShieldPierced {
        /// Shield bearer.
        who: ActorId,
        /// Striker.
        attacker: ActorId,
    },
    /// A poison status was applied.
    Poisoned {
        /// Victim.
        who: ActorId,
        /// Poisoner.
        by: ActorId,
        /// Damage per day.
        #[serde(rename = "perDay")]
        per_day: u32,
    },
    /// A limited-use weapon ran out and was removed.
    WeaponSpent {
        /// Owner.
        who: ActorId,
        /// Spent item.
        item: ItemDefId,
    },
    /// A weapon hurt its own user.
    SelfDamage {
        /// User.
        who: ActorId,
        /// Weapon used.
        item: ItemDefId,
        /// Damage taken.
        dmg: u32,
    },
    /// An actor's hp reached zero.
    Death {
        /// Deceased.
        who: ActorId,
        /// Where they fell.
        #[serde(rename = "areaId")]
        area_id: AreaId,
        /// What killed them.
        cause: DeathCause,
    },
    /// An actor defended.
    Defend {
        /// Defender.
        who: ActorId,
        /// Always true; defending cannot fail.
        ok: bool,
        /// Whether a shield was raised.
        shield: bool,
        /// How the defence played out.
        note: Option<DefendNote>,
    },
    /// An actor did nothing.
    Nothing {
        /// Idle actor.
        who: ActorId,
        /// Always true.
        ok: bool,
        /// What happened meanwhile.
        note: NothingNote,
    },
    /// A ground item pickup was attempted.
    Collect {
        /// Collector.
        who: ActorId,
        /// Whether an item was picked up.
        ok: bool,
        /// Item picked up.
        item: Option<ItemDefId>,
        /// Failure reason when `ok` is false.
        reason: Option<ActionFailure>,
    },
    /// A backpack was opened into its contents.
    BackpackOpened {
        /// Collector.
        who: ActorId,
        /// Items placed in the inventory.
        items: Vec<ItemDefId>,
        /// Items dropped back on the ground for lack of room.
        dropped: Vec<ItemDefId>,
    },
    /// An inventory item use was attempted.
    UseItem {
        /// User.
        who: ActorId,
        /// Whether the item was used.
        ok: bool,
        /// Item involved.
        item: Option<ItemDefId>,
        /// Who it was applied to.
        target: Option<ActorId>,
        /// Failure reason when `ok` is false.
        reason: Option<ActionFailure>,
    },
    /// The actor is hidden until the day ends.
    Camouflaged {
        /// Hidden actor.
        who: ActorId,
    },
    /// A flask's hidden kind became known to its owner.
    FlaskRevealed {
        /// Owner.
        who: ActorId,
        /// What the flask turned out to be.
        kind: FlaskKind,
    },
    /// A poison status was removed.
    PoisonCured {
        /// Cured actor.
        who: ActorId,
    },
    /// Hit points were restored.
    Healed {
        /// Healed actor.
        who: ActorId,
        /// Hit points gained.
        amount: u32,
        /// Hit points after healing.
        hp: u32,
    },
    /// An item moved into an equipment slot.
    Equip {
        /// Owner.
        who: ActorId,
        /// Equipped item.
        item: ItemDefId,
        /// Slot filled.
        slot: EquipSlot,
    },
    /// One hop of movement.
    Move {
        /// Mover.
        who: ActorId,
        /// Area left.
        from: AreaId,
        /// Area entered.
        to: AreaId,
    },
    /// A hop that was refused.
    MoveBlocked {
        /// Mover.
        who: ActorId,
        /// Current area.
        from: AreaId,
        /// Requested area.
        to: AreaId,
        /// Why the hop failed.
        reason: MoveBlockReason,
    },
    /// An actor stayed put.
    Stay {
        /// Actor.
        who: ActorId,
    },
    /// An actor stayed put and recovered stamina.
    Rest {
        /// Actor.
        who: ActorId,
        /// Stamina after resting.
        stamina: u32,
    },
    /// An NPC moved into the player's area.
    Arrival {
        /// Arriving NPC.
        who: ActorId,
        /// Area they came from.
        from: AreaId,
        /// The player's area.
        to: AreaId,
    },
    /// A daily poison tick.
    PoisonTick {
        /// Poisoned actor.
        who: ActorId,
        /// Damage dealt.
        dmg: u32,
        /// Hit points after the tick.
        hp: u32,
    },
    /// An area became inactive.
    AreaClosed {
        /// Closed area.
        #[serde(rename = "areaId")]
        area_id: AreaId,
    },
    /// An area was scheduled to close.
    AreaClosing {
        /// Area scheduled.
        #[serde(rename = "areaId")]
        area_id: AreaId,
        /// Day it becomes inactive.
        #[serde(rename = "onDay")]
        on_day: u32,
    },
    /// A malformed NPC intent was dropped.
    IntentRejected {
        /// Declaring actor.
        who: ActorId,
        /// Why.
        reason: IntentRejection,
    },
}

impl Event {
    /// The actor this event is primarily about, if any.
    pub const fn who(&self) -> Option<&ActorId> {
        match self {
            Self::NoAction { who, .. }
            | Self::Attack { who, .. }
            | Self::DamageReceived { who, .. }
            | Self::ShieldBlocked { who, .. }
            | Self::ShieldBroken { who, .. }
            | Self::ShieldPierced { who, .. }
            | Self::Poisoned { who, .. }
            | Self::WeaponSpent { who, .. }
            | Self::SelfDamage { who, .. }
            | Self::Death { who, .. }
            | Self::Defend { who, .. }
            | Self::Nothing { who, .. }
            | Self::Collect { who, .. }
            | Self::BackpackOpened { who, .. }
            | Self::UseItem { who, .. }
            | Self::Camouflaged { who }
            | Self::FlaskRevealed { who, .. }
            | Self::PoisonCured { who }
            | Self::Healed { who, .. }
            | Self::Equip { who, .. }
            | Self::Move { who, .. }
            | Self::MoveBlocked { who, .. }
            | Self::Stay { who }
            | Self::Rest { who, .. }
            | Self::Arrival { who, .. }
            | Self::PoisonTick { who, .. }
            | Self::IntentRejected { who, .. } => Some(who),
            Self::AreaClosed { .. } | Self::AreaClosing { .. } => None,
        }
    }

    /// Whether this is a death event.
    pub const fn is_death(&self) -> bool {
        matches!(self, Self::Death { .. })
    }
}
