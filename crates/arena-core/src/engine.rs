//! The engine facade: the player's side of a day.
//!
//! [`Engine`] bundles the rules, the item catalog, and the NPC intent
//! source. Every operation takes a world by reference and hands back a new
//! one, so callers can keep any earlier world as a snapshot.
//!
//! A day is played by committing item actions (any number), one combat
//! action, one movement, and then ending the day. Each accepted
//! declaration is recorded in the world's replay so [`Engine::replay_game`]
//! can rebuild the game from its first day.

use arena_agents::inventory::equip;
use arena_agents::vitals::rest;
use arena_agents::{ItemCatalog, RulesConfig, StandardCatalog};
use arena_types::{
    Action, ActorId, DayPhase, Declaration, Event, GameStatus, Movement, NoActionReason,
    PlayerTurn, World,
};
use arena_world::WorldError;
use tracing::debug;

use crate::day;
use crate::init::{WorldParams, create_initial_world};
use crate::intent::{IntentSource, SeededIntentGenerator};
use crate::movement::{expand_route, move_along_route};
use crate::resolver::{Resolution, apply_action};

/// Rules, catalog, and NPC brains for one game.
#[derive(Debug, Clone, Default)]
pub struct Engine<C = StandardCatalog, S = SeededIntentGenerator> {
    rules: RulesConfig,
    catalog: C,
    intents: S,
}

impl Engine {
    /// An engine with the standard catalog and AI.
    pub fn new(rules: RulesConfig) -> Self {
        Self {
            rules,
            catalog: StandardCatalog::new(),
            intents: SeededIntentGenerator::new(),
        }
    }
}

impl<C: ItemCatalog, S: IntentSource> Engine<C, S> {
    /// An engine with a custom catalog and intent source.
    pub const fn with_parts(rules: RulesConfig, catalog: C, intents: S) -> Self {
        Self {
            rules,
            catalog,
            intents,
        }
    }

    /// The rules in force.
    pub const fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// The item catalog.
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Create day 1 of a new game.
    ///
    /// # Errors
    ///
    /// Returns a [`WorldError`] if the map fails validation.
    pub fn create_world(&self, params: &WorldParams) -> Result<World, WorldError> {
        create_initial_world(params, &self.rules, &self.catalog)
    }

    /// Commit a player action and resolve it immediately.
    ///
    /// Item actions may be committed any number of times; a second combat
    /// action on the same day is refused with `already_committed`.
    pub fn commit_action(&self, world: &World, action: &Action) -> Resolution {
        let player = ActorId::player();
        let combat = !action.is_item_action();
        if combat && world.today.player_committed {
            return refuse(world, NoActionReason::AlreadyCommitted);
        }

        let mut next = world.clone();
        let events = apply_action(&mut next, &player, action, &self.rules, &self.catalog);
        if combat {
            next.today.player_committed = true;
        }
        record(&mut next, Declaration::Action(action.clone()));
        next.today.events.extend(events.iter().cloned());
        Resolution {
            world: next,
            events,
        }
    }

    /// Apply the player's movement for the day.
    ///
    /// A single far destination is expanded into the shortest open route.
    /// A second movement on the same day is refused with
    /// `already_committed`.
    pub fn move_player(&self, world: &World, movement: &Movement) -> Resolution {
        if world.today.player_moved {
            return refuse(world, NoActionReason::AlreadyCommitted);
        }
        if !world.entities.player.is_alive() {
            return refuse(world, NoActionReason::PlayerDead);
        }

        let player = ActorId::player();
        let mut next = world.clone();
        let events = match movement {
            Movement::Stay => vec![Event::Stay { who: player }],
            Movement::Rest => {
                let stamina = rest(&mut next.entities.player, &self.rules);
                vec![Event::Rest {
                    who: player,
                    stamina,
                }]
            }
            Movement::Move { route } => {
                let from = next.entities.player.area_id;
                match expand_route(&next.map, from, route) {
                    Ok(hops) => move_along_route(&mut next, &player, &hops, &self.rules).events,
                    Err(reason) => vec![Event::IntentRejected {
                        who: player,
                        reason,
                    }],
                }
            }
        };

        next.today.player_moved = true;
        record(&mut next, Declaration::Movement(movement.clone()));
        next.today.events.extend(events.iter().cloned());
        Resolution {
            world: next,
            events,
        }
    }

    /// Equip the player's inventory item at `item_index`.
    ///
    /// Equipping is free and does not use up any of the day's slots.
    pub fn equip(&self, world: &World, item_index: usize) -> Resolution {
        if !world.entities.player.is_alive() {
            return refuse(world, NoActionReason::PlayerDead);
        }

        let mut next = world.clone();
        let player = &mut next.entities.player;
        let event = match equip(&mut player.inventory, item_index, &self.catalog) {
            Ok((item, slot)) => Event::Equip {
                who: player.id.clone(),
                item,
                slot,
            },
            Err(err) => Event::UseItem {
                who: player.id.clone(),
                ok: false,
                item: player.inventory.items.get(item_index).map(|s| s.def_id.clone()),
                target: None,
                reason: Some(err.reason()),
            },
        };

        record(&mut next, Declaration::Equip(item_index));
        next.today.events.push(event.clone());
        Resolution {
            world: next,
            events: vec![event],
        }
    }

    /// Collect NPC intents and finish the day.
    pub fn end_day(&self, world: &World) -> World {
        let intents = self.intents.collect_intents(world, &self.rules);
        day::end_day(world, &intents, &self.rules)
    }

    /// Play a whole day: item actions, the combat action, the movement,
    /// then the end of the day.
    pub fn play_day(&self, world: &World, turn: &PlayerTurn) -> World {
        let mut next = world.clone();
        for action in &turn.item_actions {
            next = self.commit_action(&next, action).world;
        }
        next = self.commit_action(&next, &turn.action).world;
        next = self.move_player(&next, &turn.movement).world;
        self.end_day(&next)
    }

    /// Rebuild a game by replaying recorded declarations from its first
    /// world, one entry per day.
    pub fn replay_game(&self, initial: &World, days: &[Vec<Declaration>]) -> World {
        let mut world = initial.clone();
        for declarations in days {
            for declaration in declarations {
                world = match declaration {
                    Declaration::Action(action) => self.commit_action(&world, action),
                    Declaration::Movement(movement) => self.move_player(&world, movement),
                    Declaration::Equip(index) => self.equip(&world, *index),
                }
                .world;
            }
            world = self.end_day(&world);
        }
        debug!(days = days.len(), day = world.meta.day, "replayed game");
        world
    }
}

/// Where the current day stands.
pub const fn day_phase(world: &World) -> DayPhase {
    if world.today.player_committed {
        DayPhase::ReadyToEnd
    } else {
        DayPhase::Open
    }
}

/// Whether the game goes on.
pub fn game_status(world: &World) -> GameStatus {
    if !world.entities.player.is_alive() {
        GameStatus::PlayerDead
    } else if world.entities.npcs.values().any(|n| n.is_alive()) {
        GameStatus::Running
    } else {
        GameStatus::Victory
    }
}

fn refuse(world: &World, reason: NoActionReason) -> Resolution {
    Resolution {
        world: world.clone(),
        events: vec![Event::NoAction {
            who: ActorId::player(),
            reason,
        }],
    }
}

/// Append a declaration to today's replay entry.
fn record(world: &mut World, declaration: Declaration) {
    let index = usize::try_from(world.meta.day.saturating_sub(1)).unwrap_or(0);
    let days = &mut world.replay.player_actions_by_day;
    if days.len() <= index {
        days.resize_with(index.saturating_add(1), Vec::new);
    }
    if let Some(today) = days.get_mut(index) {
        today.push(declaration);
    }
}
