//! The day orchestrator.
//!
//! [`end_day`] takes the world as the player left it (their action already
//! resolved, its events waiting in the day scratch) together with the NPC
//! intents, and produces the next day's world. The order is fixed:
//!
//! 1. NPC positioning intents, in registry order.
//! 2. Arrivals into the player's area.
//! 3. Status ticks, the player first.
//! 4. Stamina maintenance.
//! 5. Day advance, then closures for the new day.
//! 6. The finished day is appended to the log and the scratch is cleared.
//!
//! NPC combat intents are not resolved here. NPCs fight as the attacker
//! picked by a defending or idle actor, and as the target of an attack.

use std::collections::BTreeMap;

use arena_agents::RulesConfig;
use arena_agents::vitals::{apply_maintenance, rest, tick_status};
use arena_types::{
    ActorId, AreaId, DayRecord, DayScratch, DeathCause, Declaration, Event, Intent,
    IntentRejection, Movement, World,
};
use arena_world::apply_closures_for_day;
use tracing::{debug, info, warn};

use crate::movement::{expand_route, move_along_route};

/// Finish the current day and return the world for the next one.
pub fn end_day(world: &World, intents: &[Intent], rules: &RulesConfig) -> World {
    let mut next = world.clone();
    let day = next.meta.day;
    if !next.today.player_committed && next.entities.player.is_alive() {
        warn!(day, "ending a day the player has not committed to");
    }

    let mut events = std::mem::take(&mut next.today.events);

    let before: BTreeMap<ActorId, AreaId> = next
        .entities
        .npcs
        .values()
        .map(|n| (n.id.clone(), n.area_id))
        .collect();

    for intent in intents {
        apply_intent(&mut next, intent, rules, &mut events);
    }

    let player_area = next.entities.player.area_id;
    for npc in next.entities.npcs.values().filter(|n| n.is_alive()) {
        let Some(&from) = before.get(&npc.id) else {
            continue;
        };
        if from != npc.area_id && npc.area_id == player_area {
            events.push(Event::Arrival {
                who: npc.id.clone(),
                from,
                to: npc.area_id,
            });
        }
    }

    tick_statuses(&mut next, &mut events);

    apply_maintenance(&mut next.entities.player, rules);
    for npc in next.entities.npcs.values_mut() {
        apply_maintenance(npc, rules);
    }

    next.meta.day = day.saturating_add(1);
    let report = apply_closures_for_day(
        &mut next.map,
        &mut next.flags,
        next.meta.day,
        &rules.closures,
    );
    events.extend(report.events());

    info!(
        day,
        events = events.len(),
        alive = next.living_count(),
        "day ended"
    );
    next.log.days.push(DayRecord { day, events });
    next.today = DayScratch::default();
    next
}

/// Apply one NPC intent. Only positioning intents act here.
fn apply_intent(world: &mut World, intent: &Intent, rules: &RulesConfig, events: &mut Vec<Event>) {
    let who = &intent.source;
    let reject = |reason| Event::IntentRejected {
        who: who.clone(),
        reason,
    };

    let movement = match &intent.declaration {
        Declaration::Movement(m) => m,
        Declaration::Action(action) => {
            debug!(actor = %who, ?action, "combat intent left to encounters");
            return;
        }
        Declaration::Equip(index) => {
            debug!(actor = %who, index, "equip intent ignored");
            return;
        }
    };

    let Some(actor) = world.actor(who).filter(|_| !who.is_player()) else {
        warn!(actor = %who, "intent from unknown source");
        events.push(reject(IntentRejection::UnknownSource));
        return;
    };
    if !actor.is_alive() {
        return;
    }
    let from = actor.area_id;

    match movement {
        Movement::Stay => events.push(Event::Stay { who: who.clone() }),
        Movement::Rest => {
            if let Some(actor) = world.actor_mut(who) {
                let stamina = rest(actor, rules);
                events.push(Event::Rest {
                    who: who.clone(),
                    stamina,
                });
            }
        }
        Movement::Move { route } => match expand_route(&world.map, from, route) {
            Ok(route) => events.extend(move_along_route(world, who, &route, rules).events),
            Err(reason) => events.push(reject(reason)),
        },
    }
}

/// Poison ticks: the player, then NPCs in registry order.
fn tick_statuses(world: &mut World, events: &mut Vec<Event>) {
    let ids: Vec<ActorId> = world.actors().map(|a| a.id.clone()).collect();
    for id in ids {
        let Some(actor) = world.actor_mut(&id) else {
            continue;
        };
        let Some(tick) = tick_status(actor) else {
            continue;
        };
        let area_id = actor.area_id;
        events.push(Event::PoisonTick {
            who: id.clone(),
            dmg: tick.dmg,
            hp: tick.hp,
        });
        if tick.died {
            events.push(Event::Death {
                who: id,
                area_id,
                cause: DeathCause::Poison,
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use arena_types::{StatusEffect, TodayFlags};

    use super::*;
    use crate::test_support::{make_world, place};

    fn rules() -> RulesConfig {
        RulesConfig::default()
    }

    #[test]
    fn day_advances_and_logs_previous_day() {
        let world = make_world(3, 1);
        let next = end_day(&world, &[], &rules());
        assert_eq!(next.meta.day, 2);
        assert_eq!(next.log.days.len(), 1);
        assert_eq!(next.log.days.first().unwrap().day, 1);
    }

    #[test]
    fn scratch_events_open_the_day_record_and_scratch_clears() {
        let mut world = make_world(2, 1);
        world.today.events.push(Event::Stay {
            who: ActorId::player(),
        });
        world.today.player_committed = true;
        world.today_mut(&ActorId::player()).invisible = true;
        let next = end_day(&world, &[], &rules());
        let record = next.log.days.first().unwrap();
        assert_eq!(
            record.events.first(),
            Some(&Event::Stay {
                who: ActorId::player()
            })
        );
        assert_eq!(next.today, DayScratch::default());
        assert_eq!(next.today(&ActorId::player()), TodayFlags::default());
    }

    #[test]
    fn far_destination_is_expanded_into_route() {
        let world = make_world(2, 1);
        let npc = ActorId::npc(1);
        let intents = [Intent::movement(npc.clone(), Movement::Move { route: vec![AreaId(3)] })];
        let next = end_day(&world, &intents, &rules());
        assert_eq!(next.actor(&npc).unwrap().area_id, AreaId(3));
        let moves = next
            .log
            .days
            .first()
            .unwrap()
            .events
            .iter()
            .filter(|e| matches!(e, Event::Move { .. }))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn malformed_intents_are_rejected() {
        let world = make_world(2, 1);
        let intents = [
            Intent::movement(ActorId::new("npc_99"), Movement::Stay),
            Intent::movement(ActorId::npc(1), Movement::Move { route: Vec::new() }),
        ];
        let next = end_day(&world, &intents, &rules());
        let events = &next.log.days.first().unwrap().events;
        assert!(events.contains(&Event::IntentRejected {
            who: ActorId::new("npc_99"),
            reason: IntentRejection::UnknownSource
        }));
        assert!(events.contains(&Event::IntentRejected {
            who: ActorId::npc(1),
            reason: IntentRejection::EmptyRoute
        }));
    }

    #[test]
    fn unreachable_destination_is_rejected() {
        let mut world = make_world(2, 1);
        world.area_mut(AreaId(2)).unwrap().is_active = false;
        let intents = [Intent::movement(ActorId::npc(1), Movement::Move { route: vec![AreaId(4)] })];
        let next = end_day(&world, &intents, &rules());
        assert!(next.log.days.first().unwrap().events.contains(&Event::IntentRejected {
            who: ActorId::npc(1),
            reason: IntentRejection::NoRoute
        }));
    }

    #[test]
    fn npc_entering_player_area_arrives() {
        let mut world = make_world(2, 1);
        let npc = ActorId::npc(1);
        place(&mut world, &ActorId::player(), AreaId(2));
        place(&mut world, &npc, AreaId(3));
        let intents = [Intent::movement(npc.clone(), Movement::Move { route: vec![AreaId(2)] })];
        let next = end_day(&world, &intents, &rules());
        assert!(next.log.days.first().unwrap().events.contains(&Event::Arrival {
            who: npc,
            from: AreaId(3),
            to: AreaId(2)
        }));
    }

    #[test]
    fn lethal_poison_tick_reports_death() {
        let mut world = make_world(2, 1);
        let npc = ActorId::npc(1);
        let actor = world.entities.npcs.get_mut(&npc).unwrap();
        actor.hp = 5;
        actor.status.push(StatusEffect::Poison { per_day: 10 });
        let next = end_day(&world, &[], &rules());
        let events = &next.log.days.first().unwrap().events;
        assert!(events.contains(&Event::PoisonTick {
            who: npc.clone(),
            dmg: 10,
            hp: 0
        }));
        assert!(events.contains(&Event::Death {
            who: npc,
            area_id: AreaId(1),
            cause: DeathCause::Poison
        }));
    }

    #[test]
    fn maintenance_resets_hub_and_drains_outside() {
        let mut world = make_world(2, 1);
        place(&mut world, &ActorId::npc(1), AreaId(2));
        world.entities.player.stamina = 20;
        let next = end_day(&world, &[], &rules());
        assert_eq!(next.entities.player.stamina, 70);
        assert_eq!(next.actor(&ActorId::npc(1)).unwrap().stamina, 60);
    }

    #[test]
    fn rest_intent_recovers_before_maintenance() {
        let mut world = make_world(2, 1);
        let npc = ActorId::npc(1);
        place(&mut world, &npc, AreaId(2));
        world.entities.npcs.get_mut(&npc).unwrap().stamina = 10;
        let intents = [Intent::movement(npc.clone(), Movement::Rest)];
        let next = end_day(&world, &intents, &rules());
        assert!(next.log.days.first().unwrap().events.contains(&Event::Rest {
            who: npc.clone(),
            stamina: 25
        }));
        assert_eq!(next.actor(&npc).unwrap().stamina, 15);
    }

    #[test]
    fn closures_close_before_scheduling() {
        let mut world = make_world(2, 1);
        world.meta.day = 4;
        world.area_mut(AreaId(6)).unwrap().will_close_on_day = Some(5);
        let rules = RulesConfig {
            closures: arena_world::ClosureSchedule {
                start_day: 5,
                interval: 2,
                batch: 2,
            },
            ..rules()
        };
        let next = end_day(&world, &[], &rules);
        assert!(!next.area(AreaId(6)).unwrap().is_active);
        assert!(next.flags.closed_areas.contains(&AreaId(6)));
        let events = &next.log.days.first().unwrap().events;
        assert_eq!(events.first(), Some(&Event::AreaClosed { area_id: AreaId(6) }));
        // Area 6 is already closed, so the batch for day 6 is 5 and 4.
        assert_eq!(next.area(AreaId(5)).unwrap().will_close_on_day, Some(6));
        assert_eq!(next.area(AreaId(4)).unwrap().will_close_on_day, Some(6));
    }

    #[test]
    fn combat_intents_do_not_act() {
        let world = make_world(2, 1);
        let intents = [Intent::action(
            ActorId::npc(1),
            arena_types::Action::Attack {
                target_id: ActorId::player(),
            },
        )];
        let next = end_day(&world, &intents, &rules());
        assert_eq!(next.entities.player.hp, 100);
    }
}
