//! NPC intent generation.
//!
//! Before movement is applied each day, every living NPC declares one
//! Action-1 intent (attack a co-located actor, or defend) and one Action-2
//! intent (move, stay, or rest). Generation reads the world and never
//! mutates it. The [`IntentSource`] trait abstracts where intents come from
//! so tests can script them; [`SeededIntentGenerator`] is the standard AI.

use arena_agents::RulesConfig;
use arena_agents::vitals::{is_exhausted, max_steps};
use arena_types::{Action, Actor, ActorId, Intent, Movement, World};
use arena_world::{AreaGraph, DayRng};

/// A source of NPC intents.
///
/// The orchestrator calls [`collect_intents`] once per day, after the
/// player's commits and before any movement is applied.
///
/// [`collect_intents`]: IntentSource::collect_intents
pub trait IntentSource {
    /// Produce the day's intents for every living NPC, in registry order.
    fn collect_intents(&self, world: &World, rules: &RulesConfig) -> Vec<Intent>;
}

/// The standard seeded AI.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeededIntentGenerator;

impl SeededIntentGenerator {
    /// Create the generator.
    pub const fn new() -> Self {
        Self
    }
}

impl IntentSource for SeededIntentGenerator {
    fn collect_intents(&self, world: &World, rules: &RulesConfig) -> Vec<Intent> {
        generate_npc_intents(world, rules)
    }
}

/// Generate two intents per living NPC from the seeded draws.
pub fn generate_npc_intents(world: &World, rules: &RulesConfig) -> Vec<Intent> {
    let rng = DayRng::new(world.meta.seed, world.meta.day);
    let graph = AreaGraph::new(&world.map);
    let mut intents = Vec::new();

    for npc in world.entities.npcs.values().filter(|n| n.is_alive()) {
        intents.push(Intent::action(npc.id.clone(), choose_action(world, npc, rng, rules)));
        intents.push(Intent::movement(
            npc.id.clone(),
            choose_movement(npc, &graph, rng, rules),
        ));
    }

    tracing::debug!(day = world.meta.day, count = intents.len(), "generated NPC intents");
    intents
}

/// Visible living actors sharing `npc`'s area, the player first.
fn visible_targets(world: &World, npc: &Actor) -> Vec<ActorId> {
    world
        .living_in(npc.area_id)
        .into_iter()
        .filter(|id| id != &npc.id && !world.today(id).invisible)
        .collect()
}

fn choose_action(world: &World, npc: &Actor, rng: DayRng, rules: &RulesConfig) -> Action {
    let targets = visible_targets(world, npc);
    let r1 = rng.unit(&format!("{}|a1", npc.id));
    if !targets.is_empty() && r1 < rules.npc_attack_chance {
        let pick = rng.pick(&format!("{}|t", npc.id), targets.len());
        if let Some(target_id) = pick.and_then(|i| targets.get(i)).cloned() {
            return Action::Attack { target_id };
        }
    }
    Action::Defend
}

fn choose_movement(npc: &Actor, graph: &AreaGraph<'_>, rng: DayRng, rules: &RulesConfig) -> Movement {
    let hold = if is_exhausted(npc, rules) {
        Movement::Rest
    } else {
        Movement::Stay
    };

    if rng.chance(&format!("{}|a2", npc.id), rules.npc_stay_chance) {
        return hold;
    }

    let reachable: Vec<_> = graph
        .reachable_within(npc.area_id, max_steps(npc, rules))
        .into_iter()
        .filter(|&id| id != npc.area_id)
        .collect();

    rng.pick(&format!("{}|dest", npc.id), reachable.len())
        .and_then(|i| reachable.get(i).copied())
        .map_or(hold, |dest| Movement::Move { route: vec![dest] })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use arena_types::{AreaId, Declaration};

    use super::*;
    use crate::test_support::{make_world, place};

    fn movement_of(intents: &[Intent], id: &ActorId) -> Movement {
        intents
            .iter()
            .find_map(|i| match &i.declaration {
                Declaration::Movement(m) if &i.source == id => Some(m.clone()),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn two_intents_per_living_npc() {
        let mut world = make_world(5, 7);
        world.entities.npcs.get_mut(&ActorId::npc(2)).unwrap().hp = 0;
        let intents = generate_npc_intents(&world, &RulesConfig::default());
        assert_eq!(intents.len(), 6);
        assert!(intents.iter().all(|i| i.source != ActorId::npc(2)));
    }

    #[test]
    fn generation_is_deterministic_and_read_only() {
        let world = make_world(6, 99);
        let before = world.clone();
        let a = generate_npc_intents(&world, &RulesConfig::default());
        let b = generate_npc_intents(&world, &RulesConfig::default());
        assert_eq!(a, b);
        assert_eq!(world, before);
    }

    #[test]
    fn lone_npc_always_defends() {
        let mut world = make_world(2, 3);
        place(&mut world, &ActorId::npc(1), AreaId(5));
        let intents = generate_npc_intents(&world, &RulesConfig::default());
        assert_eq!(
            intents.first().unwrap().declaration,
            Declaration::Action(Action::Defend)
        );
    }

    #[test]
    fn certain_attack_targets_a_neighbour() {
        let world = make_world(3, 11);
        let rules = RulesConfig {
            npc_attack_chance: 1.0,
            ..RulesConfig::default()
        };
        for intent in generate_npc_intents(&world, &rules) {
            if let Declaration::Action(Action::Attack { target_id }) = intent.declaration {
                assert_ne!(target_id, intent.source);
            } else if let Declaration::Action(other) = intent.declaration {
                panic!("expected attack, got {other:?}");
            }
        }
    }

    #[test]
    fn healthy_npc_moves_within_three_hops() {
        // The chain fixture is 1-2-3-4-5-6; from area 4 with three steps,
        // every area but 4 itself is reachable.
        let mut world = make_world(2, 0);
        let id = ActorId::npc(1);
        place(&mut world, &id, AreaId(4));
        let rules = RulesConfig {
            npc_stay_chance: 0.0,
            ..RulesConfig::default()
        };
        for seed in 0..40 {
            world.meta.seed = seed;
            let intents = generate_npc_intents(&world, &rules);
            let Movement::Move { route } = movement_of(&intents, &id) else {
                panic!("expected a move");
            };
            assert_eq!(route.len(), 1);
            let dest = route.first().copied().unwrap();
            assert!([1, 2, 3, 5, 6].contains(&dest.get()), "unexpected {dest}");
        }
    }

    #[test]
    fn npc_with_two_reachable_areas_moves_to_one_of_them() {
        // Close everything but 3 and 5 around area 4.
        let mut world = make_world(2, 0);
        let id = ActorId::npc(1);
        place(&mut world, &id, AreaId(4));
        for closed in [1, 2, 6] {
            world.map.areas_by_id.get_mut(&AreaId(closed)).unwrap().is_active = false;
        }
        let rules = RulesConfig {
            npc_stay_chance: 0.0,
            ..RulesConfig::default()
        };
        for seed in 0..40 {
            world.meta.seed = seed;
            let m = movement_of(&generate_npc_intents(&world, &rules), &id);
            let dest = m.destination().unwrap();
            assert!(dest == AreaId(3) || dest == AreaId(5));
        }
    }

    #[test]
    fn exhausted_npc_rests_instead_of_staying() {
        let mut world = make_world(2, 0);
        let id = ActorId::npc(1);
        world.entities.npcs.get_mut(&id).unwrap().stamina = 15;
        let rules = RulesConfig {
            npc_stay_chance: 1.0,
            ..RulesConfig::default()
        };
        assert_eq!(movement_of(&generate_npc_intents(&world, &rules), &id), Movement::Rest);
    }

    #[test]
    fn isolated_npc_stays() {
        let mut world = make_world(2, 0);
        let id = ActorId::npc(1);
        place(&mut world, &id, AreaId(6));
        world.map.areas_by_id.get_mut(&AreaId(5)).unwrap().is_active = false;
        let rules = RulesConfig {
            npc_stay_chance: 0.0,
            ..RulesConfig::default()
        };
        assert_eq!(movement_of(&generate_npc_intents(&world, &rules), &id), Movement::Stay);
    }

    #[test]
    fn camouflaged_actors_are_not_targeted() {
        let mut world = make_world(2, 0);
        world.today_mut(&ActorId::player()).invisible = true;
        let rules = RulesConfig {
            npc_attack_chance: 1.0,
            ..RulesConfig::default()
        };
        let intents = generate_npc_intents(&world, &rules);
        assert_eq!(
            intents.first().unwrap().declaration,
            Declaration::Action(Action::Defend)
        );
    }
}
