//! A scripted stand-in for the human player.
//!
//! The autopilot reads the current world and picks a full [`PlayerTurn`].
//! It uses no randomness of its own, so a run is fully determined by the
//! seed and the config.

use arena_agents::vitals::is_exhausted;
use arena_agents::{ConsumableEffect, ItemCatalog, RulesConfig};
use arena_core::{AutopilotConfig, AutopilotStyle};
use arena_types::{Action, Area, AreaId, FlaskKind, HUB_AREA, Movement, PlayerTurn, World};
use arena_world::AreaGraph;

/// Hit points under which the autopilot drinks flasks, when allowed.
const DRINK_BELOW_HP: u32 = 50;

/// Plan the player's turn for the current day.
pub fn plan_turn(
    world: &World,
    rules: &RulesConfig,
    catalog: &impl ItemCatalog,
    config: &AutopilotConfig,
) -> PlayerTurn {
    PlayerTurn {
        item_actions: item_actions(world, rules, catalog, config),
        action: combat_action(world, config.style),
        movement: movement(world, rules, config.style),
    }
}

fn item_actions(
    world: &World,
    rules: &RulesConfig,
    catalog: &impl ItemCatalog,
    config: &AutopilotConfig,
) -> Vec<Action> {
    let me = &world.entities.player;
    let mut actions = Vec::new();

    if config.drink_flasks && me.hp < DRINK_BELOW_HP {
        let flask = me.inventory.items.iter().position(|s| {
            catalog.item_def(&s.def_id).and_then(|d| d.consumable) == Some(ConsumableEffect::Flask)
                && !(s.revealed && s.hidden_kind == Some(FlaskKind::Poison))
        });
        if let Some(item_index) = flask {
            actions.push(Action::UseItem {
                item_index,
                target_id: None,
            });
        }
    }

    if config.collect {
        let on_ground = world.area(me.area_id).map_or(0, |a| a.ground_items.len());
        let free = usize::try_from(rules.inventory_capacity)
            .unwrap_or(usize::MAX)
            .saturating_sub(me.inventory.items.len());
        actions.extend((0..on_ground.min(free)).map(|_| Action::Collect { item_index: 0 }));
    }
    actions
}

fn combat_action(world: &World, style: AutopilotStyle) -> Action {
    match style {
        AutopilotStyle::Cautious => Action::Defend,
        AutopilotStyle::Idle => Action::Nothing,
        AutopilotStyle::Aggressive => {
            let me = &world.entities.player;
            world
                .living_in(me.area_id)
                .into_iter()
                .find(|id| !id.is_player() && !world.today(id).invisible)
                .map_or(Action::Defend, |target_id| Action::Attack { target_id })
        }
    }
}

fn movement(world: &World, rules: &RulesConfig, style: AutopilotStyle) -> Movement {
    let me = &world.entities.player;
    let graph = AreaGraph::new(&world.map);
    let safe = |id: AreaId| graph.can_enter(id).is_ok() && world.area(id).is_some_and(|a| !a.is_closing());

    // Leave an area that closes tomorrow while it can still be left.
    if world.area(me.area_id).is_some_and(Area::is_closing)
        && let Some(&to) = graph.neighbors(me.area_id).iter().find(|&&n| safe(n))
    {
        return Movement::Move { route: vec![to] };
    }

    match style {
        AutopilotStyle::Idle => Movement::Stay,
        AutopilotStyle::Cautious if is_exhausted(me, rules) => {
            if me.area_id == HUB_AREA {
                Movement::Rest
            } else {
                Movement::Move {
                    route: vec![HUB_AREA],
                }
            }
        }
        AutopilotStyle::Cautious => Movement::Stay,
        AutopilotStyle::Aggressive => graph
            .neighbors(me.area_id)
            .iter()
            .copied()
            .filter(|&n| safe(n))
            .map(|n| (n, crowd(world, n)))
            .filter(|&(_, count)| count > 0)
            .max_by_key(|&(n, count)| (count, core::cmp::Reverse(n)))
            .map_or(Movement::Stay, |(to, _)| Movement::Move { route: vec![to] }),
    }
}

/// Living NPCs in an area.
fn crowd(world: &World, area: AreaId) -> usize {
    world
        .living_in(area)
        .iter()
        .filter(|id| !id.is_player())
        .count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use arena_agents::StandardCatalog;
    use arena_core::{Engine, WorldParams};
    use arena_types::{ActorId, ItemStack};
    use arena_world::build_grid_map;

    use super::*;

    fn world() -> World {
        let engine = Engine::new(RulesConfig::default());
        engine
            .create_world(&WorldParams {
                seed: 5,
                map_size: 24,
                map: build_grid_map(24, 5).unwrap(),
                total_players: 4,
                player_district: 12,
                tribute_names: Vec::new(),
            })
            .unwrap()
    }

    #[test]
    fn collects_everything_that_fits() {
        let w = world();
        let rules = RulesConfig::default();
        let turn = plan_turn(&w, &rules, &StandardCatalog::new(), &AutopilotConfig::default());
        assert_eq!(turn.item_actions.len(), 6);
        assert_eq!(turn.action, Action::Defend);
        assert_eq!(turn.movement, Movement::Stay);
    }

    #[test]
    fn aggressive_attacks_a_neighbour() {
        let w = world();
        let config = AutopilotConfig {
            style: AutopilotStyle::Aggressive,
            collect: false,
            drink_flasks: false,
        };
        let turn = plan_turn(&w, &RulesConfig::default(), &StandardCatalog::new(), &config);
        assert_eq!(
            turn.action,
            Action::Attack {
                target_id: ActorId::npc(1)
            }
        );
        assert!(turn.item_actions.is_empty());
    }

    #[test]
    fn known_poison_is_never_drunk() {
        let mut w = world();
        w.entities.player.hp = 10;
        let mut flask = ItemStack::single("flask");
        flask.hidden_kind = Some(FlaskKind::Poison);
        flask.revealed = true;
        w.entities.player.inventory.items.push(flask);
        let config = AutopilotConfig {
            style: AutopilotStyle::Cautious,
            collect: false,
            drink_flasks: true,
        };
        let turn = plan_turn(&w, &RulesConfig::default(), &StandardCatalog::new(), &config);
        assert!(turn.item_actions.is_empty());
    }

    #[test]
    fn tired_cautious_player_heads_home() {
        let mut w = world();
        let away = w.map.adj_by_id.get(&HUB_AREA).unwrap().first().copied().unwrap();
        w.entities.player.area_id = away;
        w.entities.player.stamina = 5;
        let turn = plan_turn(&w, &RulesConfig::default(), &StandardCatalog::new(), &AutopilotConfig::default());
        assert_eq!(turn.movement, Movement::Move { route: vec![HUB_AREA] });
    }
}
