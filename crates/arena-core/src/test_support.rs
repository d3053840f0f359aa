//! Fixtures shared by the unit tests in this crate.

#![allow(clippy::unwrap_used)]

use arena_agents::{RulesConfig, StandardCatalog};
use arena_types::{Action, ActorId, Area, AreaId, Biome, ItemStack, MapData, World};

use crate::init::{WorldParams, create_initial_world};
use crate::resolver::{Resolution, resolve_action};

/// A plain chain 1 - 2 - 3 - 4 - 5 - 6, area 1 being the hub.
pub(crate) fn chain_map() -> MapData {
    let mut map = MapData::default();
    for id in 1..=6 {
        let biome = if id == 1 { Biome::Cornucopia } else { Biome::Plains };
        map.areas_by_id.insert(AreaId(id), Area::new(AreaId(id), biome));
    }
    for (a, b) in [(1, 2), (2, 3), (3, 4), (4, 5), (5, 6)] {
        map.adj_by_id.entry(AreaId(a)).or_default().push(AreaId(b));
        map.adj_by_id.entry(AreaId(b)).or_default().push(AreaId(a));
    }
    map
}

/// A world on the chain map with nothing on the ground; everyone in the hub.
pub(crate) fn make_world(total_players: u32, seed: u64) -> World {
    let rules = RulesConfig {
        hub_loot: Vec::new(),
        ..RulesConfig::default()
    };
    let params = WorldParams {
        seed,
        map_size: 6,
        map: chain_map(),
        total_players,
        player_district: 12,
        tribute_names: Vec::new(),
    };
    create_initial_world(&params, &rules, &StandardCatalog::new()).unwrap()
}

/// Move an actor without any rule checks.
pub(crate) fn place(world: &mut World, id: &ActorId, area: AreaId) {
    world.actor_mut(id).unwrap().area_id = area;
}

/// Give an actor one `item` and equip it as their weapon.
pub(crate) fn arm(world: &mut World, id: &ActorId, item: &str) {
    let actor = world.actor_mut(id).unwrap();
    actor.inventory.items.push(ItemStack::single(item));
    actor.inventory.equipped.weapon = Some(item.into());
}

/// Give an actor an equipped shield.
pub(crate) fn shield_up(world: &mut World, id: &ActorId) {
    let actor = world.actor_mut(id).unwrap();
    actor.inventory.items.push(ItemStack::single("shield"));
    actor.inventory.equipped.defense = Some("shield".into());
}

/// Resolve with the standard catalog.
pub(crate) fn resolve(world: &World, id: &ActorId, action: &Action, rules: &RulesConfig) -> Resolution {
    resolve_action(world, id, action, rules, &StandardCatalog::new())
}
