//! Creation of a fresh world from a seed and a map.

use std::collections::BTreeSet;

use arena_agents::spawn::{roll_district, shuffle_names, spawn_actor};
use arena_agents::{ItemCatalog, RulesConfig};
use arena_types::{
    ActorId, ActorKind, DISTRICT_COUNT, DayScratch, Entities, Flags, GameLog, HUB_AREA,
    ItemDefId, ItemStack, MapData, Replay, WORLD_VERSION, World, WorldMeta,
};
use arena_world::{AreaGraph, WorldError, random_unscoped, scale_inclusive, scale_index};
use indexmap::IndexMap;
use tracing::{info, warn};

/// Display name of the player actor.
pub const PLAYER_NAME: &str = "You";

/// Inputs to [`create_initial_world`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldParams {
    /// Seed for every draw in the game.
    pub seed: u64,
    /// Requested number of areas, recorded in the world's metadata.
    pub map_size: u32,
    /// The map to play on.
    pub map: MapData,
    /// Player plus NPCs.
    pub total_players: u32,
    /// The player's district, 1 through 12.
    pub player_district: u8,
    /// Optional NPC name pool.
    pub tribute_names: Vec<String>,
}

/// Build day 1: everyone in the hub, loot on the hub's ground.
///
/// NPCs get ids `npc_1` onward in registry order, names from a seeded
/// shuffle of the pool, and seeded districts and attributes.
///
/// # Errors
///
/// Returns a [`WorldError`] if the map fails validation.
pub fn create_initial_world(
    params: &WorldParams,
    rules: &RulesConfig,
    catalog: &impl ItemCatalog,
) -> Result<World, WorldError> {
    AreaGraph::new(&params.map).validate()?;

    let seed = params.seed;
    let total_players = params.total_players.max(1);
    let npc_count = total_players.saturating_sub(1);
    let names = shuffle_names(
        seed,
        &params.tribute_names,
        usize::try_from(npc_count).unwrap_or(0),
    );

    let mut npcs = IndexMap::new();
    for n in 1..=npc_count {
        let id = ActorId::npc(n);
        let name = usize::try_from(n.saturating_sub(1))
            .ok()
            .and_then(|i| names.get(i))
            .cloned()
            .unwrap_or_else(|| format!("Tribute {n}"));
        let district = roll_district(seed, &id);
        let actor = spawn_actor(id.clone(), ActorKind::Npc, name, district, seed, rules);
        npcs.insert(id, actor);
    }

    let player = spawn_actor(
        ActorId::player(),
        ActorKind::Player,
        PLAYER_NAME.to_owned(),
        params.player_district.clamp(1, DISTRICT_COUNT),
        seed,
        rules,
    );

    let mut map = params.map.clone();
    let loot = stock_hub(seed, &rules.hub_loot, catalog);
    if let Some(hub) = map.areas_by_id.get_mut(&HUB_AREA) {
        hub.ground_items.extend(loot);
    }

    let world = World {
        meta: WorldMeta {
            version: WORLD_VERSION,
            seed,
            day: 1,
            map_size: params.map_size,
            total_players,
        },
        map,
        entities: Entities { player, npcs },
        flags: Flags {
            visited_areas: BTreeSet::from([HUB_AREA]),
            closed_areas: BTreeSet::new(),
        },
        log: GameLog::default(),
        replay: Replay::default(),
        today: DayScratch::default(),
    };

    info!(
        seed,
        areas = world.map.areas_by_id.len(),
        npcs = npc_count,
        "created world"
    );
    Ok(world)
}

/// Seeded order of the hub pile. Stackable items come in 2 to 5 units.
fn stock_hub(seed: u64, loot: &[String], catalog: &impl ItemCatalog) -> Vec<ItemStack> {
    let mut order: Vec<ItemDefId> = loot.iter().map(|id| ItemDefId::new(id.as_str())).collect();
    let mut i = order.len().saturating_sub(1);
    while i > 0 {
        let r = random_unscoped(seed, &format!("loot|{i}"));
        let j = scale_index(r, i.saturating_add(1)).unwrap_or(i);
        order.swap(i, j);
        i = i.saturating_sub(1);
    }

    order
        .into_iter()
        .enumerate()
        .filter_map(|(k, id)| {
            let Some(def) = catalog.item_def(&id) else {
                warn!(item = %id, "unknown item in hub loot, skipping");
                return None;
            };
            let qty = if def.stackable {
                scale_inclusive(random_unscoped(seed, &format!("loot_qty|{k}")), 2, 5)
            } else {
                1
            };
            Some(ItemStack::with_qty(id, qty))
        })
        .collect()
}
