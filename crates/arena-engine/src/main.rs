//! Headless runner for the arena simulation.
//!
//! Plays a whole game without a browser: the player's turns come from a
//! scripted autopilot, NPCs use the standard seeded AI, and the final world
//! is written as a versioned JSON save that `load_world` reads back.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `arena-config.yaml` (or `ARENA_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Pick the seed and build the lattice map
//! 4. Create day 1
//! 5. Play days until the game is decided or the day limit is reached
//! 6. Save the final world

mod autopilot;
mod error;

use std::path::PathBuf;

use arena_core::persistence::export_file_name;
use arena_core::{
    ArenaConfig, Engine, LoggingConfig, WorldParams, game_status, save_world,
};
use arena_types::{GameStatus, MapSize};
use arena_world::build_grid_map;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point for the arena runner.
///
/// # Errors
///
/// Returns an error if the config cannot be read, the map cannot be built,
/// or the final save cannot be written.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config_path = ArenaConfig::path_from_env();
    let config = if config_path.exists() {
        ArenaConfig::from_file(&config_path)?
    } else {
        ArenaConfig::default()
    };

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        path = %config_path.display(),
        found = config_path.exists(),
        "arena-engine starting"
    );

    // 3. Seed and map.
    let seed = config.world.seed.unwrap_or_else(rand::random::<u64>);
    if MapSize::from_area_count(config.world.map_size).is_none() {
        warn!(
            map_size = config.world.map_size,
            "non-standard map size, building it anyway"
        );
    }
    let map = build_grid_map(config.world.map_size, seed)?;
    info!(seed, areas = map.areas_by_id.len(), "map built");

    // 4. Day 1.
    let engine = Engine::new(config.rules.clone());
    let mut world = engine.create_world(&WorldParams {
        seed,
        map_size: config.world.map_size,
        map,
        total_players: config.world.total_players,
        player_district: config.world.player_district,
        tribute_names: config.world.tribute_names.clone(),
    })?;

    // 5. Play.
    for _ in 0..config.world.days {
        if game_status(&world) != GameStatus::Running {
            break;
        }
        let turn = autopilot::plan_turn(&world, engine.rules(), engine.catalog(), &config.autopilot);
        world = engine.play_day(&world, &turn);
        info!(
            day = world.meta.day,
            hp = world.entities.player.hp,
            stamina = world.entities.player.stamina,
            area = %world.entities.player.area_id,
            alive = world.living_count(),
            closed = world.flags.closed_areas.len(),
            "day played"
        );
    }

    let status = game_status(&world);
    info!(
        ?status,
        day = world.meta.day,
        kills = world.entities.player.kills,
        "game finished"
    );

    // 6. Save.
    let path = config
        .output
        .save_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(export_file_name(&world)));
    save_world(&path, &world)?;

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the config level.
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}
