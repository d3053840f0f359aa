//! Deterministic lattice map used when no external map is supplied.
//!
//! Cells of a near-square grid are numbered outward from the centre, so the
//! hub (area 1) sits in the middle and the highest ids lie on the rim. That
//! ordering makes the closure policy shrink the arena from the edges in.
//! Biomes, water, bridges, and food are painted from seeded draws.

use arena_types::{Area, AreaId, Biome, HUB_AREA, MapData};

use crate::area_graph::AreaGraph;
use crate::error::WorldError;
use crate::rng::{random_unscoped, scale_index};

/// Probability that a wet area carries a bridge.
const BRIDGE_CHANCE: f64 = 0.5;

/// Probability that a dry, green area has food.
const FOOD_CHANCE: f64 = 0.3;

/// A grid cell and its numbering key.
#[derive(Debug, Clone, Copy)]
struct Cell {
    row: u32,
    col: u32,
    ring: u32,
}

/// Smallest `cols` with `cols * cols >= count`.
fn grid_width(count: u32) -> u32 {
    let mut cols = 1_u32;
    while cols.saturating_mul(cols) < count {
        cols = cols.saturating_add(1);
    }
    cols
}

/// Build a connected lattice of `count` areas from `seed`.
///
/// # Errors
///
/// Returns [`WorldError::MapTooSmall`] when `count < 2`, or any
/// validation error from [`AreaGraph::validate`].
pub fn build_grid_map(count: u32, seed: u64) -> Result<MapData, WorldError> {
    if count < 2 {
        return Err(WorldError::MapTooSmall(count));
    }

    let cols = grid_width(count);
    let rows = count.div_ceil(cols);
    let centre_row = rows.saturating_sub(1) / 2;
    let centre_col = cols.saturating_sub(1) / 2;

    let mut cells = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let ring = row.abs_diff(centre_row).saturating_add(col.abs_diff(centre_col));
            cells.push(Cell { row, col, ring });
        }
    }
    cells.sort_by_key(|c| (c.ring, c.row, c.col));
    cells.truncate(usize::try_from(count).unwrap_or(usize::MAX));

    // Grid position -> area id.
    let mut ids = std::collections::BTreeMap::new();
    let mut next = 1_u32;
    for cell in &cells {
        ids.insert((cell.row, cell.col), AreaId(next));
        next = next.saturating_add(1);
    }

    let mut map = MapData::default();
    for cell in &cells {
        let Some(&id) = ids.get(&(cell.row, cell.col)) else {
            continue;
        };
        let area = paint_area(id, cell.ring, seed);
        if map.areas_by_id.insert(id, area).is_some() {
            return Err(WorldError::DuplicateArea(id));
        }

        let mut neighbours = Vec::new();
        let candidates = [
            cell.row.checked_sub(1).map(|r| (r, cell.col)),
            Some((cell.row, cell.col.saturating_add(1))),
            Some((cell.row.saturating_add(1), cell.col)),
            cell.col.checked_sub(1).map(|c| (cell.row, c)),
        ];
        for pos in candidates.into_iter().flatten() {
            if let Some(&n) = ids.get(&pos)
                && n != id
            {
                neighbours.push(n);
            }
        }
        neighbours.sort();
        map.adj_by_id.insert(id, neighbours);
    }

    AreaGraph::new(&map).validate()?;
    tracing::debug!(count, seed, cols, rows, "built grid map");
    Ok(map)
}

/// Paint one area. The hub and its ring stay dry so the start is never
/// boxed in by water.
fn paint_area(id: AreaId, ring: u32, seed: u64) -> Area {
    if id == HUB_AREA {
        return Area::new(id, Biome::Cornucopia);
    }

    let r = random_unscoped(seed, &format!("biome|{id}"));
    let mut biome = scale_index(r, Biome::WILD.len())
        .and_then(|i| Biome::WILD.get(i).copied())
        .unwrap_or(Biome::Plains);
    if ring <= 1 && biome.is_wet() {
        biome = Biome::Plains;
    }

    let mut area = Area::new(id, biome);
    area.has_water = biome.is_wet();
    area.has_bridge =
        area.has_water && random_unscoped(seed, &format!("bridge|{id}")) < BRIDGE_CHANCE;
    area.has_food = matches!(biome, Biome::Plains | Biome::Forest | Biome::Jungle)
        && random_unscoped(seed, &format!("food|{id}")) < FOOD_CHANCE;
    area
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use arena_types::MapSize;

    use super::*;

    #[test]
    fn builds_requested_area_count() {
        for size in [MapSize::Small, MapSize::Medium, MapSize::Large] {
            let map = build_grid_map(size.area_count(), 1).unwrap();
            assert_eq!(map.areas_by_id.len(), size.area_count() as usize);
            assert_eq!(map.areas_by_id.keys().next(), Some(&AreaId(1)));
        }
    }

    #[test]
    fn hub_is_cornucopia_and_dry() {
        let map = build_grid_map(24, 99).unwrap();
        let hub = &map.areas_by_id[&HUB_AREA];
        assert_eq!(hub.biome, Biome::Cornucopia);
        assert!(!hub.has_water);
        for n in &map.adj_by_id[&HUB_AREA] {
            assert!(!map.areas_by_id[n].has_water);
        }
    }

    #[test]
    fn hub_has_four_neighbours() {
        let map = build_grid_map(48, 3).unwrap();
        assert_eq!(map.adj_by_id[&HUB_AREA].len(), 4);
    }

    #[test]
    fn same_seed_same_map() {
        assert_eq!(build_grid_map(48, 5).unwrap(), build_grid_map(48, 5).unwrap());
        assert_ne!(build_grid_map(48, 5).unwrap(), build_grid_map(48, 6).unwrap());
    }

    #[test]
    fn lattice_is_connected_ignoring_water() {
        let map = build_grid_map(72, 11).unwrap();
        let reached = AreaGraph::new(&map).reachable_within(HUB_AREA, 72);
        assert_eq!(reached.len(), 72);
    }

    #[test]
    fn tiny_maps_are_rejected() {
        assert!(matches!(build_grid_map(1, 0), Err(WorldError::MapTooSmall(1))));
    }
}
