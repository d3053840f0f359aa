//! Read-only queries over the arena map.
//!
//! The map is external data ([`MapData`]): areas keyed by id plus an
//! undirected adjacency list. [`AreaGraph`] borrows it and answers the
//! questions movement and the intent generator ask: adjacency, whether an
//! area can be entered, what lies within a few hops, and the shortest
//! enterable route between two areas.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use arena_types::{AreaId, HUB_AREA, MapData, MoveBlockReason};

use crate::error::WorldError;

/// Borrowed view of a map for graph queries.
#[derive(Debug, Clone, Copy)]
pub struct AreaGraph<'a> {
    map: &'a MapData,
}

impl<'a> AreaGraph<'a> {
    /// Wrap a map.
    pub const fn new(map: &'a MapData) -> Self {
        Self { map }
    }

    /// Neighbours of an area, in adjacency-list order.
    pub fn neighbors(&self, id: AreaId) -> &'a [AreaId] {
        self.map.adj_by_id.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Whether `to` is listed as a neighbour of `from`.
    pub fn is_adjacent(&self, from: AreaId, to: AreaId) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// Whether an area exists and is still open.
    pub fn is_active(&self, id: AreaId) -> bool {
        self.map.areas_by_id.get(&id).is_some_and(|a| a.is_active)
    }

    /// Check whether an actor may step into `id`.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveBlockReason`] that forbids entering.
    pub fn can_enter(&self, id: AreaId) -> Result<(), MoveBlockReason> {
        let area = self
            .map
            .areas_by_id
            .get(&id)
            .ok_or(MoveBlockReason::MissingArea)?;
        if !area.is_active {
            return Err(MoveBlockReason::AreaClosed);
        }
        if area.has_water && !area.has_bridge {
            return Err(MoveBlockReason::WaterNoBridge);
        }
        Ok(())
    }

    /// Breadth-first search from `start` up to `max_steps` hops, following
    /// only edges into active areas.
    ///
    /// The result starts with `start` itself and lists every other area in
    /// discovery order. No area is visited twice.
    pub fn reachable_within(&self, start: AreaId, max_steps: u32) -> Vec<AreaId> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back((start, 0_u32));

        while let Some((current, depth)) = queue.pop_front() {
            out.push(current);
            if depth >= max_steps {
                continue;
            }
            for &next in self.neighbors(current) {
                if seen.contains(&next) || !self.is_active(next) {
                    continue;
                }
                seen.insert(next);
                queue.push_back((next, depth.saturating_add(1)));
            }
        }
        out
    }

    /// Shortest route from `start` to `goal` through enterable areas.
    ///
    /// The route lists the hops to take and excludes `start`. Returns an
    /// empty route when `start == goal` and `None` when the goal cannot be
    /// reached.
    pub fn shortest_route(&self, start: AreaId, goal: AreaId) -> Option<Vec<AreaId>> {
        if start == goal {
            return Some(Vec::new());
        }

        let mut prev: BTreeMap<AreaId, AreaId> = BTreeMap::new();
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::new();
        seen.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                break;
            }
            for &next in self.neighbors(current) {
                if seen.contains(&next) || self.can_enter(next).is_err() {
                    continue;
                }
                seen.insert(next);
                prev.insert(next, current);
                queue.push_back(next);
            }
        }

        if !prev.contains_key(&goal) {
            return None;
        }

        let mut route = VecDeque::new();
        let mut current = goal;
        while current != start {
            route.push_front(current);
            current = *prev.get(&current)?;
        }
        Some(route.into_iter().collect())
    }

    /// Check structural soundness: a hub exists, every edge points at a
    /// known area, and every edge has its reverse.
    ///
    /// # Errors
    ///
    /// Returns the first [`WorldError`] found.
    pub fn validate(&self) -> Result<(), WorldError> {
        if !self.map.areas_by_id.contains_key(&HUB_AREA) {
            return Err(WorldError::MissingHub);
        }
        for (&from, neighbours) in &self.map.adj_by_id {
            if !self.map.areas_by_id.contains_key(&from) {
                return Err(WorldError::AreaNotFound(from));
            }
            for &to in neighbours {
                if !self.map.areas_by_id.contains_key(&to) {
                    return Err(WorldError::AreaNotFound(to));
                }
                if !self.is_adjacent(to, from) {
                    return Err(WorldError::AsymmetricEdge { from, to });
                }
            }
        }
        Ok(())
    }
}
