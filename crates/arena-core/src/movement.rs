//! Movement rules: one hop at a time.
//!
//! A hop is legal when the mover is alive, their current area is still
//! open, the destination is adjacent, and the destination can be entered.
//! Routes are walked hop by hop and stop at the first refusal; a route
//! longer than the mover's step budget is refused outright.

use arena_agents::RulesConfig;
use arena_agents::vitals::max_steps;
use arena_types::{
    ActorId, AreaId, Event, HUB_AREA, IntentRejection, MapData, MoveBlockReason, World,
};
use arena_world::AreaGraph;

/// Result of a movement attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Every requested hop was taken.
    pub ok: bool,
    /// `MOVE` and `MOVE_BLOCKED` events, in order.
    pub events: Vec<Event>,
}

/// Move `who` one hop to `to`.
///
/// A dead actor is refused without events; an unknown one yields
/// `INTENT_REJECTED(unknown_source)`. A successful hop by the player also
/// records `to` (and the hub) as visited.
pub fn move_actor_one_step(world: &mut World, who: &ActorId, to: AreaId) -> MoveOutcome {
    let Some(actor) = world.actor(who) else {
        return unknown_mover(who);
    };
    if !actor.is_alive() {
        return MoveOutcome::default();
    }
    let from = actor.area_id;

    let graph = AreaGraph::new(&world.map);
    let refusal = if !graph.is_active(from) {
        Some(MoveBlockReason::StartAreaClosed)
    } else if !graph.is_adjacent(from, to) {
        Some(MoveBlockReason::NotAdjacent)
    } else {
        graph.can_enter(to).err()
    };

    if let Some(reason) = refusal {
        tracing::debug!(actor = %who, %from, %to, ?reason, "move blocked");
        return MoveOutcome {
            ok: false,
            events: vec![Event::MoveBlocked {
                who: who.clone(),
                from,
                to,
                reason,
            }],
        };
    }

    if let Some(actor) = world.actor_mut(who) {
        actor.area_id = to;
    }
    if who.is_player() {
        world.flags.visited_areas.insert(HUB_AREA);
        world.flags.visited_areas.insert(to);
    }
    MoveOutcome {
        ok: true,
        events: vec![Event::Move {
            who: who.clone(),
            from,
            to,
        }],
    }
}

fn unknown_mover(who: &ActorId) -> MoveOutcome {
    tracing::warn!(actor = %who, "move for unknown actor");
    MoveOutcome {
        ok: false,
        events: vec![Event::IntentRejected {
            who: who.clone(),
            reason: IntentRejection::UnknownSource,
        }],
    }
}

/// Turn a declared route into hops. A single destination that is not
/// adjacent to `from` becomes the shortest open route to it.
///
/// # Errors
///
/// Returns `empty_route` for an empty route and `no_route` when a far
/// destination cannot be reached.
pub fn expand_route(
    map: &MapData,
    from: AreaId,
    route: &[AreaId],
) -> Result<Vec<AreaId>, IntentRejection> {
    let graph = AreaGraph::new(map);
    match route {
        [] => Err(IntentRejection::EmptyRoute),
        [dest] if !graph.is_adjacent(from, *dest) => graph
            .shortest_route(from, *dest)
            .ok_or(IntentRejection::NoRoute),
        hops => Ok(hops.to_vec()),
    }
}

/// Walk `route` hop by hop, stopping at the first blocked hop.
///
/// A route longer than the mover's step budget is refused with
/// `route_too_long` before anything moves.
pub fn move_along_route(
    world: &mut World,
    who: &ActorId,
    route: &[AreaId],
    rules: &RulesConfig,
) -> MoveOutcome {
    let Some(actor) = world.actor(who) else {
        return unknown_mover(who);
    };
    if !actor.is_alive() {
        return MoveOutcome::default();
    }
    let budget = usize::try_from(max_steps(actor, rules)).unwrap_or(usize::MAX);
    if route.len() > budget {
        let from = actor.area_id;
        let to = route.last().copied().unwrap_or(from);
        return MoveOutcome {
            ok: false,
            events: vec![Event::MoveBlocked {
                who: who.clone(),
                from,
                to,
                reason: MoveBlockReason::RouteTooLong,
            }],
        };
    }

    let mut outcome = MoveOutcome {
        ok: true,
        events: Vec::new(),
    };
    for &hop in route {
        let step = move_actor_one_step(world, who, hop);
        outcome.events.extend(step.events);
        if !step.ok {
            outcome.ok = false;
            break;
        }
    }
    outcome
}
