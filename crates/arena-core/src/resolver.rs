//! Immediate resolution of one actor's Action-1.
//!
//! [`resolve_action`] clones the world, applies a single declared action,
//! and returns the new world together with the events it produced. Every
//! failure is reported as an event with a reason code; nothing here returns
//! an error or leaves the world half-updated.
//!
//! Draw salts are the bare tag (`"atk"`, `"def_dmg"`, ...) for the player
//! and `"{id}|tag"` for anyone else, so the player's draws stay compatible
//! with saves from the browser client.

use arena_agents::combat::{Strike, defend_reduction, plan_strike, shield_outcome};
use arena_agents::inventory::{
    add_to_inventory, auto_equip, consume_one, has_free_slot, remove_inventory_item,
};
use arena_agents::vitals::{apply_damage, apply_poison, cure_poison, heal, kill};
use arena_agents::{ConsumableEffect, ItemCatalog, ItemDefinition, RulesConfig, ShieldOutcome};
use arena_types::{
    Action, ActionFailure, ActorId, DamageSource, DeathCause, DefendNote, Event, FlaskKind,
    ItemDefId, ItemStack, ItemType, NoActionReason, NothingNote, World,
};
use arena_world::DayRng;
use tracing::{debug, warn};

/// Stackable items found in a backpack come in this quantity.
const BACKPACK_STACK_QTY: u32 = 3;

/// A new world plus the events that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The world after the operation.
    pub world: World,
    /// Events in the order they happened.
    pub events: Vec<Event>,
}

/// Rules, catalog, and draw context for one actor's action.
struct Ctx<'a, C> {
    rules: &'a RulesConfig,
    catalog: &'a C,
    rng: DayRng,
    actor: ActorId,
}

impl<C: ItemCatalog> Ctx<'_, C> {
    fn salt(&self, tag: &str) -> String {
        if self.actor.is_player() {
            tag.to_owned()
        } else {
            format!("{}|{tag}", self.actor)
        }
    }
}

/// How a strike's landing is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrikeKind {
    /// The acting actor struck: `ATTACK`.
    Attack,
    /// Someone struck the acting actor: `DAMAGE_RECEIVED`.
    Incoming {
        /// Halve unshielded damage (the victim was defending).
        halve: bool,
    },
}

/// Resolve `action` for `actor` against a copy of `world`.
pub fn resolve_action<C: ItemCatalog>(
    world: &World,
    actor: &ActorId,
    action: &Action,
    rules: &RulesConfig,
    catalog: &C,
) -> Resolution {
    let mut next = world.clone();
    let events = apply_action(&mut next, actor, action, rules, catalog);
    Resolution {
        world: next,
        events,
    }
}

/// Apply `action` for `actor` in place and return the events.
pub fn apply_action<C: ItemCatalog>(
    world: &mut World,
    actor: &ActorId,
    action: &Action,
    rules: &RulesConfig,
    catalog: &C,
) -> Vec<Event> {
    let Some(current) = world.actor(actor) else {
        return vec![Event::NoAction {
            who: actor.clone(),
            reason: NoActionReason::MissingActor,
        }];
    };
    if !current.is_alive() {
        let reason = if current.is_player() {
            NoActionReason::PlayerDead
        } else {
            NoActionReason::ActorDead
        };
        return vec![Event::NoAction {
            who: actor.clone(),
            reason,
        }];
    }

    let ctx = Ctx {
        rules,
        catalog,
        rng: DayRng::new(world.meta.seed, world.meta.day),
        actor: actor.clone(),
    };

    if !action.is_item_action() {
        world.today_mut(actor).defended_with_shield = false;
    }

    let events = match action {
        Action::Attack { target_id } => attack(world, &ctx, target_id),
        Action::Defend => defend(world, &ctx),
        Action::Nothing => nothing(world, &ctx),
        Action::Collect { item_index } => collect(world, &ctx, *item_index),
        Action::UseItem {
            item_index,
            target_id,
        } => use_item(world, &ctx, *item_index, target_id.as_ref()),
    };

    debug!(
        day = world.meta.day,
        actor = %actor,
        ?action,
        events = events.len(),
        "resolved action"
    );
    events
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Living actors sharing `who`'s area, excluding `who`, in registry order.
fn others_here(world: &World, who: &ActorId) -> Vec<ActorId> {
    world.actor(who).map_or_else(Vec::new, |a| {
        world
            .living_in(a.area_id)
            .into_iter()
            .filter(|id| id != who)
            .collect()
    })
}

/// Whether `who` carries an equipped shield that is not broken today.
fn has_usable_shield<C: ItemCatalog>(world: &World, catalog: &C, who: &ActorId) -> bool {
    world.actor(who).is_some_and(|a| {
        a.inventory
            .equipped
            .defense
            .as_ref()
            .is_some_and(|d| catalog.is_shield(d))
    }) && !world.today(who).shield_broken
}

/// Whether the target's shield is up when a strike arrives. NPCs raise an
/// intact shield whenever they are struck.
fn shield_is_raised<C: ItemCatalog>(world: &mut World, catalog: &C, target: &ActorId) -> bool {
    if !has_usable_shield(world, catalog, target) {
        return false;
    }
    if !target.is_player() {
        world.today_mut(target).defended_with_shield = true;
    }
    world.today(target).defended_with_shield
}

fn area_of(world: &World, who: &ActorId) -> Option<arena_types::AreaId> {
    world.actor(who).map(|a| a.area_id)
}

fn death(world: &World, who: &ActorId, cause: DeathCause) -> Option<Event> {
    area_of(world, who).map(|area_id| Event::Death {
        who: who.clone(),
        area_id,
        cause,
    })
}

/// Carry out one strike from `attacker` on `target`. Returns the damage
/// that landed.
fn deliver_strike<C: ItemCatalog>(
    world: &mut World,
    ctx: &Ctx<'_, C>,
    attacker: &ActorId,
    target: &ActorId,
    strike: &Strike,
    kind: StrikeKind,
    events: &mut Vec<Event>,
) -> u32 {
    let raised = shield_is_raised(world, ctx.catalog, target);
    let outcome = shield_outcome(strike, raised);
    let shield_event = match outcome {
        ShieldOutcome::Unshielded => None,
        ShieldOutcome::Blocked => Some(Event::ShieldBlocked {
            who: target.clone(),
            attacker: attacker.clone(),
        }),
        ShieldOutcome::Broken => {
            let flags = world.today_mut(target);
            flags.defended_with_shield = false;
            flags.shield_broken = true;
            Some(Event::ShieldBroken {
                who: target.clone(),
                attacker: attacker.clone(),
            })
        }
        ShieldOutcome::Pierced => Some(Event::ShieldPierced {
            who: target.clone(),
            attacker: attacker.clone(),
        }),
    };
    events.extend(shield_event);

    let mut dmg = outcome.damage(strike.dmg);
    let mut reduced_from = None;
    if matches!(kind, StrikeKind::Incoming { halve: true }) && outcome == ShieldOutcome::Unshielded {
        reduced_from = Some(dmg);
        dmg = defend_reduction(dmg);
    }

    let target_died = world
        .actor_mut(target)
        .is_some_and(|t| apply_damage(t, dmg));
    events.push(match kind {
        StrikeKind::Attack => Event::Attack {
            who: attacker.clone(),
            ok: true,
            target: Some(target.clone()),
            dmg_dealt: dmg,
            reason: None,
        },
        StrikeKind::Incoming { .. } => Event::DamageReceived {
            who: target.clone(),
            from: DamageSource::Actor(attacker.clone()),
            dmg,
            reduced_from,
        },
    });

    if strike.poisons
        && dmg > 0
        && world
            .actor_mut(target)
            .is_some_and(|t| apply_poison(t, ctx.rules.poison_per_day))
    {
        events.push(Event::Poisoned {
            who: target.clone(),
            by: attacker.clone(),
            per_day: ctx.rules.poison_per_day,
        });
    }

    let mut attacker_died = false;
    if strike.self_damage > 0
        && let Some(item) = strike.weapon.clone()
        && let Some(a) = world.actor_mut(attacker)
    {
        attacker_died = apply_damage(a, strike.self_damage);
        events.push(Event::SelfDamage {
            who: attacker.clone(),
            item,
            dmg: strike.self_damage,
        });
    }

    spend_weapon(world, ctx.catalog, attacker, strike, events);

    if target_died {
        events.extend(death(world, target, DeathCause::Combat));
        if attacker.is_player() {
            world.entities.player.kills = world.entities.player.kills.saturating_add(1);
        }
    }
    if attacker_died {
        events.extend(death(world, attacker, DeathCause::SelfInflicted));
    }
    dmg
}

/// Consume ammunition and a use of a limited weapon.
fn spend_weapon<C: ItemCatalog>(
    world: &mut World,
    catalog: &C,
    attacker: &ActorId,
    strike: &Strike,
    events: &mut Vec<Event>,
) {
    let Some(actor) = world.actor_mut(attacker) else {
        return;
    };
    if let Some(ammo) = &strike.ammo {
        consume_one(&mut actor.inventory, ammo);
    }
    if !strike.spends_use {
        return;
    }
    let Some(weapon) = &strike.weapon else {
        return;
    };
    let default_uses = catalog
        .item_def(weapon)
        .and_then(|d| d.weapon.as_ref())
        .and_then(|w| w.uses)
        .unwrap_or(1);
    let Some(idx) = actor.inventory.position(weapon) else {
        return;
    };
    let Some(stack) = actor.inventory.items.get_mut(idx) else {
        return;
    };
    let left = stack.uses_left.unwrap_or(default_uses).saturating_sub(1);
    if left > 0 {
        stack.uses_left = Some(left);
        return;
    }
    if remove_inventory_item(&mut actor.inventory, idx).is_ok() {
        events.push(Event::WeaponSpent {
            who: attacker.clone(),
            item: weapon.clone(),
        });
    }
}

// ---------------------------------------------------------------------------
// Combat actions
// ---------------------------------------------------------------------------

fn attack<C: ItemCatalog>(world: &mut World, ctx: &Ctx<'_, C>, target_id: &ActorId) -> Vec<Event> {
    let fail = |reason| {
        vec![Event::Attack {
            who: ctx.actor.clone(),
            ok: false,
            target: Some(target_id.clone()),
            dmg_dealt: 0,
            reason: Some(reason),
        }]
    };

    let here = area_of(world, &ctx.actor);
    let valid = target_id != &ctx.actor
        && world
            .actor(target_id)
            .is_some_and(|t| t.is_alive() && Some(t.area_id) == here);
    if !valid {
        return fail(ActionFailure::NoValidTarget);
    }
    if world.today(target_id).invisible {
        return fail(ActionFailure::TargetHidden);
    }

    let mut events = Vec::new();
    let Some(attacker) = world.actor(&ctx.actor) else {
        return events;
    };
    let strike = plan_strike(attacker, ctx.catalog, ctx.rules, ctx.rng, &ctx.salt("atk"));
    deliver_strike(world, ctx, &ctx.actor, target_id, &strike, StrikeKind::Attack, &mut events);

    let still_facing = match (world.actor(&ctx.actor), world.actor(target_id)) {
        (Some(a), Some(t)) => a.is_alive() && t.is_alive() && a.area_id == t.area_id,
        _ => false,
    };
    if still_facing
        && ctx.rng.chance(&ctx.salt("ret"), ctx.rules.retaliation_chance)
        && let Some(target) = world.actor(target_id)
    {
        let back = plan_strike(target, ctx.catalog, ctx.rules, ctx.rng, &ctx.salt("ret_dmg"));
        deliver_strike(
            world,
            ctx,
            target_id,
            &ctx.actor,
            &back,
            StrikeKind::Incoming { halve: false },
            &mut events,
        );
    }
    events
}

fn defend<C: ItemCatalog>(world: &mut World, ctx: &Ctx<'_, C>) -> Vec<Event> {
    let shield = has_usable_shield(world, ctx.catalog, &ctx.actor);
    world.today_mut(&ctx.actor).defended_with_shield = shield;

    let note = |note| Event::Defend {
        who: ctx.actor.clone(),
        ok: true,
        shield,
        note,
    };

    let others = others_here(world, &ctx.actor);
    if others.is_empty() {
        return vec![note(Some(DefendNote::NoThreats))];
    }
    if !ctx
        .rng
        .chance(&ctx.salt("def_atk"), ctx.rules.defend_attack_chance)
    {
        return vec![note(Some(DefendNote::NoAttack))];
    }

    let mut events = vec![note(None)];
    let attacker_id = ctx
        .rng
        .pick(&ctx.salt("def_attacker"), others.len())
        .and_then(|i| others.get(i));
    if let Some(attacker_id) = attacker_id
        && let Some(attacker) = world.actor(attacker_id)
    {
        let strike = plan_strike(attacker, ctx.catalog, ctx.rules, ctx.rng, &ctx.salt("def_dmg"));
        deliver_strike(
            world,
            ctx,
            attacker_id,
            &ctx.actor,
            &strike,
            StrikeKind::Incoming { halve: true },
            &mut events,
        );
    }
    events
}

fn nothing<C: ItemCatalog>(world: &mut World, ctx: &Ctx<'_, C>) -> Vec<Event> {
    let note = |note| Event::Nothing {
        who: ctx.actor.clone(),
        ok: true,
        note,
    };

    let others = others_here(world, &ctx.actor);
    let hidden = world.today(&ctx.actor).invisible;
    if !others.is_empty()
        && !hidden
        && ctx
            .rng
            .chance(&ctx.salt("nth_atk"), ctx.rules.surprise_attack_chance)
    {
        let mut events = vec![note(NothingNote::CaughtOffGuard)];
        let attacker_id = ctx
            .rng
            .pick(&ctx.salt("nth_attacker"), others.len())
            .and_then(|i| others.get(i));
        if let Some(attacker_id) = attacker_id
            && let Some(attacker) = world.actor(attacker_id)
        {
            let strike =
                plan_strike(attacker, ctx.catalog, ctx.rules, ctx.rng, &ctx.salt("nth_dmg"));
            deliver_strike(
                world,
                ctx,
                attacker_id,
                &ctx.actor,
                &strike,
                StrikeKind::Incoming { halve: false },
                &mut events,
            );
        }
        return events;
    }

    if ctx.rng.chance(&ctx.salt("nth_haz"), ctx.rules.hazard_chance) {
        let dmg = ctx.rng.range(
            &ctx.salt("nth_haz_dmg"),
            ctx.rules.hazard_min,
            ctx.rules.hazard_max,
        );
        let died = world
            .actor_mut(&ctx.actor)
            .is_some_and(|a| apply_damage(a, dmg));
        let mut events = vec![
            note(NothingNote::Hazard),
            Event::DamageReceived {
                who: ctx.actor.clone(),
                from: DamageSource::Hazard,
                dmg,
                reduced_from: None,
            },
        ];
        if died {
            events.extend(death(world, &ctx.actor, DeathCause::Hazard));
        }
        return events;
    }

    vec![note(NothingNote::QuietDayMoment)]
}

// ---------------------------------------------------------------------------
// Item actions
// ---------------------------------------------------------------------------

/// Bump and return the actor's item-action counter for distinct draws.
fn next_item_counter(world: &mut World, who: &ActorId) -> u32 {
    let flags = world.today_mut(who);
    let n = flags.item_actions;
    flags.item_actions = n.saturating_add(1);
    n
}

/// Fill in pickup-time state: flask kind and weapon uses.
fn prepare_stack<C: ItemCatalog>(
    mut stack: ItemStack,
    def: &ItemDefinition,
    ctx: &Ctx<'_, C>,
    salt: &str,
) -> ItemStack {
    if def.consumable == Some(ConsumableEffect::Flask) && stack.hidden_kind.is_none() {
        stack.hidden_kind = Some(roll_flask(ctx, salt));
        stack.revealed = false;
    }
    if stack.uses_left.is_none() {
        stack.uses_left = def.weapon.as_ref().and_then(|w| w.uses);
    }
    stack
}

fn roll_flask<C: ItemCatalog>(ctx: &Ctx<'_, C>, salt: &str) -> FlaskKind {
    if ctx.rng.chance(&ctx.salt(salt), ctx.rules.medicine_chance) {
        FlaskKind::Medicine
    } else {
        FlaskKind::Poison
    }
}

fn collect<C: ItemCatalog>(world: &mut World, ctx: &Ctx<'_, C>, item_index: usize) -> Vec<Event> {
    let fail = |reason| {
        vec![Event::Collect {
            who: ctx.actor.clone(),
            ok: false,
            item: None,
            reason: Some(reason),
        }]
    };

    let Some(actor) = world.actor(&ctx.actor) else {
        return Vec::new();
    };
    let area_id = actor.area_id;
    let room = has_free_slot(&actor.inventory, ctx.rules.inventory_capacity);
    let Some(ground) = world.area(area_id).map(|a| &a.ground_items) else {
        return fail(ActionFailure::NothingHere);
    };
    if ground.is_empty() {
        return fail(ActionFailure::NothingHere);
    }
    let Some(def) = ground
        .get(item_index)
        .and_then(|s| ctx.catalog.item_def(&s.def_id))
        .cloned()
    else {
        return fail(ActionFailure::BadIndex);
    };
    let merges = def.stackable
        && world
            .actor(&ctx.actor)
            .is_some_and(|a| a.inventory.holds(&def.id));
    if !room && !merges {
        return fail(ActionFailure::InventoryFull);
    }

    let counter = next_item_counter(world, &ctx.actor);
    let Some(stack) = world.area_mut(area_id).and_then(|a| {
        (item_index < a.ground_items.len()).then(|| a.ground_items.remove(item_index))
    }) else {
        return fail(ActionFailure::BadIndex);
    };

    if def.item_type == ItemType::Container {
        return open_backpack(world, ctx, &def.id, counter);
    }

    let stack = prepare_stack(stack, &def, ctx, &format!("pickup|{counter}"));
    let mut events = Vec::new();
    let Some(actor) = world.actor_mut(&ctx.actor) else {
        return events;
    };
    match add_to_inventory(&mut actor.inventory, stack, ctx.rules.inventory_capacity, ctx.catalog) {
        Ok(idx) => {
            events.push(Event::Collect {
                who: ctx.actor.clone(),
                ok: true,
                item: Some(def.id.clone()),
                reason: None,
            });
            if let Some((item, slot)) = auto_equip(&mut actor.inventory, idx, ctx.catalog) {
                events.push(Event::Equip {
                    who: ctx.actor.clone(),
                    item,
                    slot,
                });
            }
        }
        Err(err) => events.extend(fail(err.reason())),
    }
    events
}

fn open_backpack<C: ItemCatalog>(
    world: &mut World,
    ctx: &Ctx<'_, C>,
    backpack: &ItemDefId,
    counter: u32,
) -> Vec<Event> {
    let pool = ctx.catalog.backpack_pool();
    let count = ctx.rng.range(
        &ctx.salt(&format!("bp_count|{counter}")),
        ctx.rules.backpack_min_items,
        ctx.rules.backpack_max_items,
    );

    let mut items = Vec::new();
    let mut dropped = Vec::new();
    let mut equips = Vec::new();
    let mut spill = Vec::new();

    for k in 0..count {
        let Some(def) = ctx
            .rng
            .pick(&ctx.salt(&format!("bp_item|{counter}|{k}")), pool.len())
            .and_then(|i| pool.get(i))
            .and_then(|id| ctx.catalog.item_def(id))
        else {
            continue;
        };
        let qty = if def.stackable { BACKPACK_STACK_QTY } else { 1 };
        let stack = prepare_stack(
            ItemStack::with_qty(def.id.clone(), qty),
            def,
            ctx,
            &format!("bp_flask|{counter}|{k}"),
        );
        let Some(actor) = world.actor_mut(&ctx.actor) else {
            break;
        };
        match add_to_inventory(
            &mut actor.inventory,
            stack.clone(),
            ctx.rules.inventory_capacity,
            ctx.catalog,
        ) {
            Ok(idx) => {
                items.push(def.id.clone());
                equips.extend(auto_equip(&mut actor.inventory, idx, ctx.catalog));
            }
            Err(_) => {
                dropped.push(def.id.clone());
                spill.push(stack);
            }
        }
    }

    if let Some(area_id) = area_of(world, &ctx.actor)
        && let Some(area) = world.area_mut(area_id)
    {
        area.ground_items.extend(spill);
    }

    let mut events = vec![
        Event::Collect {
            who: ctx.actor.clone(),
            ok: true,
            item: Some(backpack.clone()),
            reason: None,
        },
        Event::BackpackOpened {
            who: ctx.actor.clone(),
            items,
            dropped,
        },
    ];
    events.extend(equips.into_iter().map(|(item, slot)| Event::Equip {
        who: ctx.actor.clone(),
        item,
        slot,
    }));
    events
}

/// Remove the unit just used from the stack at `index`.
fn spend_unit(world: &mut World, who: &ActorId, index: usize) {
    let Some(actor) = world.actor_mut(who) else {
        return;
    };
    if let Err(err) = remove_inventory_item(&mut actor.inventory, index) {
        warn!(actor = %who, index, %err, "used item could not be removed");
    }
}

fn use_item<C: ItemCatalog>(
    world: &mut World,
    ctx: &Ctx<'_, C>,
    item_index: usize,
    target_id: Option<&ActorId>,
) -> Vec<Event> {
    let fail = |item: Option<ItemDefId>, target: Option<ActorId>, reason| Event::UseItem {
        who: ctx.actor.clone(),
        ok: false,
        item,
        target,
        reason: Some(reason),
    };

    let Some(stack) = world
        .actor(&ctx.actor)
        .and_then(|a| a.inventory.items.get(item_index))
        .cloned()
    else {
        return vec![fail(None, None, ActionFailure::BadIndex)];
    };
    let item = stack.def_id.clone();
    let Some(effect) = ctx.catalog.item_def(&item).and_then(|d| d.consumable) else {
        return vec![fail(Some(item), None, ActionFailure::NotConsumable)];
    };

    let target = target_id.cloned().unwrap_or_else(|| ctx.actor.clone());
    let on_self = target == ctx.actor;
    if !on_self && !others_here(world, &ctx.actor).contains(&target) {
        return vec![fail(Some(item), Some(target), ActionFailure::NoValidTarget)];
    }

    let counter = next_item_counter(world, &ctx.actor);
    let used = |target: ActorId| Event::UseItem {
        who: ctx.actor.clone(),
        ok: true,
        item: Some(item.clone()),
        target: Some(target),
        reason: None,
    };

    match effect {
        ConsumableEffect::Camouflage => {
            spend_unit(world, &ctx.actor, item_index);
            world.today_mut(&ctx.actor).invisible = true;
            vec![
                used(ctx.actor.clone()),
                Event::Camouflaged {
                    who: ctx.actor.clone(),
                },
            ]
        }
        ConsumableEffect::Flask => {
            let kind = stack
                .hidden_kind
                .unwrap_or_else(|| roll_flask(ctx, &format!("flask|{counter}")));
            let revealed = Event::FlaskRevealed {
                who: ctx.actor.clone(),
                kind,
            };

            if !on_self && kind == FlaskKind::Poison {
                if let Some(s) = world
                    .actor_mut(&ctx.actor)
                    .and_then(|a| a.inventory.items.get_mut(item_index))
                {
                    s.hidden_kind = Some(kind);
                    s.revealed = true;
                }
                return vec![
                    fail(Some(item.clone()), Some(target), ActionFailure::TargetDeclined),
                    revealed,
                ];
            }

            spend_unit(world, &ctx.actor, item_index);
            let mut events = vec![used(target.clone()), revealed];
            match kind {
                FlaskKind::Medicine => {
                    let Some(t) = world.actor_mut(&target) else {
                        return events;
                    };
                    if cure_poison(t) {
                        events.push(Event::PoisonCured { who: target });
                    } else {
                        let amount = heal(t, ctx.rules.medicine_heal);
                        events.push(Event::Healed {
                            who: target,
                            amount,
                            hp: t.hp,
                        });
                    }
                }
                FlaskKind::Poison => {
                    if world.actor_mut(&ctx.actor).is_some_and(kill) {
                        events.extend(death(world, &ctx.actor, DeathCause::Poison));
                    }
                }
            }
            events
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use arena_agents::StandardCatalog;
    use arena_types::{AreaId, EquipSlot, StatusEffect};

    use super::*;
    use crate::test_support::{arm, make_world, place, resolve, shield_up};

    fn rules() -> RulesConfig {
        RulesConfig::default()
    }

    #[test]
    fn dead_player_gets_no_action() {
        let mut world = make_world(3, 1);
        world.entities.player.hp = 0;
        let r = resolve(&world, &ActorId::player(), &Action::Defend, &rules());
        assert_eq!(
            r.events,
            vec![Event::NoAction {
                who: ActorId::player(),
                reason: NoActionReason::PlayerDead
            }]
        );
        assert_eq!(r.world, world);
    }

    #[test]
    fn defend_alone_reports_no_threats() {
        let mut world = make_world(4, 2);
        place(&mut world, &ActorId::player(), AreaId(3));
        let r = resolve(&world, &ActorId::player(), &Action::Defend, &rules());
        assert_eq!(
            r.events,
            vec![Event::Defend {
                who: ActorId::player(),
                ok: true,
                shield: false,
                note: Some(DefendNote::NoThreats)
            }]
        );
        assert_eq!(r.world.entities.player.hp, 100);
    }

    #[test]
    fn defend_with_certain_attack_halves_damage() {
        let world = make_world(2, 5);
        let rules = RulesConfig {
            defend_attack_chance: 1.0,
            ..rules()
        };
        let r = resolve(&world, &ActorId::player(), &Action::Defend, &rules);
        let Some(Event::DamageReceived { dmg, reduced_from: Some(full), .. }) = r.events.get(1) else {
            panic!("expected damage, got {:?}", r.events);
        };
        assert_eq!(*dmg, defend_reduction(*full));
        assert_eq!(r.world.entities.player.hp, 100 - dmg);
    }

    #[test]
    fn attack_on_absent_target_fails() {
        let mut world = make_world(3, 1);
        place(&mut world, &ActorId::npc(1), AreaId(2));
        let r = resolve(
            &world,
            &ActorId::player(),
            &Action::Attack { target_id: ActorId::npc(1) },
            &rules(),
        );
        assert!(matches!(
            r.events.as_slice(),
            [Event::Attack { ok: false, reason: Some(ActionFailure::NoValidTarget), .. }]
        ));
    }

    #[test]
    fn camouflaged_target_cannot_be_attacked() {
        let mut world = make_world(2, 1);
        world.today_mut(&ActorId::npc(1)).invisible = true;
        let r = resolve(
            &world,
            &ActorId::player(),
            &Action::Attack { target_id: ActorId::npc(1) },
            &rules(),
        );
        assert!(matches!(
            r.events.as_slice(),
            [Event::Attack { reason: Some(ActionFailure::TargetHidden), .. }]
        ));
    }

    #[test]
    fn axe_breaks_raised_shield() {
        let mut world = make_world(2, 8);
        let npc = ActorId::npc(1);
        arm(&mut world, &ActorId::player(), "axe");
        world.entities.player.attrs.strength = 4;
        shield_up(&mut world, &npc);
        let rules = RulesConfig {
            retaliation_chance: 0.0,
            ..rules()
        };

        let r = resolve(&world, &ActorId::player(), &Action::Attack { target_id: npc.clone() }, &rules);

        assert_eq!(
            r.events.first(),
            Some(&Event::ShieldBroken { who: npc.clone(), attacker: ActorId::player() })
        );
        assert!(matches!(r.events.get(1), Some(Event::Attack { ok: true, dmg_dealt: 0, .. })));
        assert_eq!(r.world.actor(&npc).unwrap().hp, 100);
        assert!(!r.world.today(&npc).defended_with_shield);
        assert!(r.world.today(&npc).shield_broken);
    }

    #[test]
    fn unarmed_strike_is_blocked_by_shield() {
        let mut world = make_world(2, 8);
        let npc = ActorId::npc(1);
        shield_up(&mut world, &npc);
        let rules = RulesConfig {
            retaliation_chance: 0.0,
            ..rules()
        };
        let r = resolve(&world, &ActorId::player(), &Action::Attack { target_id: npc.clone() }, &rules);
        assert!(matches!(r.events.first(), Some(Event::ShieldBlocked { .. })));
        assert_eq!(r.world.actor(&npc).unwrap().hp, 100);
    }

    #[test]
    fn spear_pierces_shield() {
        let mut world = make_world(2, 8);
        let npc = ActorId::npc(1);
        arm(&mut world, &ActorId::player(), "spear");
        world.entities.player.attrs.dexterity = 3;
        shield_up(&mut world, &npc);
        let rules = RulesConfig {
            retaliation_chance: 0.0,
            ..rules()
        };
        let r = resolve(&world, &ActorId::player(), &Action::Attack { target_id: npc.clone() }, &rules);
        assert!(matches!(r.events.first(), Some(Event::ShieldPierced { .. })));
        assert!(r.world.actor(&npc).unwrap().hp < 100);
    }

    #[test]
    fn lethal_attack_counts_kill_and_emits_one_death() {
        let mut world = make_world(2, 4);
        let npc = ActorId::npc(1);
        world.entities.npcs.get_mut(&npc).unwrap().hp = 3;
        let r = resolve(&world, &ActorId::player(), &Action::Attack { target_id: npc.clone() }, &rules());
        let deaths: Vec<_> = r.events.iter().filter(|e| e.is_death()).collect();
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths.first().unwrap().who(), Some(&npc));
        assert_eq!(r.world.entities.player.kills, 1);
        // The dead cannot retaliate.
        assert!(!r.events.iter().any(|e| matches!(e, Event::DamageReceived { .. })));
    }

    #[test]
    fn certain_retaliation_hurts_attacker() {
        let world = make_world(2, 4);
        let rules = RulesConfig {
            retaliation_chance: 1.0,
            ..rules()
        };
        let r = resolve(
            &world,
            &ActorId::player(),
            &Action::Attack { target_id: ActorId::npc(1) },
            &rules,
        );
        assert!(matches!(
            r.events.get(1),
            Some(Event::DamageReceived { from: DamageSource::Actor(_), reduced_from: None, .. })
        ));
        assert!(r.world.entities.player.hp < 100);
    }

    #[test]
    fn blowgun_poisons_once_and_wears_out() {
        let mut world = make_world(2, 6);
        let npc = ActorId::npc(1);
        arm(&mut world, &ActorId::player(), "blowgun");
        let rules = RulesConfig {
            retaliation_chance: 0.0,
            ..rules()
        };
        let attack = Action::Attack { target_id: npc.clone() };

        let mut w = world;
        let mut poisoned = 0;
        for day in 1..=3 {
            w.meta.day = day;
            let r = resolve(&w, &ActorId::player(), &attack, &rules);
            poisoned += r.events.iter().filter(|e| matches!(e, Event::Poisoned { .. })).count();
            if day == 3 {
                assert!(r.events.iter().any(|e| matches!(e, Event::WeaponSpent { .. })));
            }
            w = r.world;
        }
        assert_eq!(poisoned, 1);
        assert_eq!(w.actor(&npc).unwrap().status, vec![StatusEffect::Poison { per_day: 10 }]);
        assert!(w.entities.player.inventory.items.is_empty());
        assert!(w.entities.player.inventory.equipped.weapon.is_none());
    }

    #[test]
    fn grenade_hurts_thrower() {
        let mut world = make_world(2, 6);
        arm(&mut world, &ActorId::player(), "grenade");
        let rules = RulesConfig {
            retaliation_chance: 0.0,
            ..rules()
        };
        let r = resolve(&world, &ActorId::player(), &Action::Attack { target_id: ActorId::npc(1) }, &rules);
        let kinds: Vec<_> = r
            .events
            .iter()
            .map(|e| serde_json::to_value(e).unwrap()["type"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(kinds, vec!["ATTACK", "SELF_DAMAGE", "WEAPON_SPENT"]);
        assert_eq!(r.world.entities.player.hp, 90);
    }

    #[test]
    fn nothing_with_certain_hazard() {
        let mut world = make_world(2, 6);
        place(&mut world, &ActorId::player(), AreaId(2));
        let rules = RulesConfig {
            hazard_chance: 1.0,
            ..rules()
        };
        let r = resolve(&world, &ActorId::player(), &Action::Nothing, &rules);
        let Some(Event::DamageReceived { from: DamageSource::Hazard, dmg, .. }) = r.events.get(1) else {
            panic!("expected hazard damage");
        };
        assert!((3..=7).contains(dmg));
    }

    #[test]
    fn camouflage_skips_surprise_attack() {
        let mut world = make_world(3, 6);
        world.today_mut(&ActorId::player()).invisible = true;
        let rules = RulesConfig {
            surprise_attack_chance: 1.0,
            hazard_chance: 0.0,
            ..rules()
        };
        let r = resolve(&world, &ActorId::player(), &Action::Nothing, &rules);
        assert_eq!(
            r.events,
            vec![Event::Nothing {
                who: ActorId::player(),
                ok: true,
                note: NothingNote::QuietDayMoment
            }]
        );
    }

    #[test]
    fn collect_from_empty_ground_fails() {
        let world = make_world(2, 6);
        let r = resolve(&world, &ActorId::player(), &Action::Collect { item_index: 0 }, &rules());
        assert!(matches!(
            r.events.as_slice(),
            [Event::Collect { ok: false, reason: Some(ActionFailure::NothingHere), .. }]
        ));
    }

    #[test]
    fn collected_weapon_is_equipped() {
        let mut world = make_world(2, 6);
        world.area_mut(AreaId(1)).unwrap().ground_items.push(ItemStack::single("knife"));
        let r = resolve(&world, &ActorId::player(), &Action::Collect { item_index: 0 }, &rules());
        assert!(matches!(
            r.events.get(1),
            Some(Event::Equip { slot: EquipSlot::Weapon, .. })
        ));
        assert!(r.world.area(AreaId(1)).unwrap().ground_items.is_empty());
        assert_eq!(r.world.today(&ActorId::player()).item_actions, 1);
    }

    #[test]
    fn full_inventory_refuses_pickup() {
        let mut world = make_world(2, 6);
        world.area_mut(AreaId(1)).unwrap().ground_items.push(ItemStack::single("knife"));
        let rules = RulesConfig {
            inventory_capacity: 0,
            ..rules()
        };
        let r = resolve(&world, &ActorId::player(), &Action::Collect { item_index: 0 }, &rules);
        assert!(matches!(
            r.events.as_slice(),
            [Event::Collect { reason: Some(ActionFailure::InventoryFull), .. }]
        ));
        assert_eq!(r.world.area(AreaId(1)).unwrap().ground_items.len(), 1);
    }

    #[test]
    fn ammo_merges_into_held_stack_when_full() {
        let mut world = make_world(2, 6);
        world.entities.player.inventory.items.push(ItemStack::with_qty("arrows", 2));
        world.area_mut(AreaId(1)).unwrap().ground_items.push(ItemStack::single("arrows"));
        let rules = RulesConfig {
            inventory_capacity: 1,
            ..rules()
        };
        let r = resolve(&world, &ActorId::player(), &Action::Collect { item_index: 0 }, &rules);
        assert!(matches!(
            r.events.first(),
            Some(Event::Collect { ok: true, .. })
        ));
        let items = &r.world.entities.player.inventory.items;
        assert_eq!(items.len(), 1);
        assert_eq!(items.first().unwrap().qty, 3);
        assert!(r.world.area(AreaId(1)).unwrap().ground_items.is_empty());
    }

    #[test]
    fn backpack_opens_into_items_and_spills_overflow() {
        let mut world = make_world(2, 6);
        world.area_mut(AreaId(1)).unwrap().ground_items.push(ItemStack::single("backpack"));
        let rules = RulesConfig {
            inventory_capacity: 1,
            backpack_min_items: 3,
            backpack_max_items: 3,
            ..rules()
        };
        let r = resolve(&world, &ActorId::player(), &Action::Collect { item_index: 0 }, &rules);
        let Some(Event::BackpackOpened { items, dropped, .. }) = r.events.get(1) else {
            panic!("expected backpack, got {:?}", r.events);
        };
        assert_eq!(items.len() + dropped.len(), 3);
        assert!(!items.is_empty());
        let ground = &r.world.area(AreaId(1)).unwrap().ground_items;
        assert_eq!(ground.len(), dropped.len());
        assert!(!r.world.entities.player.inventory.holds(&ItemDefId::new("backpack")));
    }

    #[test]
    fn flask_kind_is_fixed_at_pickup() {
        let mut world = make_world(2, 6);
        world.area_mut(AreaId(1)).unwrap().ground_items.push(ItemStack::single("flask"));
        let r = resolve(&world, &ActorId::player(), &Action::Collect { item_index: 0 }, &rules());
        let stack = r.world.entities.player.inventory.items.first().unwrap();
        assert!(stack.hidden_kind.is_some());
        assert!(!stack.revealed);
    }

    #[test]
    fn medicine_cures_poison() {
        let mut world = make_world(2, 6);
        let mut flask = ItemStack::single("flask");
        flask.hidden_kind = Some(FlaskKind::Medicine);
        world.entities.player.inventory.items.push(flask);
        world.entities.player.status.push(StatusEffect::Poison { per_day: 10 });
        let r = resolve(
            &world,
            &ActorId::player(),
            &Action::UseItem { item_index: 0, target_id: None },
            &rules(),
        );
        assert!(r.events.contains(&Event::PoisonCured { who: ActorId::player() }));
        assert!(!r.world.entities.player.is_poisoned());
        assert!(r.world.entities.player.inventory.items.is_empty());
    }

    #[test]
    fn self_applied_poison_is_lethal() {
        let mut world = make_world(2, 6);
        let mut flask = ItemStack::single("flask");
        flask.hidden_kind = Some(FlaskKind::Poison);
        world.entities.player.inventory.items.push(flask);
        let r = resolve(
            &world,
            &ActorId::player(),
            &Action::UseItem { item_index: 0, target_id: None },
            &rules(),
        );
        assert_eq!(r.world.entities.player.hp, 0);
        assert!(matches!(r.events.last(), Some(Event::Death { cause: DeathCause::Poison, .. })));
    }

    #[test]
    fn poison_offer_is_declined_and_item_kept() {
        let mut world = make_world(2, 6);
        let mut flask = ItemStack::single("flask");
        flask.hidden_kind = Some(FlaskKind::Poison);
        world.entities.player.inventory.items.push(flask);
        let r = resolve(
            &world,
            &ActorId::player(),
            &Action::UseItem { item_index: 0, target_id: Some(ActorId::npc(1)) },
            &rules(),
        );
        assert!(matches!(
            r.events.first(),
            Some(Event::UseItem { ok: false, reason: Some(ActionFailure::TargetDeclined), .. })
        ));
        let kept = r.world.entities.player.inventory.items.first().unwrap();
        assert!(kept.revealed);
        assert_eq!(r.world.actor(&ActorId::npc(1)).unwrap().hp, 100);
    }

    #[test]
    fn camouflage_hides_user() {
        let mut world = make_world(2, 6);
        world.entities.player.inventory.items.push(ItemStack::single("camouflage"));
        let r = resolve(
            &world,
            &ActorId::player(),
            &Action::UseItem { item_index: 0, target_id: None },
            &rules(),
        );
        assert!(r.world.today(&ActorId::player()).invisible);
        assert!(r.events.contains(&Event::Camouflaged { who: ActorId::player() }));
        assert!(r.world.entities.player.inventory.items.is_empty());
    }

    #[test]
    fn using_one_unit_leaves_the_rest_of_the_stack() {
        let mut world = make_world(2, 6);
        world.entities.player.inventory.items.push(ItemStack::with_qty("camouflage", 2));
        let r = resolve(
            &world,
            &ActorId::player(),
            &Action::UseItem { item_index: 0, target_id: None },
            &rules(),
        );
        let left = r.world.entities.player.inventory.items.first().unwrap();
        assert_eq!(left.qty, 1);
        assert!(r.world.today(&ActorId::player()).invisible);
    }

    #[test]
    fn weapons_cannot_be_used_as_consumables() {
        let mut world = make_world(2, 6);
        arm(&mut world, &ActorId::player(), "knife");
        let r = resolve(
            &world,
            &ActorId::player(),
            &Action::UseItem { item_index: 0, target_id: None },
            &rules(),
        );
        assert!(matches!(
            r.events.as_slice(),
            [Event::UseItem { reason: Some(ActionFailure::NotConsumable), .. }]
        ));
    }

    #[test]
    fn npc_draws_are_salted_by_id() {
        let world = make_world(3, 21);
        let catalog = StandardCatalog::new();
        let rules = RulesConfig {
            hazard_chance: 0.5,
            surprise_attack_chance: 0.0,
            ..rules()
        };
        let a = resolve_action(&world, &ActorId::npc(1), &Action::Nothing, &rules, &catalog);
        let b = resolve_action(&world, &ActorId::npc(1), &Action::Nothing, &rules, &catalog);
        assert_eq!(a, b);
    }
}
