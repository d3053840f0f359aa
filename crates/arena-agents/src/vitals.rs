//! Hit points, stamina, and status effects.
//!
//! All changes clamp into `0..=100` with saturating arithmetic. An actor at
//! zero hit points is inert: damage, healing, ticks, and maintenance leave
//! them untouched.

use arena_types::{Actor, STAT_MAX, StatusEffect};

use crate::config::RulesConfig;

/// Apply damage. Returns `true` only on the hit that takes the actor from
/// alive to dead, so a death is reported exactly once.
pub fn apply_damage(actor: &mut Actor, dmg: u32) -> bool {
    if !actor.is_alive() {
        return false;
    }
    actor.hp = actor.hp.saturating_sub(dmg).min(STAT_MAX);
    !actor.is_alive()
}

/// Restore hit points, capped at the maximum. Returns the amount gained.
pub fn heal(actor: &mut Actor, amount: u32) -> u32 {
    if !actor.is_alive() {
        return 0;
    }
    let before = actor.hp;
    actor.hp = actor.hp.saturating_add(amount).min(STAT_MAX);
    actor.hp.saturating_sub(before)
}

/// Set hit points to zero. Returns `true` if the actor was alive.
pub fn kill(actor: &mut Actor) -> bool {
    let was_alive = actor.is_alive();
    actor.hp = 0;
    was_alive
}

/// Hops an actor may take in a day.
pub const fn max_steps(actor: &Actor, rules: &RulesConfig) -> u32 {
    if actor.hp > rules.steps_hp_threshold && actor.stamina > rules.steps_stamina_threshold {
        rules.long_steps
    } else {
        rules.short_steps
    }
}

/// Whether an actor is tired enough to rest.
pub const fn is_exhausted(actor: &Actor, rules: &RulesConfig) -> bool {
    actor.stamina <= rules.exhaustion_stamina
}

/// Add a poison status unless one is active. Returns whether it was added.
pub fn apply_poison(actor: &mut Actor, per_day: u32) -> bool {
    if !actor.is_alive() || actor.is_poisoned() {
        return false;
    }
    actor.status.push(StatusEffect::Poison { per_day });
    true
}

/// Remove any poison status. Returns whether one was removed.
pub fn cure_poison(actor: &mut Actor) -> bool {
    let before = actor.status.len();
    actor
        .status
        .retain(|s| !matches!(s, StatusEffect::Poison { .. }));
    actor.status.len() != before
}

/// Outcome of a daily poison tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoisonTick {
    /// Damage dealt.
    pub dmg: u32,
    /// Hit points afterwards.
    pub hp: u32,
    /// The tick was lethal.
    pub died: bool,
}

/// Tick status effects once. Returns the poison tick, if any.
pub fn tick_status(actor: &mut Actor) -> Option<PoisonTick> {
    if !actor.is_alive() {
        return None;
    }
    let dmg = actor.poison_per_day()?;
    let died = apply_damage(actor, dmg);
    Some(PoisonTick {
        dmg,
        hp: actor.hp,
        died,
    })
}

/// End-of-day stamina upkeep: reset inside the hub, drain elsewhere.
pub fn apply_maintenance(actor: &mut Actor, rules: &RulesConfig) {
    if !actor.is_alive() {
        return;
    }
    let next = if actor.area_id.is_hub() {
        rules.hub_stamina
    } else {
        actor.stamina.saturating_sub(rules.stamina_loss)
    };
    actor.stamina = next.min(STAT_MAX);
}

/// Recover stamina by resting. Returns the new stamina.
pub fn rest(actor: &mut Actor, rules: &RulesConfig) -> u32 {
    if actor.is_alive() {
        actor.stamina = actor.stamina.saturating_add(rules.rest_recovery).min(STAT_MAX);
    }
    actor.stamina
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use arena_types::{AreaId, Attributes};

    use super::*;
    use crate::catalog::tests::make_actor;

    fn actor() -> Actor {
        make_actor("npc_2", Attributes { strength: 2, dexterity: 2, perception: 3 })
    }

    #[test]
    fn damage_clamps_and_reports_death_once() {
        let mut a = actor();
        assert!(!apply_damage(&mut a, 60));
        assert!(apply_damage(&mut a, 60));
        assert_eq!(a.hp, 0);
        assert!(!apply_damage(&mut a, 10));
    }

    #[test]
    fn heal_caps_at_max() {
        let mut a = actor();
        a.hp = 90;
        assert_eq!(heal(&mut a, 25), 10);
        assert_eq!(a.hp, 100);
    }

    #[test]
    fn step_budget_depends_on_hp_and_stamina() {
        let rules = RulesConfig::default();
        let mut a = actor();
        assert_eq!(max_steps(&a, &rules), 3);
        a.stamina = 20;
        assert_eq!(max_steps(&a, &rules), 1);
        a.stamina = 21;
        a.hp = 30;
        assert_eq!(max_steps(&a, &rules), 1);
    }

    #[test]
    fn poison_does_not_stack_and_ticks() {
        let mut a = actor();
        assert!(apply_poison(&mut a, 10));
        assert!(!apply_poison(&mut a, 10));
        let tick = tick_status(&mut a).unwrap();
        assert_eq!(tick, PoisonTick { dmg: 10, hp: 90, died: false });
        assert!(cure_poison(&mut a));
        assert!(tick_status(&mut a).is_none());
    }

    #[test]
    fn lethal_tick_reports_death() {
        let mut a = actor();
        a.hp = 5;
        apply_poison(&mut a, 10);
        assert!(tick_status(&mut a).unwrap().died);
        assert_eq!(a.hp, 0);
    }

    #[test]
    fn maintenance_resets_in_hub_and_drains_elsewhere() {
        let rules = RulesConfig::default();
        let mut a = actor();
        a.stamina = 12;
        apply_maintenance(&mut a, &rules);
        assert_eq!(a.stamina, 70);

        a.area_id = AreaId(5);
        a.stamina = 6;
        apply_maintenance(&mut a, &rules);
        assert_eq!(a.stamina, 0);
    }

    #[test]
    fn dead_actors_skip_maintenance() {
        let rules = RulesConfig::default();
        let mut a = actor();
        a.area_id = AreaId(5);
        a.hp = 0;
        apply_maintenance(&mut a, &rules);
        assert_eq!(a.stamina, 70);
    }

    #[test]
    fn rest_recovers_and_caps() {
        let rules = RulesConfig::default();
        let mut a = actor();
        a.stamina = 95;
        assert_eq!(rest(&mut a, &rules), 100);
    }
}
