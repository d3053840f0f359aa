//! Strike planning and shield interaction.
//!
//! A strike is planned from the attacker's equipped weapon: if the catalog
//! accepts the weapon (requirements met, ammunition held) its damage
//! formula applies, otherwise the attacker fights unarmed. The plan records
//! every side effect the resolver must carry out (ammunition, uses,
//! self-damage, poison) so the resolver never looks at weapon stats itself.

use arena_types::{Actor, ItemDefId};
use arena_world::{DayRng, scale_inclusive};

use crate::catalog::{ItemCatalog, WeaponFailure};
use crate::config::RulesConfig;
use crate::inventory::units_of;

/// Everything a single strike will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strike {
    /// Weapon used; `None` for unarmed.
    pub weapon: Option<ItemDefId>,
    /// Damage before shields or defending.
    pub dmg: u32,
    /// Goes through a raised shield.
    pub pierces_shield: bool,
    /// Splits a raised shield.
    pub breaks_shield: bool,
    /// Poisons on a damaging hit.
    pub poisons: bool,
    /// Damage the attacker takes.
    pub self_damage: u32,
    /// The weapon loses a use.
    pub spends_use: bool,
    /// Ammunition consumed.
    pub ammo: Option<ItemDefId>,
    /// Why the equipped weapon was not used, when it was not.
    pub fallback: Option<WeaponFailure>,
}

impl Strike {
    const fn unarmed(dmg: u32, fallback: Option<WeaponFailure>) -> Self {
        Self {
            weapon: None,
            dmg,
            pierces_shield: false,
            breaks_shield: false,
            poisons: false,
            self_damage: 0,
            spends_use: false,
            ammo: None,
            fallback,
        }
    }
}

/// How a strike met the target's shield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldOutcome {
    /// No shield was raised.
    Unshielded,
    /// The shield stopped the strike.
    Blocked,
    /// The strike split the shield and dealt nothing.
    Broken,
    /// The strike went through the shield.
    Pierced,
}

impl ShieldOutcome {
    /// Damage that lands after the shield.
    pub const fn damage(self, dmg: u32) -> u32 {
        match self {
            Self::Unshielded | Self::Pierced => dmg,
            Self::Blocked | Self::Broken => 0,
        }
    }
}

/// Unarmed damage: `unarmed_min` plus a draw up to `unarmed_max`.
pub fn unarmed_damage(roll: f64, rules: &RulesConfig) -> u32 {
    scale_inclusive(roll, rules.unarmed_min, rules.unarmed_max)
}

/// Plan a strike by `attacker` using draw `salt`.
pub fn plan_strike(
    attacker: &Actor,
    catalog: &impl ItemCatalog,
    rules: &RulesConfig,
    rng: DayRng,
    salt: &str,
) -> Strike {
    let roll = rng.unit(salt);
    let Some(def) = attacker
        .inventory
        .equipped
        .weapon
        .as_ref()
        .and_then(|id| catalog.item_def(id))
    else {
        return Strike::unarmed(unarmed_damage(roll, rules), None);
    };

    let ammo_id = def.weapon.as_ref().and_then(|w| w.ammo.clone());
    let ammo_held = ammo_id
        .as_ref()
        .map_or(0, |a| units_of(&attacker.inventory, a));

    match catalog.compute_weapon_damage(def, ammo_held, attacker, roll) {
        Ok(dmg) => {
            let stats = def.weapon.as_ref();
            let breaks_shield = catalog.is_axe_shield_break(Some(def));
            Strike {
                weapon: Some(def.id.clone()),
                dmg,
                pierces_shield: !breaks_shield && !catalog.is_blocked_by_shield(Some(def)),
                breaks_shield,
                poisons: catalog.is_poison_weapon(Some(def)),
                self_damage: stats.map_or(0, |w| w.self_damage),
                spends_use: stats.is_some_and(|w| w.uses.is_some()),
                ammo: ammo_id,
                fallback: None,
            }
        }
        Err(failure) => {
            tracing::debug!(
                attacker = %attacker.id,
                weapon = %def.id,
                ?failure,
                "weapon unusable, striking unarmed"
            );
            Strike::unarmed(unarmed_damage(roll, rules), Some(failure))
        }
    }
}

/// Resolve a strike against a target whose shield may be raised.
pub const fn shield_outcome(strike: &Strike, shield_raised: bool) -> ShieldOutcome {
    if !shield_raised {
        ShieldOutcome::Unshielded
    } else if strike.breaks_shield {
        ShieldOutcome::Broken
    } else if strike.pierces_shield {
        ShieldOutcome::Pierced
    } else {
        ShieldOutcome::Blocked
    }
}

/// Damage taken while defending without a shield: half, rounded up.
pub const fn defend_reduction(dmg: u32) -> u32 {
    dmg.div_ceil(2)
}
