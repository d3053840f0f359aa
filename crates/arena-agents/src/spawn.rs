//! Seeded creation of actors: attributes, districts, and names.
//!
//! All draws here use the day-less key `"{seed}|{salt}"`, so the same seed
//! always produces the same roster.

use arena_types::{
    Actor, ActorId, ActorKind, Attributes, DISTRICT_COUNT, HUB_AREA, Inventory,
};
use arena_world::{random_unscoped, scale_index};

use crate::config::RulesConfig;

/// Creation points split across the three attributes.
pub const ATTRIBUTE_POINTS: u8 = 7;

/// Distribute [`ATTRIBUTE_POINTS`] points, one seeded draw per point.
pub fn roll_attributes(seed: u64, id: &ActorId) -> Attributes {
    let mut attrs = Attributes::default();
    for i in 0..ATTRIBUTE_POINTS {
        let r = random_unscoped(seed, &format!("{id}|attr|{i}"));
        let slot = if r < 0.34 {
            &mut attrs.strength
        } else if r < 0.67 {
            &mut attrs.dexterity
        } else {
            &mut attrs.perception
        };
        *slot = slot.saturating_add(1);
    }
    attrs
}

/// Home district in `1..=12`.
pub fn roll_district(seed: u64, id: &ActorId) -> u8 {
    let r = random_unscoped(seed, &format!("{id}|district"));
    scale_index(r, usize::from(DISTRICT_COUNT))
        .and_then(|i| u8::try_from(i).ok())
        .map_or(1, |i| i.saturating_add(1))
}

/// Seeded Fisher-Yates shuffle of `count` names.
///
/// The pool is padded with `Tribute N` placeholders up to `count`.
pub fn shuffle_names(seed: u64, pool: &[String], count: usize) -> Vec<String> {
    let mut names: Vec<String> = pool.to_vec();
    let first_placeholder = names.len().saturating_add(1);
    names.extend((first_placeholder..=count).map(|n| format!("Tribute {n}")));
    let mut i = names.len().saturating_sub(1);
    while i > 0 {
        let r = random_unscoped(seed, &format!("shuffle|{i}"));
        let j = scale_index(r, i.saturating_add(1)).unwrap_or(i);
        names.swap(i, j);
        i = i.saturating_sub(1);
    }
    names
}

/// A fresh actor standing in the hub with starting vitals.
pub fn spawn_actor(
    id: ActorId,
    kind: ActorKind,
    name: String,
    district: u8,
    seed: u64,
    rules: &RulesConfig,
) -> Actor {
    let attrs = roll_attributes(seed, &id);
    Actor {
        id,
        kind,
        name,
        district,
        area_id: HUB_AREA,
        hp: rules.start_hp,
        stamina: rules.start_stamina,
        attrs,
        status: Vec::new(),
        inventory: Inventory::default(),
        kills: 0,
    }
}
