//! Tunable rules for the arena.
//!
//! [`RulesConfig`] bundles every probability, damage range, and stamina
//! constant the day cycle uses. It is deserialized from the `rules` section
//! of `arena-config.yaml`; any field left out takes its default, so an empty
//! section yields the standard rules.

use arena_world::ClosureSchedule;
use serde::Deserialize;

/// Rules applied by the intent generator, resolver, and orchestrator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Hit points for new actors (default: 100).
    pub start_hp: u32,
    /// Stamina for new actors (default: 70).
    pub start_stamina: u32,

    /// NPC chance to attack when someone shares their area (default: 0.40).
    pub npc_attack_chance: f64,
    /// NPC chance to stay put instead of moving (default: 0.20).
    pub npc_stay_chance: f64,

    /// Step budget for healthy actors (default: 3).
    pub long_steps: u32,
    /// Step budget for hurt or tired actors (default: 1).
    pub short_steps: u32,
    /// Hit points an actor must exceed for the long budget (default: 30).
    pub steps_hp_threshold: u32,
    /// Stamina an actor must exceed for the long budget (default: 20).
    pub steps_stamina_threshold: u32,

    /// Stamina at or below which NPCs rest instead of staying (default: 20).
    pub exhaustion_stamina: u32,
    /// Stamina recovered by resting (default: 15).
    pub rest_recovery: u32,

    /// Lowest unarmed damage (default: 5).
    pub unarmed_min: u32,
    /// Highest unarmed damage (default: 8).
    pub unarmed_max: u32,
    /// Chance a surviving target strikes back (default: 0.55).
    pub retaliation_chance: f64,
    /// Chance a defender is attacked (default: 0.50).
    pub defend_attack_chance: f64,
    /// Chance an idle actor is caught off guard (default: 0.35).
    pub surprise_attack_chance: f64,
    /// Chance an idle actor meets a hazard (default: 0.15).
    pub hazard_chance: f64,
    /// Lowest hazard damage (default: 3).
    pub hazard_min: u32,
    /// Highest hazard damage (default: 7).
    pub hazard_max: u32,

    /// Poison damage per day (default: 10).
    pub poison_per_day: u32,
    /// Hit points restored by medicine (default: 25).
    pub medicine_heal: u32,
    /// Chance a picked-up flask is medicine (default: 0.5).
    pub medicine_chance: f64,

    /// Stamina lost per day outside the hub (default: 10).
    pub stamina_loss: u32,
    /// Stamina set inside the hub (default: 70).
    pub hub_stamina: u32,

    /// Inventory slots (default: 6).
    pub inventory_capacity: u32,
    /// Fewest items in a backpack (default: 2).
    pub backpack_min_items: u32,
    /// Most items in a backpack (default: 3).
    pub backpack_max_items: u32,

    /// Area closure schedule.
    pub closures: ClosureSchedule,

    /// Item definitions placed on the hub's ground at world creation.
    pub hub_loot: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            start_hp: 100,
            start_stamina: 70,
            npc_attack_chance: 0.40,
            npc_stay_chance: 0.20,
            long_steps: 3,
            short_steps: 1,
            steps_hp_threshold: 30,
            steps_stamina_threshold: 20,
            exhaustion_stamina: 20,
            rest_recovery: 15,
            unarmed_min: 5,
            unarmed_max: 8,
            retaliation_chance: 0.55,
            defend_attack_chance: 0.50,
            surprise_attack_chance: 0.35,
            hazard_chance: 0.15,
            hazard_min: 3,
            hazard_max: 7,
            poison_per_day: 10,
            medicine_heal: 25,
            medicine_chance: 0.5,
            stamina_loss: 10,
            hub_stamina: 70,
            inventory_capacity: 6,
            backpack_min_items: 2,
            backpack_max_items: 3,
            closures: ClosureSchedule::default(),
            hub_loot: [
                "backpack", "backpack", "knife", "sword", "spear", "axe", "bow", "arrows",
                "blowgun", "grenade", "shield", "flask", "camouflage",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}
