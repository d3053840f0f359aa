//! Item definitions and the lookup interface the engine calls into.
//!
//! The engine never hard-codes weapon stats. It asks an [`ItemCatalog`] for
//! definitions and damage, and asks a few predicates about shields and
//! poison. [`StandardCatalog`] is the stock item set; tests and other
//! front-ends can supply their own.

use std::collections::BTreeMap;

use arena_types::{Actor, Attribute, EquipSlot, ItemDefId, ItemType};

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// Combat profile of a weapon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponStats {
    /// Lowest base damage.
    pub min_dmg: u32,
    /// Highest base damage.
    pub max_dmg: u32,
    /// Attribute whose value is added to the damage.
    pub bonus_attr: Option<Attribute>,
    /// Attribute the wielder needs, and how much of it.
    pub requires: Option<(Attribute, u8)>,
    /// Ammunition consumed per strike.
    pub ammo: Option<ItemDefId>,
    /// Strikes before the weapon is spent.
    pub uses: Option<u32>,
    /// Goes through a raised shield.
    pub pierces_shield: bool,
    /// Splits a raised shield instead of hitting.
    pub breaks_shield: bool,
    /// Poisons on a damaging hit.
    pub poisons: bool,
    /// Damage the wielder takes per strike.
    pub self_damage: u32,
}

impl WeaponStats {
    const fn melee(min_dmg: u32, max_dmg: u32) -> Self {
        Self {
            min_dmg,
            max_dmg,
            bonus_attr: None,
            requires: None,
            ammo: None,
            uses: None,
            pierces_shield: false,
            breaks_shield: false,
            poisons: false,
            self_damage: 0,
        }
    }
}

/// What using a consumable does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumableEffect {
    /// Hides the user until the day ends.
    Camouflage,
    /// Medicine or poison, decided at pickup.
    Flask,
}

/// One entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDefinition {
    /// Identifier.
    pub id: ItemDefId,
    /// Display name.
    pub name: String,
    /// Category.
    pub item_type: ItemType,
    /// Whether units merge into one stack.
    pub stackable: bool,
    /// Weapon profile, for weapons.
    pub weapon: Option<WeaponStats>,
    /// Effect, for consumables.
    pub consumable: Option<ConsumableEffect>,
}

impl ItemDefinition {
    /// Equipment slot this item fills, if any.
    pub const fn slot(&self) -> Option<EquipSlot> {
        match self.item_type {
            ItemType::Weapon => Some(EquipSlot::Weapon),
            ItemType::Defense => Some(EquipSlot::Defense),
            ItemType::Consumable | ItemType::Container | ItemType::Ammo => None,
        }
    }
}

/// Why a weapon could not be used for a strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponFailure {
    /// The definition is not a weapon.
    NotAWeapon,
    /// The wielder lacks the required attribute.
    RequirementNotMet,
    /// The weapon needs ammunition the wielder does not carry.
    NoAmmo,
}

// ---------------------------------------------------------------------------
// Catalog interface
// ---------------------------------------------------------------------------

/// Lookup and damage interface into an item set.
pub trait ItemCatalog {
    /// Look up a definition.
    fn item_def(&self, id: &ItemDefId) -> Option<&ItemDefinition>;

    /// Damage for one strike with `def`.
    ///
    /// `ammo` is how many units of the weapon's ammunition the attacker
    /// carries, and `roll` a unit draw that picks within the damage range.
    ///
    /// # Errors
    ///
    /// Returns the [`WeaponFailure`] that prevents the strike. Callers fall
    /// back to unarmed damage.
    fn compute_weapon_damage(
        &self,
        def: &ItemDefinition,
        ammo: u32,
        attacker: &Actor,
        roll: f64,
    ) -> Result<u32, WeaponFailure>;

    /// Whether a raised shield stops this weapon (`None` is unarmed).
    fn is_blocked_by_shield(&self, weapon: Option<&ItemDefinition>) -> bool {
        weapon
            .and_then(|d| d.weapon.as_ref())
            .is_none_or(|w| !w.pierces_shield && !w.breaks_shield)
    }

    /// Whether this weapon splits a raised shield.
    fn is_axe_shield_break(&self, weapon: Option<&ItemDefinition>) -> bool {
        weapon
            .and_then(|d| d.weapon.as_ref())
            .is_some_and(|w| w.breaks_shield)
    }

    /// Whether this weapon poisons on hit.
    fn is_poison_weapon(&self, weapon: Option<&ItemDefinition>) -> bool {
        weapon
            .and_then(|d| d.weapon.as_ref())
            .is_some_and(|w| w.poisons)
    }

    /// Whether a defense item counts as a shield.
    fn is_shield(&self, id: &ItemDefId) -> bool {
        self.item_def(id)
            .is_some_and(|d| d.item_type == ItemType::Defense)
    }

    /// Items a backpack can contain.
    fn backpack_pool(&self) -> &[ItemDefId];
}

// ---------------------------------------------------------------------------
// Standard item set
// ---------------------------------------------------------------------------

/// The stock item set.
#[derive(Debug, Clone)]
pub struct StandardCatalog {
    defs: BTreeMap<ItemDefId, ItemDefinition>,
    backpack_pool: Vec<ItemDefId>,
}

fn item(
    id: &str,
    name: &str,
    item_type: ItemType,
    weapon: Option<WeaponStats>,
    consumable: Option<ConsumableEffect>,
) -> ItemDefinition {
    ItemDefinition {
        id: ItemDefId::new(id),
        name: name.to_owned(),
        item_type,
        stackable: item_type == ItemType::Ammo,
        weapon,
        consumable,
    }
}

impl StandardCatalog {
    /// Build the stock item set.
    #[allow(clippy::too_many_lines)]
    pub fn new() -> Self {
        let knife = WeaponStats {
            bonus_attr: Some(Attribute::Dexterity),
            ..WeaponStats::melee(6, 9)
        };
        let sword = WeaponStats {
            bonus_attr: Some(Attribute::Strength),
            requires: Some((Attribute::Strength, 2)),
            ..WeaponStats::melee(9, 13)
        };
        let spear = WeaponStats {
            requires: Some((Attribute::Dexterity, 2)),
            pierces_shield: true,
            ..WeaponStats::melee(8, 12)
        };
        let axe = WeaponStats {
            bonus_attr: Some(Attribute::Strength),
            requires: Some((Attribute::Strength, 3)),
            breaks_shield: true,
            ..WeaponStats::melee(10, 14)
        };
        let bow = WeaponStats {
            bonus_attr: Some(Attribute::Perception),
            requires: Some((Attribute::Perception, 2)),
            ammo: Some(ItemDefId::new("arrows")),
            ..WeaponStats::melee(7, 11)
        };
        let blowgun = WeaponStats {
            uses: Some(3),
            poisons: true,
            ..WeaponStats::melee(3, 5)
        };
        let grenade = WeaponStats {
            uses: Some(1),
            pierces_shield: true,
            self_damage: 10,
            ..WeaponStats::melee(20, 30)
        };
        let trident = WeaponStats {
            requires: Some((Attribute::Strength, 3)),
            pierces_shield: true,
            ..WeaponStats::melee(11, 15)
        };

        let list = vec![
            item("knife", "Knife", ItemType::Weapon, Some(knife), None),
            item("sword", "Sword", ItemType::Weapon, Some(sword), None),
            item("spear", "Spear", ItemType::Weapon, Some(spear), None),
            item("axe", "Axe", ItemType::Weapon, Some(axe), None),
            item("bow", "Bow", ItemType::Weapon, Some(bow), None),
            item("blowgun", "Blowgun", ItemType::Weapon, Some(blowgun), None),
            item("grenade", "Grenade", ItemType::Weapon, Some(grenade), None),
            item("trident", "Trident", ItemType::Weapon, Some(trident), None),
            item("shield", "Shield", ItemType::Defense, None, None),
            item("arrows", "Arrows", ItemType::Ammo, None, None),
            item(
                "camouflage",
                "Camouflage paint",
                ItemType::Consumable,
                None,
                Some(ConsumableEffect::Camouflage),
            ),
            item(
                "flask",
                "Unmarked flask",
                ItemType::Consumable,
                None,
                Some(ConsumableEffect::Flask),
            ),
            item("backpack", "Backpack", ItemType::Container, None, None),
        ];

        let backpack_pool = ["knife", "spear", "arrows", "flask", "camouflage", "shield", "blowgun"]
            .into_iter()
            .map(ItemDefId::new)
            .collect();

        Self {
            defs: list.into_iter().map(|d| (d.id.clone(), d)).collect(),
            backpack_pool,
        }
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for StandardCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemCatalog for StandardCatalog {
    fn item_def(&self, id: &ItemDefId) -> Option<&ItemDefinition> {
        self.defs.get(id)
    }

    fn compute_weapon_damage(
        &self,
        def: &ItemDefinition,
        ammo: u32,
        attacker: &Actor,
        roll: f64,
    ) -> Result<u32, WeaponFailure> {
        let stats = def.weapon.as_ref().ok_or(WeaponFailure::NotAWeapon)?;
        if let Some((attr, min)) = stats.requires
            && attacker.attrs.get(attr) < min
        {
            return Err(WeaponFailure::RequirementNotMet);
        }
        if stats.ammo.is_some() && ammo == 0 {
            return Err(WeaponFailure::NoAmmo);
        }
        let base = arena_world::scale_inclusive(roll, stats.min_dmg, stats.max_dmg);
        let bonus = stats
            .bonus_attr
            .map_or(0, |a| u32::from(attacker.attrs.get(a)));
        Ok(base.saturating_add(bonus))
    }

    fn backpack_pool(&self) -> &[ItemDefId] {
        &self.backpack_pool
    }
}
