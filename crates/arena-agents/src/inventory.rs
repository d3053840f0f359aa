//! Inventory operations: slot-bounded stacks plus two equipment slots.
//!
//! Capacity counts stacks, not units. Ammunition merges into an existing
//! stack and never takes a new slot when one is already held. Removing the
//! last unit of an equipped definition empties its slot.

use arena_types::{EquipSlot, Inventory, ItemDefId, ItemStack};

use crate::catalog::ItemCatalog;
use crate::error::AgentError;

/// Number of occupied slots.
pub fn inventory_count(inventory: &Inventory) -> u32 {
    u32::try_from(inventory.items.len()).unwrap_or(u32::MAX)
}

/// Whether another stack would fit.
pub fn has_free_slot(inventory: &Inventory, capacity: u32) -> bool {
    inventory_count(inventory) < capacity
}

/// Add a stack, merging with an existing stack when the item is stackable.
///
/// Returns the index the units landed in.
pub fn add_to_inventory(
    inventory: &mut Inventory,
    stack: ItemStack,
    capacity: u32,
    catalog: &impl ItemCatalog,
) -> Result<usize, AgentError> {
    let def = catalog
        .item_def(&stack.def_id)
        .ok_or_else(|| AgentError::UnknownItem(stack.def_id.clone()))?;

    if def.stackable
        && let Some(idx) = inventory.position(&stack.def_id)
        && let Some(existing) = inventory.items.get_mut(idx)
    {
        existing.qty = existing.qty.saturating_add(stack.qty);
        return Ok(idx);
    }

    if !has_free_slot(inventory, capacity) {
        return Err(AgentError::InventoryFull { capacity });
    }
    inventory.items.push(stack);
    Ok(inventory.items.len().saturating_sub(1))
}

/// Remove one unit from the stack at `index`, dropping the stack when it
/// runs out. Returns the removed unit.
pub fn remove_inventory_item(
    inventory: &mut Inventory,
    index: usize,
) -> Result<ItemStack, AgentError> {
    let stack = inventory
        .items
        .get_mut(index)
        .ok_or(AgentError::BadIndex(index))?;

    let removed = if stack.qty > 1 {
        stack.qty = stack.qty.saturating_sub(1);
        ItemStack {
            qty: 1,
            ..stack.clone()
        }
    } else {
        inventory.items.remove(index)
    };

    if !inventory.holds(&removed.def_id) {
        unequip_def(inventory, &removed.def_id);
    }
    Ok(removed)
}

/// Consume one unit of the given definition, wherever it sits.
pub fn consume_one(inventory: &mut Inventory, def_id: &ItemDefId) -> Option<ItemStack> {
    let idx = inventory.position(def_id)?;
    remove_inventory_item(inventory, idx).ok()
}

/// Units held of a definition across all stacks.
pub fn units_of(inventory: &Inventory, def_id: &ItemDefId) -> u32 {
    inventory
        .items
        .iter()
        .filter(|s| &s.def_id == def_id)
        .fold(0_u32, |acc, s| acc.saturating_add(s.qty))
}

fn unequip_def(inventory: &mut Inventory, def_id: &ItemDefId) {
    if inventory.equipped.weapon.as_ref() == Some(def_id) {
        inventory.equipped.weapon = None;
    }
    if inventory.equipped.defense.as_ref() == Some(def_id) {
        inventory.equipped.defense = None;
    }
}

/// Equip the item at `index` into its slot, replacing what was there.
pub fn equip(
    inventory: &mut Inventory,
    index: usize,
    catalog: &impl ItemCatalog,
) -> Result<(ItemDefId, EquipSlot), AgentError> {
    let stack = inventory.items.get(index).ok_or(AgentError::BadIndex(index))?;
    let def = catalog
        .item_def(&stack.def_id)
        .ok_or_else(|| AgentError::UnknownItem(stack.def_id.clone()))?;
    let slot = def
        .slot()
        .ok_or_else(|| AgentError::NotEquippable(def.id.clone()))?;
    let id = def.id.clone();
    match slot {
        EquipSlot::Weapon => inventory.equipped.weapon = Some(id.clone()),
        EquipSlot::Defense => inventory.equipped.defense = Some(id.clone()),
    }
    Ok((id, slot))
}

/// Equip the item at `index` only if its slot is empty.
pub fn auto_equip(
    inventory: &mut Inventory,
    index: usize,
    catalog: &impl ItemCatalog,
) -> Option<(ItemDefId, EquipSlot)> {
    let def = inventory
        .items
        .get(index)
        .and_then(|s| catalog.item_def(&s.def_id))?;
    let occupied = match def.slot()? {
        EquipSlot::Weapon => inventory.equipped.weapon.is_some(),
        EquipSlot::Defense => inventory.equipped.defense.is_some(),
    };
    if occupied {
        return None;
    }
    equip(inventory, index, catalog).ok()
}
