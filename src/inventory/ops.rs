//! Stack-aware inventory operations (§4.B). Every op either returns a
//! transaction and leaves `inventory` updated, or returns an error and
//! leaves `inventory` untouched — there is no partial-failure state.

use crate::catalog::ObjectType;
use crate::error::InventoryError;
use crate::model::ids::{ObjectId, StockpileId};
use crate::model::object::{Ownership, Position};
use crate::model::object::NetworkObject;
use crate::recipe::{Recipe, RecipeItem};
use crate::rng::DeterministicRng;

use super::{HolderKind, Inventory, InventoryTransaction};

fn ownership_for(holder: &HolderKind) -> Ownership {
    match holder {
        HolderKind::Person(id) => Ownership::GrabbedByPerson(id.clone()),
        HolderKind::Npc(id) => Ownership::GrabbedByNpc(id.clone()),
    }
}

/// Merges `item` into `inventory`. Scans slots in order for the first one
/// whose type matches and whose amount plus `item.amount` still fits under
/// the type's stack limit; only that whole-item merge is attempted, there is
/// no splitting across two slots. Otherwise opens a new slot for the item as
/// a whole, or fails if the inventory has no room left.
/// Shared by [`pick_up`], [`craft`] and [`deposit_into_stockpile`] — they
/// differ only in where the incoming item comes from and whether it counts
/// as carried (`is_in_inventory`) once merged.
fn merge_into(inventory: &mut Inventory, mut item: NetworkObject, ownership: Ownership, is_in_inventory: bool) -> Result<InventoryTransaction, InventoryError> {
    item.ownership = ownership;
    item.is_in_inventory = is_in_inventory;
    item.exist = true;

    let stack_limit = item.object_type.stack_limit();
    if stack_limit > 1 {
        if let Some(slot) = inventory
            .slots
            .iter_mut()
            .find(|s| s.object_type == item.object_type && s.amount + item.amount <= stack_limit)
        {
            slot.amount += item.amount;
            let updated = slot.clone();
            return Ok(InventoryTransaction {
                upserted: vec![updated],
                removed_ids: vec![item.id],
            });
        }
    }

    if inventory.is_full() {
        return Err(InventoryError::InventoryFull);
    }
    inventory.slots.push(item.clone());
    Ok(InventoryTransaction {
        upserted: vec![item],
        removed_ids: vec![],
    })
}

/// Picks `item` up into `inventory` on behalf of `holder`. A no-op if the
/// item's id is already held here (dedup-by-id, §4.B).
pub fn pick_up(inventory: &mut Inventory, item: NetworkObject, holder: &HolderKind) -> Result<InventoryTransaction, InventoryError> {
    if inventory.slot_index_of(&item.id).is_some() {
        return Ok(InventoryTransaction::empty());
    }
    merge_into(inventory, item, ownership_for(holder), true)
}

/// Drops `item_id` out of `inventory` entirely. Never fails: dropping an id
/// that isn't held is a no-op transaction.
pub fn drop(inventory: &mut Inventory, item_id: &ObjectId) -> (InventoryTransaction, Option<NetworkObject>) {
    let Some(idx) = inventory.slot_index_of(item_id) else {
        return (InventoryTransaction::empty(), None);
    };
    let mut dropped = inventory.slots.remove(idx);
    dropped.ownership = Ownership::None;
    dropped.is_in_inventory = false;
    let txn = InventoryTransaction {
        upserted: vec![],
        removed_ids: vec![item_id.clone()],
    };
    (txn, Some(dropped))
}

/// Removes `quantity` units of `recipe_item.item` from `inventory`, across
/// as many slots as needed. Atomic: if the total held is short, nothing is
/// removed and [`InventoryError::InsufficientMaterials`] is returned.
pub fn remove_by_recipe_item(inventory: &mut Inventory, recipe_item: &RecipeItem) -> Result<InventoryTransaction, InventoryError> {
    if inventory.total_of(recipe_item.item) < recipe_item.quantity {
        return Err(InventoryError::InsufficientMaterials);
    }

    let mut remaining = recipe_item.quantity;
    let mut txn = InventoryTransaction::empty();
    let mut i = 0;
    while remaining > 0 && i < inventory.slots.len() {
        if inventory.slots[i].object_type != recipe_item.item {
            i += 1;
            continue;
        }
        let slot = &mut inventory.slots[i];
        if slot.amount <= remaining {
            remaining -= slot.amount;
            txn.removed_ids.push(slot.id.clone());
            inventory.slots.remove(i);
        } else {
            slot.amount -= remaining;
            remaining = 0;
            txn.upserted.push(slot.clone());
            i += 1;
        }
    }
    Ok(txn)
}

/// Consumes a recipe's inputs from `inventory` and inserts the crafted
/// product, all as one atomic step: if any input is short, nothing is
/// removed and nothing is crafted (§4.B "atomic crafting").
pub fn craft(
    inventory: &mut Inventory,
    recipe: &Recipe,
    holder: &HolderKind,
    crafting_rng: &mut DeterministicRng,
) -> Result<InventoryTransaction, InventoryError> {
    for item in recipe.items {
        if inventory.total_of(item.item) < item.quantity {
            return Err(InventoryError::InsufficientMaterials);
        }
    }

    let mut txn = InventoryTransaction::empty();
    for item in recipe.items {
        txn = txn.merge(remove_by_recipe_item(inventory, item)?);
    }

    let product_id = ObjectId::from(format!("object-{}", crafting_rng.next_u32()));
    let mut product = NetworkObject::new(product_id, recipe.product, Position::new(0, 0), 0);
    product.amount = recipe.amount;

    let merged = merge_into(inventory, product, ownership_for(holder), true)?;
    Ok(txn.merge(merged))
}

/// Removes a whole slot from a stockpile's inventory and hands the item
/// back with its ownership cleared, ready to be picked up elsewhere.
/// Stockpile slots are never partially withdrawn (§4.D "multi-stack-aware":
/// a recipe needing more than one slot's worth withdraws one whole slot per
/// sub-operation).
pub fn withdraw_from_stockpile(inventory: &mut Inventory, slot_id: &ObjectId) -> Result<(InventoryTransaction, NetworkObject), InventoryError> {
    let Some(idx) = inventory.slot_index_of(slot_id) else {
        return Err(InventoryError::InsufficientMaterials);
    };
    let mut item = inventory.slots.remove(idx);
    item.ownership = Ownership::None;
    item.is_in_inventory = false;
    let txn = InventoryTransaction {
        upserted: vec![],
        removed_ids: vec![slot_id.clone()],
    };
    Ok((txn, item))
}

/// Stores `item` into a stockpile's inventory, stacking onto an existing
/// slot first. Distinct from [`pick_up`]: stockpiled items are not "in
/// inventory" in the carried sense, so `is_in_inventory` stays false.
pub fn deposit_into_stockpile(inventory: &mut Inventory, item: NetworkObject, stockpile_id: &StockpileId) -> Result<InventoryTransaction, InventoryError> {
    let ownership = Ownership::InsideStockpile(stockpile_id.clone());
    merge_into(inventory, item, ownership, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::{NpcId, PersonId};

    fn stick(id: &str, amount: u32) -> NetworkObject {
        let mut o = NetworkObject::new(ObjectId::from(id), ObjectType::Stick, Position::new(0, 0), 0);
        o.amount = amount;
        o.exist = true;
        o
    }

    #[test]
    fn pickup_stacks_onto_an_existing_slot_when_it_fits_under_the_stack_limit() {
        let mut inv = Inventory::new(1, 10);
        let holder = HolderKind::Person(PersonId::from("p1"));
        pick_up(&mut inv, stick("s1", 6), &holder).unwrap();
        pick_up(&mut inv, stick("s2", 4), &holder).unwrap();

        assert_eq!(inv.slots.len(), 1);
        assert_eq!(inv.total_of(ObjectType::Stick), 10);
        assert_eq!(inv.slots[0].amount, 10);
    }

    #[test]
    fn pickup_that_would_overflow_the_stack_limit_opens_a_new_slot_instead_of_splitting() {
        let mut inv = Inventory::new(1, 10);
        let holder = HolderKind::Person(PersonId::from("p1"));
        pick_up(&mut inv, stick("s1", 6), &holder).unwrap();
        pick_up(&mut inv, stick("s2", 6), &holder).unwrap();

        assert_eq!(inv.slots.len(), 2);
        assert_eq!(inv.total_of(ObjectType::Stick), 12);
        assert_eq!(inv.slots[0].amount, 6);
        assert_eq!(inv.slots[1].amount, 6);
    }

    #[test]
    fn pickup_of_an_already_held_id_is_a_no_op() {
        let mut inv = Inventory::new(1, 10);
        let holder = HolderKind::Npc(NpcId::from("n1"));
        pick_up(&mut inv, stick("s1", 1), &holder).unwrap();
        let txn = pick_up(&mut inv, stick("s1", 1), &holder).unwrap();
        assert!(txn.is_empty());
        assert_eq!(inv.slots.len(), 1);
    }

    #[test]
    fn pickup_into_a_full_inventory_of_distinct_types_fails() {
        let mut inv = Inventory::new(1, 1);
        let holder = HolderKind::Npc(NpcId::from("n1"));
        let mut rock = NetworkObject::new(ObjectId::from("r1"), ObjectType::Rock, Position::new(0, 0), 0);
        rock.amount = 1;
        pick_up(&mut inv, rock, &holder).unwrap();

        let err = pick_up(&mut inv, stick("s1", 1), &holder).unwrap_err();
        assert_eq!(err, InventoryError::InventoryFull);
    }

    #[test]
    fn craft_consumes_inputs_and_produces_the_product_atomically() {
        let mut inv = Inventory::new(1, 10);
        let holder = HolderKind::Npc(NpcId::from("n1"));
        pick_up(&mut inv, stick("s1", 10), &holder).unwrap();

        let recipe = crate::recipe::recipe_for(ObjectType::WattleWall).unwrap();
        let mut rng = DeterministicRng::from_seed_str("craft-test");
        craft(&mut inv, recipe, &holder, &mut rng).unwrap();

        assert_eq!(inv.total_of(ObjectType::Stick), 0);
        assert_eq!(inv.total_of(ObjectType::WattleWall), 1);
    }

    #[test]
    fn craft_with_insufficient_materials_mutates_nothing() {
        let mut inv = Inventory::new(1, 10);
        let holder = HolderKind::Npc(NpcId::from("n1"));
        pick_up(&mut inv, stick("s1", 9), &holder).unwrap();

        let recipe = crate::recipe::recipe_for(ObjectType::WattleWall).unwrap();
        let mut rng = DeterministicRng::from_seed_str("craft-fail");
        let err = craft(&mut inv, recipe, &holder, &mut rng).unwrap_err();

        assert_eq!(err, InventoryError::InsufficientMaterials);
        assert_eq!(inv.total_of(ObjectType::Stick), 9);
    }

    #[test]
    fn withdraw_then_deposit_round_trips_a_stockpile_slot() {
        let mut stockpile_inv = Inventory::new(1, 10);
        let stockpile_id = StockpileId::from("st1");
        deposit_into_stockpile(&mut stockpile_inv, stick("s1", 10), &stockpile_id).unwrap();
        assert!(!stockpile_inv.slots[0].is_in_inventory);

        let (_, withdrawn) = withdraw_from_stockpile(&mut stockpile_inv, &ObjectId::from("s1")).unwrap();
        assert!(stockpile_inv.slots.is_empty());
        assert_eq!(withdrawn.ownership, Ownership::None);
    }

    #[test]
    fn withdraw_of_an_absent_slot_fails_without_mutation() {
        let mut inv = Inventory::new(1, 10);
        let err = withdraw_from_stockpile(&mut inv, &ObjectId::from("missing")).unwrap_err();
        assert_eq!(err, InventoryError::InsufficientMaterials);
    }
}
