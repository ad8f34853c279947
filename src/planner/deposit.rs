//! The deposit sub-routine (§4.D): walking a carried inventory into a
//! stockpile one slot at a time, used by the full-inventory branch of
//! Gather, by Craft's "unload before crafting" step, and by the Haul job.

use crate::error::PlannerError;
use crate::inventory::{self, InventoryStateEvent};
use crate::model::ids::{NpcId, StockpileId};
use crate::model::object::{Ownership, Patch, StateEvent};

use super::PlannerState;

/// Drops and deposits one slot of `npc_id`'s inventory into `stockpile_id`,
/// emitting the matched object events (`grabbedByNpcId -> null,
/// isInInventory -> false` on drop; `insideStockpile -> stockpileId,
/// isInInventory -> true` on deposit) and both holders' inventory-state
/// deltas, all timestamped at `at`. A no-op if the NPC is carrying nothing
/// or the stockpile has no room left.
fn deposit_one_slot(state: &mut PlannerState, npc_id: &NpcId, stockpile_id: &StockpileId, at: i64) -> Result<bool, PlannerError> {
    let Some(npc) = state.npcs.get_mut(npc_id) else {
        return Ok(false);
    };
    if state.stockpiles.get(stockpile_id).map(|sp| sp.inventory.is_full()).unwrap_or(true) {
        return Ok(false);
    }
    let Some(first) = npc.inventory.slots.first().cloned() else {
        return Ok(false);
    };

    let (drop_txn, dropped) = inventory::drop(&mut npc.inventory, &first.id);
    let Some(mut item) = dropped else { return Ok(false) };
    npc.inventory_state.push(InventoryStateEvent {
        time: at,
        remove: drop_txn.removed_ids.clone(),
        ..Default::default()
    });
    item.state.push(StateEvent {
        time: at,
        patch: Patch::Ownership(Ownership::None),
    });
    item.state.push(StateEvent {
        time: at,
        patch: Patch::IsInInventory(false),
    });

    let stockpile = state.stockpiles.get_mut(stockpile_id).expect("checked not full above");
    item.state.push(StateEvent {
        time: at,
        patch: Patch::Ownership(Ownership::InsideStockpile(stockpile_id.clone())),
    });
    let deposit_txn = inventory::deposit_into_stockpile(&mut stockpile.inventory, item, stockpile_id)?;
    stockpile.inventory_state.push(InventoryStateEvent {
        time: at,
        add: deposit_txn.upserted.clone(),
        ..Default::default()
    });
    Ok(true)
}

/// Unloads as much of `npc_id`'s inventory into `stockpile_id` as fits,
/// stopping once the NPC is empty or the stockpile is full.
pub fn deposit_all(state: &mut PlannerState, npc_id: &NpcId, stockpile_id: &StockpileId, at: i64) -> Result<(), PlannerError> {
    while deposit_one_slot(state, npc_id, stockpile_id, at)? {}
    Ok(())
}
