//! Job dispatch (§4.D): given the NPC whose `ready_time` is soonest, decide
//! what it does next and advance it past that action, returning its next
//! `ready_time`. This is the one function `CellPlanner::run`'s loop calls
//! per iteration.

use crate::catalog::ObjectType;
use crate::error::PlannerError;
use crate::inventory::{self, HolderKind, InventoryStateEvent};
use crate::model::ids::{NpcId, StockpileId};
use crate::model::object::{NetworkObject, Ownership, Patch, Position, StateEvent};
use crate::model::timeline::build_manhattan_path;
use crate::model::Job;
use crate::recipe;
use crate::rng::DeterministicRng;
use crate::spawner;
use crate::time::{IDLE_SCAN_STEP_MS, WAIT_AFTER_PICKUP_MS, WAIT_AFTER_WALK_MS};

use super::deposit;
use super::movement;
use super::PlannerState;

/// Walks `npc_id` from its current position to `target`, appending the new
/// waypoints to its path and advancing its canonical position to `target`
/// (the planner's own bookkeeping treats an NPC as "arrived" once its walk
/// is scheduled — only the client-side interpolator cares about the
/// in-between points). Returns the arrival time.
fn walk_npc(state: &mut PlannerState, npc_id: &NpcId, target: Position, start_time: i64) -> i64 {
    let npc = state.npcs.get_mut(npc_id).expect("npc exists");
    let points = build_manhattan_path(npc.position, target, start_time);
    let arrival = points.last().map(|p| p.arrival_time).unwrap_or(start_time);
    npc.path.extend(points);
    npc.position = target;
    arrival
}

/// Dispatches whichever job `npc_id` currently holds, returning its next
/// `ready_time`. The NPC must exist in `state.npcs`.
pub fn dispatch_npc(state: &mut PlannerState, npc_id: &NpcId) -> Result<i64, PlannerError> {
    let now = state.now_ms;
    let job = state.npcs.get(npc_id).expect("queue only holds live npcs").job.clone();

    match job {
        Job::Gather => dispatch_gather(state, npc_id, now),
        Job::Craft(products) => dispatch_craft(state, npc_id, now, &products),
        Job::Haul => dispatch_haul(state, npc_id, now),
    }
}

/// Walks `npc_id` home and idles there — the "no actionable state" branch
/// shared by every job when there's nothing useful left to do.
fn go_home(state: &mut PlannerState, npc_id: &NpcId, now: i64) -> i64 {
    let house_id = state.npcs[npc_id].schedule.house.clone();
    let Some(home) = movement::home_position(state, &house_id) else {
        return now + IDLE_SCAN_STEP_MS;
    };
    let arrival = walk_npc(state, npc_id, home, now);
    // Already home (or no distance to cover): idle a tick rather than
    // rescanning at the same instant forever.
    if arrival <= now { now + IDLE_SCAN_STEP_MS } else { arrival }
}

fn dispatch_gather(state: &mut PlannerState, npc_id: &NpcId, now: i64) -> Result<i64, PlannerError> {
    if state.npcs[npc_id].inventory.is_full() {
        return route_to_deposit(state, npc_id, now);
    }

    let npc_position = state.npcs[npc_id].position;
    let Some(node_id) = movement::nearest_harvestable_node(state, npc_position) else {
        return Ok(now + IDLE_SCAN_STEP_MS);
    };

    let node_position = state.resource_nodes[&node_id].position;
    let arrival = walk_npc(state, npc_id, node_position, now);
    let harvest_time = arrival + WAIT_AFTER_WALK_MS;

    let node = state.resource_nodes.get_mut(&node_id).expect("looked up above");
    let spawn_time_ms = node.spawn_time_ms;
    let result = spawner::harvest(node, harvest_time, spawn_time_ms)?;

    node.depleted = true;
    node.state.push(StateEvent {
        time: harvest_time,
        patch: Patch::Depleted(true),
    });
    node.state.push(StateEvent {
        time: node.ready_time,
        patch: Patch::Depleted(false),
    });

    let mut item = NetworkObject::new(result.item_id.clone(), result.product, result.position, harvest_time);
    item.amount = result.amount;
    item.state.push(StateEvent {
        time: harvest_time,
        patch: Patch::Exist(true),
    });
    state.loose_items.insert(item.id.clone(), item);

    let pickup_time = harvest_time + WAIT_AFTER_PICKUP_MS;
    let mut item = state.loose_items.remove(&result.item_id).expect("just inserted");
    item.state.push(StateEvent {
        time: pickup_time,
        patch: Patch::Ownership(Ownership::GrabbedByNpc(npc_id.clone())),
    });
    item.state.push(StateEvent {
        time: pickup_time,
        patch: Patch::IsInInventory(true),
    });

    let npc = state.npcs.get_mut(npc_id).expect("npc exists");
    let txn = inventory::pick_up(&mut npc.inventory, item, &HolderKind::Npc(npc_id.clone()))?;
    npc.inventory_state.push(InventoryStateEvent::from_transaction(pickup_time, &txn));

    Ok(pickup_time)
}

/// Full-inventory branch shared by Gather and (implicitly) Craft: walk to
/// the nearest stockpile with room and unload.
fn route_to_deposit(state: &mut PlannerState, npc_id: &NpcId, now: i64) -> Result<i64, PlannerError> {
    let npc_position = state.npcs[npc_id].position;
    let Some(stockpile_id) = movement::nearest_stockpile_with_capacity(state, npc_position) else {
        return Ok(now + IDLE_SCAN_STEP_MS);
    };
    let target = movement::stockpile_position(state, &stockpile_id).unwrap_or(npc_position);
    let arrival = walk_npc(state, npc_id, target, now);
    deposit::deposit_all(state, npc_id, &stockpile_id, arrival)?;
    Ok(arrival + WAIT_AFTER_WALK_MS)
}

fn dispatch_craft(state: &mut PlannerState, npc_id: &NpcId, now: i64, products: &[ObjectType]) -> Result<i64, PlannerError> {
    if !state.npcs[npc_id].inventory.slots.is_empty() {
        return route_to_deposit(state, npc_id, now);
    }
    if products.is_empty() {
        return Ok(go_home(state, npc_id, now));
    }

    // Choosing which product to attempt is planner policy, not a crafting
    // outcome, so it draws from an ephemeral stream keyed by time rather
    // than the NPC's persisted crafting RNG (§4.B: that stream advances
    // only on a successful craft).
    let mut picker = DeterministicRng::from_seed_str(&format!("{npc_id}-product-pick-{now}"));
    let index = (picker.next_u32() as usize) % products.len();
    let product = products[index];
    let Some(recipe) = recipe::recipe_for(product) else {
        return Ok(go_home(state, npc_id, now));
    };

    let npc_position = state.npcs[npc_id].position;
    let Some(stockpile_id) = movement::nearest_stockpile_with_inputs(state, npc_position, recipe) else {
        return Ok(go_home(state, npc_id, now));
    };

    let target = movement::stockpile_position(state, &stockpile_id).unwrap_or(npc_position);
    let arrival = walk_npc(state, npc_id, target, now);

    let free_capacity = state.npcs[npc_id].inventory.free_capacity();
    let batches = movement::max_recipes_that_fit(free_capacity, recipe).max(1);

    for item in recipe.items {
        withdraw_multistack(state, npc_id, &stockpile_id, item.item, item.quantity * batches, arrival)?;
    }

    let house_id = state.npcs[npc_id].schedule.house.clone();
    let home = movement::home_position(state, &house_id).unwrap_or(target);
    let home_arrival = walk_npc(state, npc_id, home, arrival);

    let mut crafted = 0;
    for _ in 0..batches {
        let npc = state.npcs.get_mut(npc_id).expect("npc exists");
        let mut rng = DeterministicRng::from_state(npc.crafting_rng.clone());
        match inventory::craft(&mut npc.inventory, recipe, &HolderKind::Npc(npc_id.clone()), &mut rng) {
            Ok(txn) => {
                npc.crafting_rng = rng.save_state();
                npc.inventory_state.push(InventoryStateEvent::from_transaction(home_arrival, &txn));
                crafted += 1;
            }
            Err(_) => break,
        }
    }

    Ok(if crafted > 0 {
        home_arrival
    } else {
        home_arrival + IDLE_SCAN_STEP_MS
    })
}

/// Withdraws whole slots of `item_type` from `stockpile_id` into `npc_id`'s
/// inventory until at least `quantity` total has been withdrawn or the
/// stockpile runs out (§4.D "multi-stack-aware": withdraws `stackLimit`
/// worth per sub-operation rather than an exact partial amount).
fn withdraw_multistack(state: &mut PlannerState, npc_id: &NpcId, stockpile_id: &StockpileId, item_type: ObjectType, quantity: u32, at: i64) -> Result<(), PlannerError> {
    let mut withdrawn = 0u32;
    loop {
        if withdrawn >= quantity {
            break;
        }
        let Some(stockpile) = state.stockpiles.get_mut(stockpile_id) else { break };
        let Some(slot_id) = stockpile.inventory.slots.iter().find(|s| s.object_type == item_type).map(|s| s.id.clone()) else {
            break;
        };
        let (withdraw_txn, mut item) = inventory::withdraw_from_stockpile(&mut stockpile.inventory, &slot_id)?;
        stockpile.inventory_state.push(InventoryStateEvent {
            time: at,
            remove: withdraw_txn.removed_ids.clone(),
            ..Default::default()
        });
        withdrawn += item.amount;

        item.state.push(StateEvent {
            time: at,
            patch: Patch::Ownership(Ownership::GrabbedByNpc(npc_id.clone())),
        });
        item.state.push(StateEvent {
            time: at,
            patch: Patch::IsInInventory(true),
        });

        let npc = state.npcs.get_mut(npc_id).expect("npc exists");
        let pickup_txn = inventory::pick_up(&mut npc.inventory, item, &HolderKind::Npc(npc_id.clone()))?;
        npc.inventory_state.push(InventoryStateEvent::from_transaction(at, &pickup_txn));
    }
    Ok(())
}

/// Haul is declared but deliberately left open by §4.D ("walk to source
/// stockpile, transfer between stockpiles. Not further specified in this
/// core"). Until a concrete source/destination policy is specified, a
/// hauling NPC idles at home rather than guessing at mechanics the spec
/// never describes.
fn dispatch_haul(state: &mut PlannerState, npc_id: &NpcId, now: i64) -> Result<i64, PlannerError> {
    Ok(go_home(state, npc_id, now))
}
