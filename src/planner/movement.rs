//! Target selection for a walking NPC (§4.D). Picking *where* to walk is
//! planner policy; the walk itself is the pure geometry in
//! [`crate::model::timeline`].

use crate::model::ids::{HouseId, ResourceNodeId, StockpileId};
use crate::model::object::{Position, TILE_SIZE};
use crate::recipe::Recipe;

use super::PlannerState;

/// The nearest resource node that is harvestable right now, if any. Ties
/// break by id — `HashMap` iteration order is randomized per instance, so
/// breaking ties only by distance would let two planner runs from the same
/// snapshot pick different equidistant nodes (§5: determinism must not
/// depend on unordered-container iteration order).
pub fn nearest_harvestable_node(state: &PlannerState, from: Position) -> Option<ResourceNodeId> {
    state
        .resource_nodes
        .values()
        .filter(|node| node.is_harvestable_at(state.now_ms))
        .min_by_key(|node| (from.manhattan_distance(&node.position), node.id.clone()))
        .map(|node| node.id.clone())
}

/// A stockpile's walk-to position: its first tile, converted from tile-grid
/// to pixel coordinates.
pub fn stockpile_position(state: &PlannerState, id: &StockpileId) -> Option<Position> {
    state.stockpiles.get(id).and_then(|sp| sp.tiles.first()).map(|t| Position::new(t.x * TILE_SIZE, t.y * TILE_SIZE))
}

/// The nearest stockpile with at least one free inventory slot. Ties break
/// by id for the same reason as [`nearest_harvestable_node`].
pub fn nearest_stockpile_with_capacity(state: &PlannerState, from: Position) -> Option<StockpileId> {
    state
        .stockpiles
        .values()
        .filter(|sp| sp.inventory.free_capacity() > 0)
        .min_by_key(|sp| (from.manhattan_distance(&stockpile_position(state, &sp.id).unwrap_or(from)), sp.id.clone()))
        .map(|sp| sp.id.clone())
}

/// The nearest stockpile holding enough of every recipe input for at least
/// one batch. Ties break by id for the same reason as
/// [`nearest_harvestable_node`].
pub fn nearest_stockpile_with_inputs(state: &PlannerState, from: Position, recipe: &Recipe) -> Option<StockpileId> {
    state
        .stockpiles
        .values()
        .filter(|sp| recipe.items.iter().all(|i| sp.inventory.total_of(i.item) >= i.quantity))
        .min_by_key(|sp| (from.manhattan_distance(&stockpile_position(state, &sp.id).unwrap_or(from)), sp.id.clone()))
        .map(|sp| sp.id.clone())
}

/// The house assigned to `npc_id` as home, via its schedule, if it still exists.
pub fn home_position(state: &PlannerState, house_id: &HouseId) -> Option<Position> {
    state.houses.get(house_id).map(|h| h.origin)
}

/// How many whole recipe batches fit in the free inventory capacity,
/// accounting for how many slots each batch needs on both sides: every
/// input's `ceil(quantity / stackLimit(input))` plus the output's
/// `ceil(amount / stackLimit(product))` (§4.D: "ceiling-division over
/// stack limits of inputs and output").
pub fn max_recipes_that_fit(free_capacity: usize, recipe: &Recipe) -> u32 {
    let input_slots_per_batch: u32 = recipe.items.iter().map(|item| item.quantity.div_ceil(item.item.stack_limit().max(1))).sum();
    let output_slots_per_batch = recipe.amount.div_ceil(recipe.product.stack_limit().max(1)).max(1);
    let slots_per_batch = (input_slots_per_batch + output_slots_per_batch).max(1);
    (free_capacity as u32) / slots_per_batch
}
