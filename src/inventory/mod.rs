//! The Inventory Engine (§4.B) — a fixed-capacity, slotted inventory and
//! the stack-aware operations over it. Pure: every operation takes a
//! holder snapshot and returns a transaction describing the minimal delta,
//! never logging and never mutating on failure.

mod ops;
mod transaction;

pub use ops::{craft, deposit_into_stockpile, drop, pick_up, remove_by_recipe_item, withdraw_from_stockpile};
pub use transaction::InventoryTransaction;

use serde::{Deserialize, Serialize};

use crate::model::ids::{NpcId, PersonId};
use crate::model::object::NetworkObject;

/// `{rows, columns, slots}`. Capacity = `rows * columns`. Slots are an
/// unordered set keyed by id, but scanned in stored (insertion) order —
/// the order pickup/craft/withdraw all depend on for "first matching slot".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub rows: u32,
    pub columns: u32,
    pub slots: Vec<NetworkObject>,
}

impl Inventory {
    pub fn new(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            slots: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        (self.rows * self.columns) as usize
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity()
    }

    pub fn free_capacity(&self) -> usize {
        self.capacity().saturating_sub(self.slots.len())
    }

    pub fn slot_index_of(&self, id: &crate::model::ids::ObjectId) -> Option<usize> {
        self.slots.iter().position(|s| &s.id == id)
    }

    pub fn total_of(&self, object_type: crate::catalog::ObjectType) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.object_type == object_type)
            .map(|s| s.amount)
            .sum()
    }
}

/// Which kind of holder an inventory operation is acting on — determines
/// which single ownership reference a pickup/deposit sets (§4.B: "the
/// engine must know whether the holder is a person or an NPC and set
/// exactly one of `grabbedByPersonId` / `grabbedByNpcId`").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolderKind {
    Person(PersonId),
    Npc(NpcId),
}

/// Shared behavior of anything that owns an [`Inventory`] (§9 design note:
/// "the repo's structural polymorphism between Person and NPC should
/// become two distinct record types sharing a trait").
pub trait InventoryHolder {
    fn inventory(&self) -> &Inventory;
    fn inventory_mut(&mut self) -> &mut Inventory;
    fn is_npc(&self) -> bool;
    fn holder_id(&self) -> &str;
}

/// One entry of a holder's inventory-state timeline (§3): the delta a
/// single inventory operation produced, timestamped for client replay.
/// `rows`/`columns` are only set when the operation also resized the
/// holder (a stockpile gaining or losing a tile).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryStateEvent {
    pub time: i64,
    pub add: Vec<NetworkObject>,
    pub modified: Vec<NetworkObject>,
    pub remove: Vec<crate::model::ids::ObjectId>,
    pub rows: Option<u32>,
    pub columns: Option<u32>,
}

/// Ordered, append-only list of inventory deltas for one holder.
pub type InventoryStateTimeline = Vec<InventoryStateEvent>;

impl InventoryStateEvent {
    /// Builds an inventory-state event straight from a transaction: every
    /// upserted slot that existed before the op counts as `modified`, every
    /// slot that's new to the holder counts as `add`. Since transactions
    /// don't track "existed before", callers that care about the
    /// distinction pass `new_ids` explicitly; everything else lands in `add`.
    pub fn from_transaction(time: i64, txn: &InventoryTransaction) -> Self {
        Self {
            time,
            add: txn.upserted.clone(),
            modified: Vec::new(),
            remove: txn.removed_ids.clone(),
            rows: None,
            columns: None,
        }
    }
}
