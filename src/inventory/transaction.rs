//! The result of an inventory operation: the minimal set of slot changes,
//! never the whole inventory. Keeping this separate from [`super::Inventory`]
//! is what makes every op a pure function instead of one that mutates and
//! also has to explain what it mutated after the fact.

use serde::{Deserialize, Serialize};

use crate::model::ids::ObjectId;
use crate::model::object::NetworkObject;

/// Slots to upsert and ids to drop, applied to an [`super::Inventory`] as a
/// single unit. An empty transaction means the operation was a no-op (for
/// example, picking up an id already held).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub upserted: Vec<NetworkObject>,
    pub removed_ids: Vec<ObjectId>,
}

impl InventoryTransaction {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.upserted.is_empty() && self.removed_ids.is_empty()
    }

    pub fn merge(mut self, other: InventoryTransaction) -> Self {
        self.upserted.extend(other.upserted);
        self.removed_ids.extend(other.removed_ids);
        self
    }
}
