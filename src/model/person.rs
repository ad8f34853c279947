//! Player-controlled person records (§3). A `Person` is the client-side
//! counterpart of an [`super::npc::Npc`]: no path or job, just identity,
//! position, and an inventory — the planner never schedules a person, it
//! only reacts to the requests a person issues (§6).

use serde::{Deserialize, Serialize};

use crate::inventory::{HolderKind, Inventory, InventoryHolder};

use super::ids::PersonId;
use super::object::Position;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub position: Position,
    pub inventory: Inventory,
}

impl Person {
    pub fn new(id: PersonId, position: Position, inventory: Inventory) -> Self {
        Self { id, position, inventory }
    }

    pub fn holder_kind(&self) -> HolderKind {
        HolderKind::Person(self.id.clone())
    }
}

impl InventoryHolder for Person {
    fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    fn is_npc(&self) -> bool {
        false
    }

    fn holder_id(&self) -> &str {
        self.id.as_str()
    }
}
