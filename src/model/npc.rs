//! NPC records (§3, §4.D). An NPC is the thing the Cell Planner schedules:
//! it walks, works a job, and carries its own inventory and crafting RNG
//! stream so two planner runs from the same snapshot always pick the same
//! crafted item ids.

use serde::{Deserialize, Serialize};

use crate::catalog::ObjectType;
use crate::inventory::{HolderKind, Inventory, InventoryHolder, InventoryStateTimeline};
use crate::rng::RngState;

use super::ids::{HouseId, NpcId};
use super::object::Position;

/// What an NPC is currently assigned to do (§4.D dispatch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Job {
    /// Walk to a resource node and harvest from it.
    Gather,
    /// Walk to a workbench (or craft in place) and produce one of `products`,
    /// chosen at random each time the NPC picks a new crafting action (§4.D).
    Craft(Vec<ObjectType>),
    /// Walk a withdrawn item from a stockpile to another stockpile or house.
    Haul,
}

/// An NPC's day/night work schedule, anchored to its home [`HouseId`].
/// Both bounds are [`crate::time::day_time_ms`] values; the NPC is asleep
/// for any wall-clock time whose day-time falls in `[sleep_start, sleep_end)`
/// (wrapping past midnight if `sleep_end < sleep_start`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub house: HouseId,
    pub sleep_start_ms: i64,
    pub sleep_end_ms: i64,
}

impl Schedule {
    pub fn is_asleep_at(&self, wall_clock_ms: i64) -> bool {
        let day_time = crate::time::day_time_ms(wall_clock_ms);
        if self.sleep_start_ms <= self.sleep_end_ms {
            day_time >= self.sleep_start_ms && day_time < self.sleep_end_ms
        } else {
            day_time >= self.sleep_start_ms || day_time < self.sleep_end_ms
        }
    }
}

/// A planner-controlled NPC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub position: Position,
    /// Remaining Manhattan walk waypoints; empty once the NPC has arrived.
    pub path: Vec<super::timeline::PathPoint>,
    /// The wall-clock time the planner should next consider this NPC.
    pub ready_time: i64,
    pub schedule: Schedule,
    pub job: Job,
    pub inventory: Inventory,
    /// Deltas this NPC's inventory has undergone during the current
    /// planning run (§3 "Inventory-state timeline").
    pub inventory_state: InventoryStateTimeline,
    pub crafting_rng: RngState,
}

impl Npc {
    pub fn new(id: NpcId, position: Position, schedule: Schedule, job: Job, inventory: Inventory, crafting_rng: RngState) -> Self {
        Self {
            id,
            position,
            path: Vec::new(),
            ready_time: 0,
            schedule,
            job,
            inventory,
            inventory_state: Vec::new(),
            crafting_rng,
        }
    }

    pub fn is_walking(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn holder_kind(&self) -> HolderKind {
        HolderKind::Npc(self.id.clone())
    }
}

impl InventoryHolder for Npc {
    fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    fn is_npc(&self) -> bool {
        true
    }

    fn holder_id(&self) -> &str {
        self.id.as_str()
    }
}
