//! Positioned objects, network objects, and their state timelines (§3).

use serde::{Deserialize, Serialize};

use super::ids::{NpcId, ObjectId, PersonId, StockpileId};

/// Cell size in pixels; positions floor-divide by this to find their cell.
pub const CELL_SIZE: i64 = 2000;

/// Tile size in pixels; building footprints are measured in tiles.
pub const TILE_SIZE: i64 = 200;

/// An `{x, y}` position plus identity shared by every world entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The id of the cell this position falls in (floor-divide by [`CELL_SIZE`]).
    pub fn cell_id(&self) -> (i64, i64) {
        (self.x.div_euclid(CELL_SIZE), self.y.div_euclid(CELL_SIZE))
    }

    /// Manhattan distance to another position.
    pub fn manhattan_distance(&self, other: &Position) -> i64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Health `{value, max, rate}` carried by every network object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub value: f64,
    pub max: f64,
    pub rate: f64,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            value: 1.0,
            max: 1.0,
            rate: 0.0,
        }
    }
}

/// Exactly one of these ownership references may be set at any time — a
/// network object is never simultaneously held by a person, held by an
/// NPC, and inside a stockpile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ownership {
    #[default]
    None,
    GrabbedByPerson(PersonId),
    GrabbedByNpc(NpcId),
    InsideStockpile(StockpileId),
}

impl Ownership {
    pub fn is_none(&self) -> bool {
        matches!(self, Ownership::None)
    }
}

/// A partial mutation applied to a [`NetworkObject`] when wall-clock passes
/// a [`StateEvent::time`]. A closed tagged enum rather than a generic diff
/// (§9 design note: "tagged variants over classes").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Patch {
    Exist(bool),
    Position { x: i64, y: i64 },
    Amount(u32),
    Ownership(Ownership),
    IsInInventory(bool),
    Health(Health),
    Depleted(bool),
}

/// One entry of a state timeline: apply `patch` once wall-clock ≥ `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateEvent {
    pub time: i64,
    pub patch: Patch,
}

/// Ordered, append-only list of future state mutations.
pub type StateTimeline = Vec<StateEvent>;

/// A positioned object with identity, type, ownership, and a state timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkObject {
    pub id: ObjectId,
    pub object_type: crate::catalog::ObjectType,
    pub position: Position,
    pub last_update: i64,
    pub amount: u32,
    pub exist: bool,
    pub ownership: Ownership,
    pub is_in_inventory: bool,
    pub health: Health,
    pub state: StateTimeline,
}

impl NetworkObject {
    pub fn new(
        id: ObjectId,
        object_type: crate::catalog::ObjectType,
        position: Position,
        last_update: i64,
    ) -> Self {
        Self {
            id,
            object_type,
            position,
            last_update,
            amount: 1,
            exist: false,
            ownership: Ownership::None,
            is_in_inventory: false,
            health: Health::default(),
            state: Vec::new(),
        }
    }

    pub fn grabbed_by_npc(&self) -> Option<&NpcId> {
        match &self.ownership {
            Ownership::GrabbedByNpc(id) => Some(id),
            _ => None,
        }
    }

    pub fn inside_stockpile(&self) -> Option<&StockpileId> {
        match &self.ownership {
            Ownership::InsideStockpile(id) => Some(id),
            _ => None,
        }
    }

    /// Applies one patch in place and bumps `last_update` to the event time.
    pub fn apply_patch(&mut self, time: i64, patch: &Patch) {
        match patch {
            Patch::Exist(v) => self.exist = *v,
            Patch::Position { x, y } => self.position = Position::new(*x, *y),
            Patch::Amount(v) => self.amount = *v,
            Patch::Ownership(o) => self.ownership = o.clone(),
            Patch::IsInInventory(v) => self.is_in_inventory = *v,
            Patch::Health(h) => self.health = *h,
            // Depleted only applies to a ResourceNode's own timeline
            // (see ResourceNode::interpolated_at); a NetworkObject has no
            // `depleted` field to set.
            Patch::Depleted(_) => {}
        }
        self.last_update = time;
    }

    /// Applies every event in `events` with `time <= at` to a clone of
    /// `self`, in order — the replay step a client performs to advance an
    /// object to a given wall-clock time. Pure: never mutates `self`.
    pub fn interpolated_at(&self, at: i64) -> Self {
        let mut out = self.clone();
        for event in &self.state {
            if event.time <= at {
                out.apply_patch(event.time, &event.patch);
            }
        }
        out
    }

    /// An object with `exist=false` and nothing left in its timeline that
    /// would ever set it to true again is garbage.
    pub fn is_collectable_garbage(&self) -> bool {
        !self.exist && !self.state.iter().any(|e| matches!(e.patch, Patch::Exist(true)))
    }
}
