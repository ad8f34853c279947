//! House records (§3, §8 scenario 4). A house is a positioned construction
//! footprint assigned to exactly one NPC as its home.

use serde::{Deserialize, Serialize};

use super::ids::{HouseId, NpcId};
use super::object::Position;

/// Maximum house footprint, in tiles, along either axis (§8 scenario 4: a
/// 3×3 house is valid, a 4-wide house raises `HouseTooLongEastWest`).
pub const MAX_HOUSE_TILES_PER_AXIS: i64 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    pub id: HouseId,
    /// The NPC this house is home to, once one moves in. A freshly built
    /// house starts unoccupied.
    pub npc: Option<NpcId>,
    pub origin: Position,
    /// Footprint width/height in tiles.
    pub width_tiles: i64,
    pub height_tiles: i64,
}

impl House {
    pub fn new(id: HouseId, origin: Position, width_tiles: i64, height_tiles: i64) -> Result<Self, crate::error::BuildingError> {
        if width_tiles > MAX_HOUSE_TILES_PER_AXIS {
            return Err(crate::error::BuildingError::HouseTooLongEastWest);
        }
        if height_tiles > MAX_HOUSE_TILES_PER_AXIS {
            return Err(crate::error::BuildingError::HouseTooLongNorthSouth);
        }
        Ok(Self {
            id,
            npc: None,
            origin,
            width_tiles,
            height_tiles,
        })
    }

    pub fn assign_npc(&mut self, npc: NpcId) {
        self.npc = Some(npc);
    }
}
