//! Stockpile records (§3, §4.D, §8 scenario 5). A stockpile's inventory
//! capacity scales with how many tiles have been built into it.

use serde::{Deserialize, Serialize};

use crate::inventory::{Inventory, InventoryStateTimeline};

use super::ids::StockpileId;
use super::object::Position;

/// Inventory rows contributed by a single stockpile tile.
pub const ROWS_PER_TILE: u32 = 2;

/// Inventory columns a stockpile always has, regardless of tile count.
pub const COLS_PER_TILE: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stockpile {
    pub id: StockpileId,
    /// Tile-grid coordinates (not pixels) of every tile built into this pile.
    pub tiles: Vec<Position>,
    pub inventory: Inventory,
    pub inventory_state: InventoryStateTimeline,
}

impl Stockpile {
    /// Builds a stockpile from its tile footprint, sizing its inventory to
    /// `tiles.len() * ROWS_PER_TILE` rows by `COLS_PER_TILE` columns.
    pub fn new(id: StockpileId, tiles: Vec<Position>) -> Self {
        let rows = tiles.len() as u32 * ROWS_PER_TILE;
        Self {
            id,
            tiles,
            inventory: Inventory::new(rows, COLS_PER_TILE),
            inventory_state: Vec::new(),
        }
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Rebuilds the inventory's row count after a tile is added or removed,
    /// preserving existing slots (§8 scenario 5: growing a pile must not
    /// disturb what's already stored in it).
    fn resize_inventory(&mut self) {
        self.inventory.rows = self.tiles.len() as u32 * ROWS_PER_TILE;
    }

    pub fn add_tile(&mut self, tile: Position) {
        self.tiles.push(tile);
        self.resize_inventory();
    }

    /// Refuses to shrink the pile below its occupied slot count (§8 scenario
    /// 5: "please remove items in inventory first").
    pub fn remove_tile(&mut self, tile: &Position) -> Result<(), crate::error::BuildingError> {
        let Some(idx) = self.tiles.iter().position(|t| t == tile) else {
            return Ok(());
        };
        let capacity_after = (self.tiles.len() - 1) as u32 * ROWS_PER_TILE * COLS_PER_TILE;
        if self.inventory.slots.len() as u32 > capacity_after {
            return Err(crate::error::BuildingError::StockpileTileInUse);
        }
        self.tiles.remove(idx);
        self.resize_inventory();
        Ok(())
    }
}
