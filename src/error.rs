//! Typed error kinds for every fallible core operation.
//!
//! Each variant's `Display` string is part of the public contract — tests
//! check them verbatim, so wording must never drift once published.

use thiserror::Error;

/// Errors from the Inventory Engine (§4.B).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Not enough room for item")]
    InventoryFull,
    #[error("Not enough materials for crafting")]
    InsufficientMaterials,
}

/// Errors from the Harvest Spawner (§4.C).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpawnerError {
    /// The node's `spawns` table carries no entries with nonzero probability.
    #[error("resource node has a malformed spawn table (no probability mass)")]
    MalformedSpawnTable,
}

/// Errors from building/stockpile footprint validation (§6, external collaborator
/// contract exercised directly by the §8 scenario tests).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildingError {
    #[error("Cannot connect two separate buildings")]
    CannotConnectBuildings,
    #[error("Cannot connect two separate stockpiles")]
    CannotConnectStockpiles,
    #[error("House is too long east to west")]
    HouseTooLongEastWest,
    #[error("House is too long north to south")]
    HouseTooLongNorthSouth,
    #[error("Stockpile is too long east to west")]
    StockpileTooLongEastWest,
    #[error("Stockpile is too long north to south")]
    StockpileTooLongNorthSouth,
    #[error("Cannot remove stockpile tile, please remove items in inventory first")]
    StockpileTileInUse,
    /// Pass-through for the terrain collaborator's own invariant; this crate
    /// never raises it itself but surfaces it if terrain data is incomplete.
    #[error("Source or middle continent missing")]
    SourceOrMiddleContinentMissing,
}

/// Errors from the object-type catalog (§6).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No data for {0}")]
    UnknownObjectType(String),
}

/// Errors surfaced by `CellPlanner` output finalization (§4.D).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("initial resource node not found: {0}")]
    InitialResourceNotFound(String),
    #[error("initial stockpile not found: {0}")]
    InitialStockpileNotFound(String),
    #[error("spawned object {0} has no state events")]
    SpawnObjectEmptyState(String),
    #[error("unknown person: {0}")]
    PersonNotFound(String),
    #[error(transparent)]
    Spawner(#[from] SpawnerError),
    #[error(transparent)]
    Inventory(#[from] InventoryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Building(#[from] BuildingError),
}
