//! Player-issued requests (§6): the tagged set of operations a `Person` can
//! ask the simulation to perform. Serialized at the client/server boundary;
//! the planner validates and applies each one against the current
//! [`crate::planner::PlannerState`] on its next tick.

use serde::{Deserialize, Serialize};

use crate::catalog::ObjectType;
use crate::model::ids::{HouseId, NpcId, ObjectId, PersonId, ResourceNodeId, StockpileId};
use crate::model::object::Position;
use crate::model::Job;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RequestKind {
    PickUp { item_id: ObjectId },
    Drop { item_id: ObjectId },
    Craft { product: ObjectType },
    WithdrawFromStockpile { stockpile: StockpileId, slot_id: ObjectId },
    DepositIntoStockpile { stockpile: StockpileId, item_id: ObjectId },
    ConstructHouse { origin: Position, width_tiles: i64, height_tiles: i64 },
    DeconstructHouse { house: HouseId },
    ConstructStockpileTile { tile: Position },
    DeconstructStockpileTile { stockpile: StockpileId, tile: Position },
    /// Assigns an NPC's job, mirroring the "set-NPC-job" operation of §6.
    SetNpcJob { npc: NpcId, job: Job },
    /// Forces an immediate harvest of a resource node on the player's
    /// behalf, mirroring the "harvest-resource" operation of §6 (distinct
    /// from an NPC's own Gather dispatch, which schedules walk + wait
    /// timing instead of harvesting instantly).
    HarvestResource { node: ResourceNodeId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub issued_at_ms: i64,
    pub person: PersonId,
    pub kind: RequestKind,
}

fn request(issued_at_ms: i64, person: PersonId, kind: RequestKind) -> Request {
    Request { issued_at_ms, person, kind }
}

pub fn build_request_for_pick_up(issued_at_ms: i64, person: PersonId, item_id: ObjectId) -> Request {
    request(issued_at_ms, person, RequestKind::PickUp { item_id })
}

pub fn build_request_for_drop(issued_at_ms: i64, person: PersonId, item_id: ObjectId) -> Request {
    request(issued_at_ms, person, RequestKind::Drop { item_id })
}

pub fn build_request_for_craft(issued_at_ms: i64, person: PersonId, product: ObjectType) -> Request {
    request(issued_at_ms, person, RequestKind::Craft { product })
}

pub fn build_request_for_withdraw_from_stockpile(issued_at_ms: i64, person: PersonId, stockpile: StockpileId, slot_id: ObjectId) -> Request {
    request(issued_at_ms, person, RequestKind::WithdrawFromStockpile { stockpile, slot_id })
}

pub fn build_request_for_deposit_into_stockpile(issued_at_ms: i64, person: PersonId, stockpile: StockpileId, item_id: ObjectId) -> Request {
    request(issued_at_ms, person, RequestKind::DepositIntoStockpile { stockpile, item_id })
}

pub fn build_request_for_construct_house(issued_at_ms: i64, person: PersonId, origin: Position, width_tiles: i64, height_tiles: i64) -> Request {
    request(
        issued_at_ms,
        person,
        RequestKind::ConstructHouse {
            origin,
            width_tiles,
            height_tiles,
        },
    )
}

pub fn build_request_for_deconstruct_house(issued_at_ms: i64, person: PersonId, house: HouseId) -> Request {
    request(issued_at_ms, person, RequestKind::DeconstructHouse { house })
}

pub fn build_request_for_construct_stockpile_tile(issued_at_ms: i64, person: PersonId, tile: Position) -> Request {
    request(issued_at_ms, person, RequestKind::ConstructStockpileTile { tile })
}

pub fn build_request_for_deconstruct_stockpile_tile(issued_at_ms: i64, person: PersonId, stockpile: StockpileId, tile: Position) -> Request {
    request(issued_at_ms, person, RequestKind::DeconstructStockpileTile { stockpile, tile })
}

pub fn build_request_for_set_npc_job(issued_at_ms: i64, person: PersonId, npc: NpcId, job: Job) -> Request {
    request(issued_at_ms, person, RequestKind::SetNpcJob { npc, job })
}

pub fn build_request_for_harvest_resource(issued_at_ms: i64, person: PersonId, node: ResourceNodeId) -> Request {
    request(issued_at_ms, person, RequestKind::HarvestResource { node })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_built_request_round_trips_through_json() {
        let req = build_request_for_craft(1000, PersonId::from("p1"), ObjectType::WattleWall);
        let json = serde_json::to_string(&req).unwrap();
        let back: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(req, back);
    }
}
