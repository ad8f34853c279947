//! The Cell Planner (§4.D): advances every NPC in one cell from `now` to a
//! target horizon, one "NPC ready" event at a time, and applies player
//! [`crate::request::Request`]s against the same state. Runs identically
//! on the client (for prediction) and the server worker (for
//! authoritative ticks) — same inputs always produce the same outputs.

mod deposit;
mod dispatch;
mod movement;
mod queue;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::model::ids::{HouseId, NpcId, ObjectId, PersonId, ResourceNodeId, StockpileId};
use crate::model::{House, NetworkObject, Npc, Person, ResourceNode, Stockpile};
use crate::request::{Request, RequestKind};

use queue::ReadyQueue;

/// An optional cutoff the planner must never plan past (§4.D). Set by the
/// caller when a cell has been externally locked mid-horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLock {
    pub pause_date: Option<i64>,
}

/// Everything a cell's planner needs: every NPC, person, stockpile, house,
/// and resource node in the cell, plus loose items not currently held by
/// anyone. An arena of id-keyed maps rather than a graph of `Rc<RefCell<_>>`
/// handles — every cross-reference is an id lookup, never a shared pointer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerState {
    pub now_ms: i64,
    pub npcs: HashMap<NpcId, Npc>,
    pub persons: HashMap<PersonId, Person>,
    pub stockpiles: HashMap<StockpileId, Stockpile>,
    pub houses: HashMap<HouseId, House>,
    pub resource_nodes: HashMap<ResourceNodeId, ResourceNode>,
    /// Items spawned into the world but not yet held by anyone (freshly
    /// harvested, or dropped).
    pub loose_items: HashMap<ObjectId, NetworkObject>,
    pub cell_lock: Option<CellLock>,
}

/// The wire shape the worker reads at the start of a tick. Identical to
/// [`PlannerState`] — the planner's internal representation already is the
/// serialized snapshot, so there is nothing to translate at the boundary.
pub type CellSnapshot = PlannerState;

/// The wire shape the worker writes back after advancing the horizon.
pub type CellState = PlannerState;

/// Runs the Cell Planner over one cell's state.
pub struct CellPlanner {
    state: PlannerState,
    queue: ReadyQueue,
}

impl CellPlanner {
    /// Builds a planner from a loaded snapshot, seeding the ready queue
    /// from every NPC's own `ready_time` and performing output-finalization
    /// pruning on the *input* side (§4.D): every NPC's path keeps only
    /// waypoints at or after `now_ms` (the caller's pre-interpolation step
    /// is assumed to have already folded in anything earlier), every loose
    /// object's state timeline keeps only entries strictly after `now_ms`,
    /// and every resource node's timeline is cleared — its previous run's
    /// events have already been baked into `depleted`/`ready_time`.
    pub fn new(mut state: PlannerState) -> Self {
        let start_time = state.now_ms;
        for npc in state.npcs.values_mut() {
            npc.path.retain(|p| p.arrival_time >= start_time);
        }
        for item in state.loose_items.values_mut() {
            item.state.retain(|e| e.time > start_time);
        }
        for node in state.resource_nodes.values_mut() {
            node.state.clear();
        }

        let mut queue = ReadyQueue::new();
        for npc in state.npcs.values() {
            queue.push(npc.ready_time, npc.id.clone());
        }
        Self { state, queue }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn into_state(self) -> PlannerState {
        self.state
    }

    /// The finalized output (§4.D `getState()`): if a `cellLock.pauseDate`
    /// is set, truncates every emitted timeline (NPC paths and
    /// inventory-state deltas, stockpile inventory-state deltas, resource
    /// node and object state events) to the events at or before it plus
    /// exactly the next one after (§9 "the *next* future event is retained
    /// in the resulting timeline and applied on replay"); garbage-collects
    /// any loose item with `exist=false` and no future `Exist(true)` event;
    /// and fails with [`PlannerError::SpawnObjectEmptyState`] if any
    /// surviving item carries an empty timeline despite existing — every
    /// spawned item must have at least its `Exist(true)` event recorded.
    pub fn get_state(&self) -> Result<PlannerState, PlannerError> {
        let mut out = self.state.clone();

        if let Some(pause_date) = out.cell_lock.and_then(|lock| lock.pause_date) {
            for npc in out.npcs.values_mut() {
                truncate_after_pause_date(&mut npc.path, pause_date, |p| p.arrival_time);
                truncate_after_pause_date(&mut npc.inventory_state, pause_date, |e| e.time);
            }
            for stockpile in out.stockpiles.values_mut() {
                truncate_after_pause_date(&mut stockpile.inventory_state, pause_date, |e| e.time);
            }
            for node in out.resource_nodes.values_mut() {
                truncate_after_pause_date(&mut node.state, pause_date, |e| e.time);
            }
            for item in out.loose_items.values_mut() {
                truncate_after_pause_date(&mut item.state, pause_date, |e| e.time);
            }
        }

        out.loose_items.retain(|_, item| !item.is_collectable_garbage());
        for item in out.loose_items.values() {
            if item.exist && item.state.is_empty() {
                return Err(PlannerError::SpawnObjectEmptyState(item.id.to_string()));
            }
        }
        Ok(out)
    }

    /// Advances every ready NPC up to (and including) `until_ms`, never
    /// past the cell's `cellLock.pauseDate` if one is set.
    pub fn run(&mut self, until_ms: i64) -> Result<(), PlannerError> {
        let effective_until = match self.state.cell_lock.and_then(|lock| lock.pause_date) {
            Some(pause_date) => until_ms.min(pause_date),
            None => until_ms,
        };

        while let Some(ready_time) = self.queue.peek_time() {
            if ready_time > effective_until {
                break;
            }
            let (ready_time, npc_id) = self.queue.pop().expect("peeked Some");
            self.state.now_ms = ready_time;
            let next_ready = dispatch::dispatch_npc(&mut self.state, &npc_id)?;
            // Every dispatch must make forward progress: a zero-distance
            // walk (already at the destination) would otherwise reschedule
            // the same NPC at the same instant forever.
            let next_ready = next_ready.max(ready_time + 1);
            if let Some(npc) = self.state.npcs.get_mut(&npc_id) {
                npc.ready_time = next_ready;
            }
            self.queue.push(next_ready, npc_id);
        }
        self.state.now_ms = effective_until.max(self.state.now_ms);
        Ok(())
    }

    /// Applies one player request against the current state (§6).
    pub fn apply_request(&mut self, request: &Request) -> Result<(), PlannerError> {
        self.state.now_ms = self.state.now_ms.max(request.issued_at_ms);
        apply_request(&mut self.state, request)
    }
}

/// Keeps every event with `time <= pause_date`, plus exactly the first
/// event after it, dropping the rest (§9 open question on pause-date
/// truncation). A no-op if every event already falls at or before
/// `pause_date`; never empties an already-non-empty list, since the
/// "first event after" is always kept when one exists.
fn truncate_after_pause_date<T>(events: &mut Vec<T>, pause_date: i64, time_of: impl Fn(&T) -> i64) {
    if let Some(cut) = events.iter().position(|e| time_of(e) > pause_date) {
        events.truncate(cut + 1);
    }
}

fn apply_request(state: &mut PlannerState, request: &Request) -> Result<(), PlannerError> {
    use crate::building;
    use crate::inventory::{self, HolderKind};

    let person = state
        .persons
        .get(&request.person)
        .cloned()
        .ok_or_else(|| PlannerError::PersonNotFound(request.person.to_string()))?;
    let holder = HolderKind::Person(person.id.clone());

    match &request.kind {
        RequestKind::PickUp { item_id } => {
            let Some(item) = state.loose_items.remove(item_id) else {
                return Ok(());
            };
            let p = state.persons.get_mut(&request.person).expect("checked above");
            match inventory::pick_up(&mut p.inventory, item.clone(), &holder) {
                Ok(_) => Ok(()),
                Err(err) => {
                    state.loose_items.insert(item_id.clone(), item);
                    Err(err.into())
                }
            }
        }
        RequestKind::Drop { item_id } => {
            let p = state.persons.get_mut(&request.person).expect("checked above");
            let (_, dropped) = inventory::drop(&mut p.inventory, item_id);
            if let Some(mut item) = dropped {
                item.position = p.position;
                state.loose_items.insert(item.id.clone(), item);
            }
            Ok(())
        }
        RequestKind::Craft { product } => {
            let recipe = crate::recipe::recipe_for(*product).ok_or(PlannerError::SpawnObjectEmptyState(product.to_string()))?;
            let p = state.persons.get_mut(&request.person).expect("checked above");
            let mut rng = crate::rng::DeterministicRng::from_seed_str(&format!("{}-craft-{}", p.id, state.now_ms));
            inventory::craft(&mut p.inventory, recipe, &holder, &mut rng)?;
            Ok(())
        }
        RequestKind::WithdrawFromStockpile { stockpile, slot_id } => {
            let sp = state
                .stockpiles
                .get_mut(stockpile)
                .ok_or_else(|| PlannerError::InitialStockpileNotFound(stockpile.to_string()))?;
            let (_, item) = inventory::withdraw_from_stockpile(&mut sp.inventory, slot_id)?;
            let p = state.persons.get_mut(&request.person).expect("checked above");
            inventory::pick_up(&mut p.inventory, item, &holder)?;
            Ok(())
        }
        RequestKind::DepositIntoStockpile { stockpile, item_id } => {
            let p = state.persons.get_mut(&request.person).expect("checked above");
            let (_, item) = inventory::drop(&mut p.inventory, item_id);
            let Some(item) = item else { return Ok(()) };
            let sp = state
                .stockpiles
                .get_mut(stockpile)
                .ok_or_else(|| PlannerError::InitialStockpileNotFound(stockpile.to_string()))?;
            inventory::deposit_into_stockpile(&mut sp.inventory, item, stockpile)?;
            Ok(())
        }
        RequestKind::ConstructHouse {
            origin,
            width_tiles,
            height_tiles,
        } => {
            let id = HouseId::from(format!("house-{}", state.houses.len() + 1));
            let house = building::construct_house(id.clone(), *origin, *width_tiles, *height_tiles)?;
            state.houses.insert(id, house);
            Ok(())
        }
        RequestKind::DeconstructHouse { house } => {
            state.houses.remove(house);
            Ok(())
        }
        RequestKind::ConstructStockpileTile { tile } => {
            let mut piles: Vec<Stockpile> = state.stockpiles.values().cloned().collect();
            let new_id = StockpileId::from(format!("stockpile-{}", state.stockpiles.len() + 1));
            building::place_stockpile_tile(&mut piles, new_id, *tile)?;
            state.stockpiles = piles.into_iter().map(|p| (p.id.clone(), p)).collect();
            Ok(())
        }
        RequestKind::DeconstructStockpileTile { stockpile, tile } => {
            if let Some(sp) = state.stockpiles.get_mut(stockpile) {
                sp.remove_tile(tile)?;
                if sp.tiles.is_empty() {
                    state.stockpiles.remove(stockpile);
                }
            }
            Ok(())
        }
        RequestKind::SetNpcJob { npc, job } => {
            if let Some(n) = state.npcs.get_mut(npc) {
                n.job = job.clone();
            }
            Ok(())
        }
        RequestKind::HarvestResource { node } => {
            let now = state.now_ms;
            let Some(resource_node) = state.resource_nodes.get_mut(node) else {
                return Err(PlannerError::InitialResourceNotFound(node.to_string()));
            };
            if !resource_node.is_harvestable_at(now) {
                return Ok(());
            }
            let spawn_time_ms = resource_node.spawn_time_ms;
            let result = crate::spawner::harvest(resource_node, now, spawn_time_ms)?;
            resource_node.depleted = true;
            resource_node.state.push(crate::model::object::StateEvent {
                time: now,
                patch: crate::model::object::Patch::Depleted(true),
            });
            resource_node.state.push(crate::model::object::StateEvent {
                time: resource_node.ready_time,
                patch: crate::model::object::Patch::Depleted(false),
            });

            let mut item = NetworkObject::new(result.item_id.clone(), result.product, result.position, now);
            item.amount = result.amount;
            item.state.push(crate::model::object::StateEvent {
                time: now,
                patch: crate::model::object::Patch::Exist(true),
            });
            state.loose_items.insert(item.id.clone(), item);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ObjectType;
    use crate::inventory::Inventory;
    use crate::model::Position;

    fn empty_state() -> PlannerState {
        PlannerState::default()
    }

    #[test]
    fn set_npc_job_updates_the_npcs_assigned_job() {
        use crate::model::{Job, Npc, Schedule};
        use crate::model::ids::{HouseId, NpcId};
        use crate::rng::DeterministicRng;

        let mut state = empty_state();
        state.persons.insert(PersonId::from("p1"), Person::new(PersonId::from("p1"), Position::new(0, 0), Inventory::new(1, 10)));
        let npc = Npc::new(
            NpcId::from("n1"),
            Position::new(0, 0),
            Schedule {
                house: HouseId::from("h1"),
                sleep_start_ms: 0,
                sleep_end_ms: 0,
            },
            Job::Gather,
            Inventory::new(1, 10),
            DeterministicRng::from_seed_str("n1").save_state(),
        );
        state.npcs.insert(npc.id.clone(), npc);

        let mut planner = CellPlanner::new(state);
        let req = crate::request::build_request_for_set_npc_job(0, PersonId::from("p1"), NpcId::from("n1"), Job::Haul);
        planner.apply_request(&req).unwrap();

        let state = planner.into_state();
        assert_eq!(state.npcs[&NpcId::from("n1")].job, Job::Haul);
    }

    #[test]
    fn harvest_resource_spawns_a_loose_item_from_a_ready_node() {
        use crate::model::ResourceNode;
        use crate::model::ids::ResourceNodeId;
        use crate::rng::DeterministicRng;

        let mut state = empty_state();
        state.persons.insert(PersonId::from("p1"), Person::new(PersonId::from("p1"), Position::new(0, 0), Inventory::new(1, 10)));
        let node = ResourceNode::new(
            ResourceNodeId::from("node-1"),
            Position::new(0, 0),
            ObjectType::Tree,
            60_000,
            DeterministicRng::from_seed_str("node-1").save_state(),
        );
        state.resource_nodes.insert(node.id.clone(), node);

        let mut planner = CellPlanner::new(state);
        let req = crate::request::build_request_for_harvest_resource(0, PersonId::from("p1"), ResourceNodeId::from("node-1"));
        planner.apply_request(&req).unwrap();

        let state = planner.into_state();
        assert_eq!(state.loose_items.len(), 1);
        assert!(state.resource_nodes[&ResourceNodeId::from("node-1")].depleted);
    }

    #[test]
    fn a_person_can_pick_up_a_loose_item_via_a_request() {
        let mut state = empty_state();
        let person = Person::new(PersonId::from("p1"), Position::new(0, 0), Inventory::new(1, 10));
        state.persons.insert(person.id.clone(), person);

        let mut item = NetworkObject::new(ObjectId::from("item-1"), ObjectType::Stick, Position::new(0, 0), 0);
        item.amount = 1;
        item.exist = true;
        state.loose_items.insert(item.id.clone(), item);

        let mut planner = CellPlanner::new(state);
        let req = crate::request::build_request_for_pick_up(0, PersonId::from("p1"), ObjectId::from("item-1"));
        planner.apply_request(&req).unwrap();

        let state = planner.into_state();
        assert!(state.loose_items.is_empty());
        assert_eq!(state.persons[&PersonId::from("p1")].inventory.slots.len(), 1);
    }

    #[test]
    fn get_state_garbage_collects_items_that_no_longer_exist_and_never_will() {
        let mut state = empty_state();
        let mut gone = NetworkObject::new(ObjectId::from("gone"), ObjectType::Stick, Position::new(0, 0), 0);
        gone.exist = false;
        state.loose_items.insert(gone.id.clone(), gone);

        let planner = CellPlanner::new(state);
        let out = planner.get_state().unwrap();
        assert!(out.loose_items.is_empty());
    }

    #[test]
    fn get_state_rejects_an_existing_item_with_an_empty_timeline() {
        let mut state = empty_state();
        let mut broken = NetworkObject::new(ObjectId::from("broken"), ObjectType::Stick, Position::new(0, 0), 0);
        broken.exist = true;
        state.loose_items.insert(broken.id.clone(), broken);

        let planner = CellPlanner::new(state);
        let err = planner.get_state().unwrap_err();
        assert_eq!(err, PlannerError::SpawnObjectEmptyState("broken".to_string()));
    }

    #[test]
    fn get_state_truncates_a_npcs_path_to_the_pause_date_plus_one_pending_point() {
        use crate::model::{Job, Npc, Schedule};
        use crate::model::ids::HouseId;
        use crate::model::timeline::PathPoint;
        use crate::rng::DeterministicRng;

        let mut state = empty_state();
        state.cell_lock = Some(CellLock { pause_date: Some(1_000) });
        let mut npc = Npc::new(
            NpcId::from("n1"),
            Position::new(0, 0),
            Schedule {
                house: HouseId::from("h1"),
                sleep_start_ms: 0,
                sleep_end_ms: 0,
            },
            Job::Gather,
            Inventory::new(1, 10),
            DeterministicRng::from_seed_str("n1").save_state(),
        );
        npc.path = vec![
            PathPoint { position: Position::new(10, 0), arrival_time: 500 },
            PathPoint { position: Position::new(20, 0), arrival_time: 1_000 },
            PathPoint { position: Position::new(30, 0), arrival_time: 1_500 },
            PathPoint { position: Position::new(40, 0), arrival_time: 2_000 },
        ];
        state.npcs.insert(npc.id.clone(), npc);

        let planner = CellPlanner::new(state);
        let out = planner.get_state().unwrap();
        let path = &out.npcs[&NpcId::from("n1")].path;
        // Both points at or before the pause date survive, plus exactly the
        // first point after it — the point after that is dropped.
        assert_eq!(path.len(), 3);
        assert_eq!(path[2].arrival_time, 1_500);
    }

    #[test]
    fn run_never_advances_past_a_cell_locks_pause_date() {
        use crate::model::{Job, Npc, Schedule};
        use crate::model::ids::HouseId;
        use crate::rng::DeterministicRng;

        let mut state = empty_state();
        state.cell_lock = Some(CellLock { pause_date: Some(5_000) });
        let npc = Npc::new(
            NpcId::from("n1"),
            Position::new(0, 0),
            Schedule {
                house: HouseId::from("h1"),
                sleep_start_ms: 0,
                sleep_end_ms: 0,
            },
            Job::Haul,
            Inventory::new(1, 10),
            DeterministicRng::from_seed_str("n1").save_state(),
        );
        state.npcs.insert(npc.id.clone(), npc);

        let mut planner = CellPlanner::new(state);
        planner.run(1_000_000).unwrap();
        assert!(planner.state().now_ms <= 5_000);
    }
}
