//! Resource node records (§3, §4.C). A resource node is a positioned,
//! harvestable object with its own resumable RNG stream — the seed for
//! that stream is fixed at node creation, but the stream's *position* is
//! saved and restored across planner runs so a node harvested across two
//! separate worker invocations still produces the same sequence of items
//! it would have produced in one continuous run.

use serde::{Deserialize, Serialize};

use crate::catalog::ObjectType;
use crate::rng::RngState;

use super::ids::ResourceNodeId;
use super::object::{Patch, Position, StateEvent, StateTimeline};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceNode {
    pub id: ResourceNodeId,
    pub position: Position,
    pub object_type: ObjectType,
    /// Baseline respawn delay in milliseconds; the spawner jitters around it.
    pub spawn_time_ms: i64,
    pub depleted: bool,
    /// The wall-clock time this node becomes harvestable again.
    pub ready_time: i64,
    pub rng: RngState,
    /// Events generated by the current planning run only — a previous
    /// run's events have already been baked into `depleted`/`ready_time`
    /// by the caller's pre-interpolation step (§4.D finalization).
    pub state: StateTimeline,
}

impl ResourceNode {
    pub fn new(id: ResourceNodeId, position: Position, object_type: ObjectType, spawn_time_ms: i64, rng: RngState) -> Self {
        Self {
            id,
            position,
            object_type,
            spawn_time_ms,
            depleted: false,
            ready_time: 0,
            rng,
            state: Vec::new(),
        }
    }

    /// A node is harvestable once wall-clock reaches `ready_time`. The
    /// live planner relies on this time comparison alone to decide whether
    /// to re-harvest — `depleted` is bookkeeping mirrored into `state` for
    /// client replay (§9 "timelines instead of callbacks"), not a second
    /// gate a caller needs to clear itself.
    pub fn is_harvestable_at(&self, wall_clock_ms: i64) -> bool {
        wall_clock_ms >= self.ready_time
    }

    /// Applies one state event's patch to this node. A resource node's
    /// timeline only ever carries [`Patch::Depleted`] — the client replays
    /// harvest/respawn toggles this way instead of re-deriving them from
    /// `ready_time` (§9 "timelines instead of callbacks").
    fn apply_patch(&mut self, event: &StateEvent) {
        if let Patch::Depleted(depleted) = &event.patch {
            self.depleted = *depleted;
        }
    }

    /// Replays every event with `time <= at` onto a clone of this node, in
    /// order — the same pure `(entity, time) -> entity` replay
    /// [`super::object::NetworkObject::interpolated_at`] performs for
    /// ordinary objects (§9 design note).
    pub fn interpolated_at(&self, at: i64) -> Self {
        let mut out = self.clone();
        for event in &self.state {
            if event.time <= at {
                out.apply_patch(event);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ObjectType;
    use crate::rng::DeterministicRng;

    fn node() -> ResourceNode {
        ResourceNode::new(
            ResourceNodeId::from("node-1"),
            Position::new(0, 0),
            ObjectType::Tree,
            60_000,
            DeterministicRng::from_seed_str("node-1").save_state(),
        )
    }

    #[test]
    fn replay_applies_depleted_toggles_up_to_the_given_time() {
        let mut n = node();
        n.state.push(StateEvent {
            time: 100,
            patch: Patch::Depleted(true),
        });
        n.state.push(StateEvent {
            time: 200,
            patch: Patch::Depleted(false),
        });

        assert!(!n.interpolated_at(50).depleted);
        assert!(n.interpolated_at(150).depleted);
        assert!(!n.interpolated_at(200).depleted);

        // Pure: original untouched.
        assert!(!n.depleted);
    }
}
