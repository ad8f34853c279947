//! The Harvest Spawner (§4.C): given a resource node, produces one jittered,
//! freshly-identified item and a respawn delay, advancing the node's own
//! resumable RNG stream exactly once per harvest.

use serde::{Deserialize, Serialize};

use crate::catalog::ObjectType;
use crate::error::SpawnerError;
use crate::model::ids::ObjectId;
use crate::model::object::Position;
use crate::model::resource_node::ResourceNode;
use crate::rng::DeterministicRng;

/// One weighted entry of a node type's spawn table. A `probability` of 0
/// means "never happens, kept in the table for documentation" and is
/// skipped during the table walk rather than treated as an error.
#[derive(Debug, Clone, Copy)]
pub struct SpawnEntry {
    pub product: ObjectType,
    pub probability: f64,
    pub min_amount: u32,
    pub max_amount: u32,
}

/// Half-open position jitter applied to a spawned item, in pixels per axis.
const JITTER_RANGE: f64 = 200.0;
const JITTER_OFFSET: f64 = 100.0;

const TREE_TABLE: &[SpawnEntry] = &[
    SpawnEntry {
        product: ObjectType::Stick,
        probability: 0.6,
        min_amount: 1,
        max_amount: 2,
    },
    SpawnEntry {
        product: ObjectType::Wood,
        probability: 0.4,
        min_amount: 1,
        max_amount: 1,
    },
];

const ROCK_TABLE: &[SpawnEntry] = &[
    SpawnEntry {
        product: ObjectType::Stone,
        probability: 0.75,
        min_amount: 1,
        max_amount: 1,
    },
    SpawnEntry {
        product: ObjectType::Coal,
        probability: 0.25,
        min_amount: 1,
        max_amount: 1,
    },
];

const POND_TABLE: &[SpawnEntry] = &[
    SpawnEntry {
        product: ObjectType::Reed,
        probability: 0.4,
        min_amount: 1,
        max_amount: 2,
    },
    SpawnEntry {
        product: ObjectType::Mud,
        probability: 0.3,
        min_amount: 1,
        max_amount: 1,
    },
    SpawnEntry {
        product: ObjectType::Clay,
        probability: 0.2,
        min_amount: 1,
        max_amount: 1,
    },
    SpawnEntry {
        product: ObjectType::Fish,
        probability: 0.1,
        min_amount: 1,
        max_amount: 1,
    },
];

/// The spawn table for a node's object type, if it has one.
pub fn spawn_table_for(object_type: ObjectType) -> Option<&'static [SpawnEntry]> {
    match object_type {
        ObjectType::Tree => Some(TREE_TABLE),
        ObjectType::Rock => Some(ROCK_TABLE),
        ObjectType::Pond => Some(POND_TABLE),
        _ => None,
    }
}

/// One harvest's output: a new item ready to place in the world, plus how
/// long the node needs to recover before it can be harvested again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestResult {
    pub item_id: ObjectId,
    pub product: ObjectType,
    pub amount: u32,
    pub position: Position,
    pub respawn_delay_ms: i64,
}

/// Walks the cumulative-probability table from the end backward, which is
/// equivalent to walking it forward but matches the order the original
/// weighted table was authored in (heaviest entries last).
fn pick_entry(table: &[SpawnEntry], roll: f64) -> Result<&SpawnEntry, SpawnerError> {
    let total: f64 = table.iter().filter(|e| e.probability > 0.0).map(|e| e.probability).sum();
    if total <= 0.0 {
        return Err(SpawnerError::MalformedSpawnTable);
    }
    let mut remaining = roll * total;
    for entry in table.iter().rev() {
        if entry.probability <= 0.0 {
            continue;
        }
        remaining -= entry.probability;
        if remaining <= 0.0 {
            return Ok(entry);
        }
    }
    table
        .iter()
        .rev()
        .find(|e| e.probability > 0.0)
        .ok_or(SpawnerError::MalformedSpawnTable)
}

/// Harvests `node`: draws a product from its type's spawn table, mints a
/// fresh item id, jitters a spawn position around the node, and schedules
/// the node's next ready time. Advances and saves `node.rng` exactly once.
pub fn harvest(node: &mut ResourceNode, now: i64, spawn_time_ms: i64) -> Result<HarvestResult, SpawnerError> {
    let table = spawn_table_for(node.object_type).ok_or(SpawnerError::MalformedSpawnTable)?;

    let mut rng = DeterministicRng::from_state(node.rng.clone());
    let entry = pick_entry(table, rng.next_f64())?;

    let amount = if entry.max_amount > entry.min_amount {
        entry.min_amount + (rng.next_f64() * (entry.max_amount - entry.min_amount + 1) as f64).floor() as u32
    } else {
        entry.min_amount
    };

    let jitter_x = (rng.next_f64() * JITTER_RANGE).floor() - JITTER_OFFSET;
    let jitter_y = (rng.next_f64() * JITTER_RANGE).floor() - JITTER_OFFSET;
    let position = Position::new(node.position.x + jitter_x as i64, node.position.y + jitter_y as i64);

    let item_id = ObjectId::from(format!("object-{}", rng.next_u32()));

    let respawn_delay_ms = (rng.next_f64() * spawn_time_ms as f64 + spawn_time_ms as f64 * 0.5).ceil() as i64;

    node.rng = rng.save_state();
    node.ready_time = now + respawn_delay_ms;

    Ok(HarvestResult {
        item_id,
        product: entry.product,
        amount,
        position,
        respawn_delay_ms,
    })
}
