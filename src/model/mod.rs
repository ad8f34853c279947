//! The data model shared by the inventory engine, the spawner, and the
//! planner (§3): ids, positioned network objects, NPCs, persons,
//! stockpiles, houses, resource nodes, and movement paths.

pub mod house;
pub mod ids;
pub mod npc;
pub mod object;
pub mod person;
pub mod resource_node;
pub mod stockpile;
pub mod timeline;

pub use house::House;
pub use npc::{Job, Npc, Schedule};
pub use object::{NetworkObject, Ownership, Patch, Position, StateEvent, StateTimeline};
pub use person::Person;
pub use resource_node::ResourceNode;
pub use stockpile::Stockpile;
pub use timeline::{build_manhattan_path, walk_duration_ms, PathPoint};
