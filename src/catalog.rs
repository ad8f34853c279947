//! Object-type catalog (§6): a closed, process-wide immutable table of every
//! network-object type this world knows about. Mirrors the teacher's own
//! static tuning tables (`constants.rs`'s `RAIDER_COLORS`/sprite-frame
//! tables) in spirit — data that never changes once the process starts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Closed enum of object-type tags. Unknown tags never reach this type —
/// they're rejected by [`ObjectType::parse`] before a caller can hold one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ObjectType {
    Person,
    Stockpile,
    House,
    Tree,
    Rock,
    Pond,
    Stick,
    Wood,
    Stone,
    Coal,
    Iron,
    Mud,
    Clay,
    Reed,
    WattleWall,
    Plank,
    Brick,
    ThatchRoof,
    Floor,
    Door,
    Fence,
    Wheat,
    Carrot,
    Potato,
    Berry,
    Fish,
    Meat,
    Bread,
    Apple,
    WaterJug,
    Axe,
    Pickaxe,
    Hoe,
    Shovel,
    Knife,
    Hammer,
    Sickle,
    Chair,
    Table,
    Bed,
    Chest,
    Barrel,
    Cart,
    Wagon,
    Boat,
    Chicken,
    Cow,
    Sheep,
    Pig,
    Horse,
    Oil,
    Tar,
    Plastic,
    Asphalt,
    Well,
    FarmPlot,
    Seed,
    Flax,
    Cloth,
}

/// Closed enum of object groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectGroup {
    NaturalResource,
    Resource,
    Construction,
    Food,
    Tool,
    Building,
    Person,
    Furniture,
    Storage,
    Vehicle,
    Animal,
}

/// Static catalog entry. All fields are immutable, process-wide data.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub object_type: ObjectType,
    pub tag: &'static str,
    pub group: ObjectGroup,
    pub display_name: &'static str,
    pub description: &'static str,
    pub stack_limit: u32,
}

macro_rules! catalog {
    ($( $variant:ident => $tag:literal, $group:ident, $name:literal, $desc:literal $(, stack = $stack:literal)? ; )+) => {
        const ENTRIES: &[CatalogEntry] = &[
            $(
                CatalogEntry {
                    object_type: ObjectType::$variant,
                    tag: $tag,
                    group: ObjectGroup::$group,
                    display_name: $name,
                    description: $desc,
                    stack_limit: catalog!(@stack $($stack)?),
                },
            )+
        ];
    };
    (@stack) => { 1 };
    (@stack $stack:literal) => { $stack };
}

catalog! {
    Person => "PERSON", Person, "Person", "A villager or player-controlled person.";
    Stockpile => "STOCKPILE", Storage, "Stockpile", "A multi-tile storage yard.";
    House => "HOUSE", Building, "House", "A dwelling assigned to one NPC.";
    Tree => "TREE", NaturalResource, "Tree", "Harvestable for wood and sticks.";
    Rock => "ROCK", NaturalResource, "Rock", "Harvestable for stone and coal.";
    Pond => "POND", NaturalResource, "Pond", "Harvestable for reed, mud, and clay.";
    Stick => "STICK", Resource, "Stick", "A small piece of wood.", stack = 10;
    Wood => "WOOD", Resource, "Wood", "A log of raw timber.";
    Stone => "STONE", Resource, "Stone", "A chunk of quarried rock.";
    Coal => "COAL", Resource, "Coal", "Combustible mineral fuel.";
    Iron => "IRON", Resource, "Iron", "Raw iron ore.";
    Mud => "MUD", Resource, "Mud", "Wet riverbank sediment.";
    Clay => "CLAY", Resource, "Clay", "Fine moldable sediment.";
    Reed => "REED", Resource, "Reed", "Fibrous marsh plant.";
    WattleWall => "WATTLE_WALL", Construction, "Wattle Wall", "A woven-stick wall panel.", stack = 4;
    Plank => "PLANK", Construction, "Plank", "A sawn length of timber.";
    Brick => "BRICK", Construction, "Brick", "A fired clay block.";
    ThatchRoof => "THATCH_ROOF", Construction, "Thatch Roof", "A reed roofing panel.";
    Floor => "FLOOR", Construction, "Floor", "A floor tile panel.";
    Door => "DOOR", Construction, "Door", "A house door panel.";
    Fence => "FENCE", Construction, "Fence", "A perimeter fence panel.";
    Wheat => "WHEAT", Food, "Wheat", "Harvested grain.";
    Carrot => "CARROT", Food, "Carrot", "A root vegetable.";
    Potato => "POTATO", Food, "Potato", "A starchy tuber.";
    Berry => "BERRY", Food, "Berry", "Foraged wild berries.";
    Fish => "FISH", Food, "Fish", "Caught from a pond.";
    Meat => "MEAT", Food, "Meat", "Butchered animal meat.";
    Bread => "BREAD", Food, "Bread", "Baked from wheat flour.";
    Apple => "APPLE", Food, "Apple", "An orchard fruit.";
    WaterJug => "WATER_JUG", Food, "Water Jug", "Drinking water in a clay jug.";
    Axe => "AXE", Tool, "Axe", "Used to harvest trees.";
    Pickaxe => "PICKAXE", Tool, "Pickaxe", "Used to harvest rocks.";
    Hoe => "HOE", Tool, "Hoe", "Used to till farmland.";
    Shovel => "SHOVEL", Tool, "Shovel", "Used to dig mud and clay.";
    Knife => "KNIFE", Tool, "Knife", "Used to butcher and carve.";
    Hammer => "HAMMER", Tool, "Hammer", "Used in construction.";
    Sickle => "SICKLE", Tool, "Sickle", "Used to harvest wheat and reed.";
    Chair => "CHAIR", Furniture, "Chair", "A single seat.";
    Table => "TABLE", Furniture, "Table", "A work or dining surface.";
    Bed => "BED", Furniture, "Bed", "A sleeping place, doubles as NPC home.";
    Chest => "CHEST", Storage, "Chest", "A small personal storage container.";
    Barrel => "BARREL", Storage, "Barrel", "Bulk liquid or grain storage.";
    Cart => "CART", Vehicle, "Cart", "A hand-pulled hauling cart.";
    Wagon => "WAGON", Vehicle, "Wagon", "An animal-drawn hauling wagon.";
    Boat => "BOAT", Vehicle, "Boat", "Waterborne transport.";
    Chicken => "CHICKEN", Animal, "Chicken", "A small farm bird.";
    Cow => "COW", Animal, "Cow", "Dairy and draft animal.";
    Sheep => "SHEEP", Animal, "Sheep", "Wool-bearing livestock.";
    Pig => "PIG", Animal, "Pig", "Farm livestock.";
    Horse => "HORSE", Animal, "Horse", "Mount and draft animal.";
    Oil => "OIL", Resource, "Crude Oil", "Unrefined petroleum.";
    Tar => "TAR", Resource, "Tar", "Refined petroleum byproduct.";
    Plastic => "PLASTIC", Construction, "Plastic", "Synthesized from petroleum.";
    Asphalt => "ASPHALT", Construction, "Asphalt", "Paving material from tar.";
    Well => "WELL", Building, "Well", "A water-drawing structure.";
    FarmPlot => "FARM_PLOT", Building, "Farm Plot", "A tilled planting plot.";
    Seed => "SEED", Resource, "Seed", "Planted to grow crops.";
    Flax => "FLAX", Resource, "Flax", "Fiber crop for cloth.";
    Cloth => "CLOTH", Construction, "Cloth", "Woven flax fabric.";
}

impl ObjectType {
    /// Parses a catalog tag (e.g. `"STICK"`). Fails for any tag outside the
    /// closed set — callers never get to hold an `ObjectType` the catalog
    /// doesn't recognize.
    pub fn parse(tag: &str) -> Result<Self, CatalogError> {
        ENTRIES
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.object_type)
            .ok_or_else(|| CatalogError::UnknownObjectType(tag.to_string()))
    }

    /// The catalog tag for this type (round-trips with [`ObjectType::parse`]).
    pub fn tag(self) -> &'static str {
        self.entry().tag
    }

    /// Looks up this type's catalog entry. Every `ObjectType` variant has
    /// exactly one entry, so this never fails.
    pub fn entry(self) -> &'static CatalogEntry {
        ENTRIES
            .iter()
            .find(|e| e.object_type == self)
            .expect("every ObjectType variant has a catalog entry")
    }

    /// Maximum `amount` a single inventory slot of this type may hold.
    pub fn stack_limit(self) -> u32 {
        self.entry().stack_limit
    }

    pub fn group(self) -> ObjectGroup {
        self.entry().group
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Looks up a full catalog entry by tag, failing for unknown tags.
pub fn lookup(tag: &str) -> Result<&'static CatalogEntry, CatalogError> {
    Ok(ObjectType::parse(tag)?.entry())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_limits_match_the_spec() {
        assert_eq!(ObjectType::Stick.stack_limit(), 10);
        assert_eq!(ObjectType::WattleWall.stack_limit(), 4);
        assert_eq!(ObjectType::Wood.stack_limit(), 1);
        assert_eq!(ObjectType::Brick.stack_limit(), 1);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = ObjectType::parse("UNOBTAINIUM").unwrap_err();
        assert_eq!(err, CatalogError::UnknownObjectType("UNOBTAINIUM".to_string()));
    }

    #[test]
    fn every_entry_round_trips_through_its_tag() {
        for entry in ENTRIES {
            assert_eq!(ObjectType::parse(entry.tag).unwrap(), entry.object_type);
        }
    }

    #[test]
    fn object_type_serializes_to_its_catalog_tag() {
        let json = serde_json::to_string(&ObjectType::WattleWall).unwrap();
        assert_eq!(json, "\"WATTLE_WALL\"");
        let back: ObjectType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ObjectType::WattleWall);
    }

    #[test]
    fn tags_are_unique() {
        let mut tags: Vec<&str> = ENTRIES.iter().map(|e| e.tag).collect();
        tags.sort_unstable();
        let before = tags.len();
        tags.dedup();
        assert_eq!(tags.len(), before, "duplicate catalog tag");
    }
}
