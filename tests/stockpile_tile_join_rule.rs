//! §8 scenario 5: a tile that would bridge two separate stockpiles into one
//! is rejected; a tile touching exactly one pile joins it.

use cellplan::building;
use cellplan::error::BuildingError;
use cellplan::model::ids::StockpileId;
use cellplan::model::{Position, Stockpile};

#[test]
fn a_tile_between_two_piles_cannot_connect_them() {
    let mut piles = vec![
        Stockpile::new(StockpileId::from("sp-1"), vec![Position::new(0, 0)]),
        Stockpile::new(StockpileId::from("sp-2"), vec![Position::new(2, 0)]),
    ];

    let err = building::place_stockpile_tile(&mut piles, StockpileId::from("sp-3"), Position::new(1, 0)).unwrap_err();

    assert_eq!(err, BuildingError::CannotConnectStockpiles);
    assert_eq!(piles.len(), 2, "the attempted bridge tile must not be placed into either pile");
}

#[test]
fn a_tile_touching_one_pile_joins_it_instead_of_starting_a_new_one() {
    let mut piles = vec![Stockpile::new(StockpileId::from("sp-1"), vec![Position::new(0, 0)])];

    building::place_stockpile_tile(&mut piles, StockpileId::from("sp-2"), Position::new(1, 0)).unwrap();

    assert_eq!(piles.len(), 1);
    assert_eq!(piles[0].tile_count(), 2);
}
