//! Construction rules (§3, §8 scenarios 4-5): house footprint limits and
//! the stockpile join rule. Both are pure validation over the model types
//! in [`crate::model`] — actually mutating a `Vec<Stockpile>` or placing a
//! `House` is the caller's job once validation passes.

use crate::error::BuildingError;
use crate::model::ids::{HouseId, StockpileId};
use crate::model::object::Position;
use crate::model::{House, Stockpile};

/// Maximum stockpile footprint, in tiles, along either axis.
pub const MAX_STOCKPILE_TILES_PER_AXIS: i64 = 10;

/// Validates and builds a house footprint (§8 scenario 4).
pub fn construct_house(id: HouseId, origin: Position, width_tiles: i64, height_tiles: i64) -> Result<House, BuildingError> {
    House::new(id, origin, width_tiles, height_tiles)
}

fn bounding_tiles(tiles: &[Position]) -> (i64, i64) {
    let min_x = tiles.iter().map(|t| t.x).min().unwrap_or(0);
    let max_x = tiles.iter().map(|t| t.x).max().unwrap_or(0);
    let min_y = tiles.iter().map(|t| t.y).min().unwrap_or(0);
    let max_y = tiles.iter().map(|t| t.y).max().unwrap_or(0);
    (max_x - min_x + 1, max_y - min_y + 1)
}

fn is_orthogonally_adjacent(a: &Position, b: &Position) -> bool {
    (a.x - b.x).abs() + (a.y - b.y).abs() == 1
}

/// Places a new stockpile tile. If the tile touches no existing pile, a new
/// one is created. If it touches exactly one, the tile joins that pile. If
/// it would bridge two previously separate piles into one, the placement is
/// rejected (§8 scenario 5) — merging piles is something a player must do
/// by removing and rebuilding, not something a single tile placement can do
/// silently.
pub fn place_stockpile_tile(piles: &mut Vec<Stockpile>, new_id: StockpileId, tile: Position) -> Result<(), BuildingError> {
    let touching: Vec<usize> = piles
        .iter()
        .enumerate()
        .filter(|(_, pile)| pile.tiles.iter().any(|t| is_orthogonally_adjacent(t, &tile)))
        .map(|(i, _)| i)
        .collect();

    match touching.len() {
        0 => {
            piles.push(Stockpile::new(new_id, vec![tile]));
            Ok(())
        }
        1 => {
            let pile = &mut piles[touching[0]];
            let mut candidate_tiles = pile.tiles.clone();
            candidate_tiles.push(tile);
            let (width, height) = bounding_tiles(&candidate_tiles);
            if width > MAX_STOCKPILE_TILES_PER_AXIS {
                return Err(BuildingError::StockpileTooLongEastWest);
            }
            if height > MAX_STOCKPILE_TILES_PER_AXIS {
                return Err(BuildingError::StockpileTooLongNorthSouth);
            }
            pile.add_tile(tile);
            Ok(())
        }
        _ => Err(BuildingError::CannotConnectStockpiles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_three_by_three_house_constructs_and_a_four_wide_one_is_rejected() {
        assert!(construct_house(HouseId::from("h1"), Position::new(0, 0), 3, 3).is_ok());
        let err = construct_house(HouseId::from("h2"), Position::new(0, 0), 4, 3).unwrap_err();
        assert_eq!(err, BuildingError::HouseTooLongEastWest);
    }

    #[test]
    fn a_lone_tile_starts_a_new_pile() {
        let mut piles = Vec::new();
        place_stockpile_tile(&mut piles, StockpileId::from("sp1"), Position::new(0, 0)).unwrap();
        assert_eq!(piles.len(), 1);
    }

    #[test]
    fn an_adjacent_tile_joins_the_touching_pile() {
        let mut piles = vec![Stockpile::new(StockpileId::from("sp1"), vec![Position::new(0, 0)])];
        place_stockpile_tile(&mut piles, StockpileId::from("sp2"), Position::new(1, 0)).unwrap();
        assert_eq!(piles.len(), 1);
        assert_eq!(piles[0].tile_count(), 2);
    }

    #[test]
    fn a_tile_bridging_two_piles_is_rejected() {
        let mut piles = vec![
            Stockpile::new(StockpileId::from("sp1"), vec![Position::new(0, 0)]),
            Stockpile::new(StockpileId::from("sp2"), vec![Position::new(2, 0)]),
        ];
        let err = place_stockpile_tile(&mut piles, StockpileId::from("sp3"), Position::new(1, 0)).unwrap_err();
        assert_eq!(err, BuildingError::CannotConnectStockpiles);
        assert_eq!(piles.len(), 2);
    }
}
