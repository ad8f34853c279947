//! §8 scenario 3: crafting with insufficient materials must not mutate the
//! holder's inventory at all.

use cellplan::catalog::ObjectType;
use cellplan::error::InventoryError;
use cellplan::inventory::{self, HolderKind, Inventory};
use cellplan::model::ids::{NpcId, ObjectId};
use cellplan::model::{NetworkObject, Position};
use cellplan::rng::DeterministicRng;

#[test]
fn nine_sticks_is_one_short_of_a_wattle_wall() {
    let mut inv = Inventory::new(1, 10);
    let holder = HolderKind::Npc(NpcId::from("npc-1"));

    let mut sticks = NetworkObject::new(ObjectId::from("stick-0"), ObjectType::Stick, Position::new(0, 0), 0);
    sticks.amount = 9;
    sticks.exist = true;
    inventory::pick_up(&mut inv, sticks, &holder).unwrap();

    let recipe = cellplan::recipe::recipe_for(ObjectType::WattleWall).unwrap();
    let mut rng = DeterministicRng::from_seed_str("npc-1-craft");

    let err = inventory::craft(&mut inv, recipe, &holder, &mut rng).unwrap_err();

    assert_eq!(err, InventoryError::InsufficientMaterials);
    assert_eq!(inv.slots.len(), 1);
    assert_eq!(inv.slots[0].amount, 9);
    assert_eq!(inv.total_of(ObjectType::WattleWall), 0);
}
