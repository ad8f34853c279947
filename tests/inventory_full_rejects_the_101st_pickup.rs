//! §8 scenario 2: a 1×10 inventory holds at most 10 slots × stack-limit-10
//! sticks = 100 sticks; the 101st pickup must fail with `InventoryFull`.

use cellplan::catalog::ObjectType;
use cellplan::error::InventoryError;
use cellplan::inventory::{self, HolderKind, Inventory};
use cellplan::model::ids::PersonId;
use cellplan::model::{NetworkObject, Position};
use cellplan::model::ids::ObjectId;

fn stick(n: u32) -> NetworkObject {
    let mut item = NetworkObject::new(ObjectId::from(format!("stick-{n}")), ObjectType::Stick, Position::new(0, 0), 0);
    item.amount = 1;
    item.exist = true;
    item
}

#[test]
fn the_101st_stick_overflows_a_full_inventory() {
    let mut inv = Inventory::new(1, 10);
    let holder = HolderKind::Person(PersonId::from("p1"));

    for n in 0..100 {
        inventory::pick_up(&mut inv, stick(n), &holder).unwrap();
    }
    assert_eq!(inv.slots.len(), 10);
    assert_eq!(inv.total_of(ObjectType::Stick), 100);

    let err = inventory::pick_up(&mut inv, stick(100), &holder).unwrap_err();
    assert_eq!(err, InventoryError::InventoryFull);
    assert_eq!(inv.total_of(ObjectType::Stick), 100, "a failed pickup must not mutate the inventory");
}
