//! World query integration tests
//!
//! Tests perception, light, merchants, and wear.

use wayfarer_world::{Thing, World};

#[test]
fn perception_skips_hidden_things_and_self() {
    let mut world = World::new(2);
    let hall = world.spawn(Thing::room("room.hall")).unwrap();
    let hero = world.spawn(Thing::actor("pc.hero").at(hall)).unwrap();
    let coin = world.spawn(Thing::item("item.coin").at(hall)).unwrap();
    let ring = world.spawn(Thing::item("item.ring").hidden().at(hall)).unwrap();
    let rope = world.spawn(Thing::item("item.rope").at(hero)).unwrap();

    let seen = world.perceivable_by(hero);
    assert_eq!(seen, vec![coin, rope]);
    assert!(!seen.contains(&ring));
    assert!(!seen.contains(&hero));
}

#[test]
fn light_comes_from_room_items_or_carried_lamps() {
    let mut world = World::new(3);
    let cave = world.spawn(Thing::room("room.cave")).unwrap();
    let hero = world.spawn(Thing::actor("pc.hero").at(cave)).unwrap();
    assert!(!world.has_light(cave));

    let lamp = world.spawn(Thing::item("item.lamp").lit().at(hero)).unwrap();
    assert!(world.has_light(cave));

    world.move_to(lamp, cave).unwrap();
    assert!(world.has_light(cave));

    let sunny = world.spawn(Thing::room("room.field").lit()).unwrap();
    assert!(world.has_light(sunny));
}

#[test]
fn merchants_and_their_stock() {
    let mut world = World::new(4);
    let shop = world.spawn(Thing::room("room.shop")).unwrap();
    let hero = world.spawn(Thing::actor("pc.hero").at(shop)).unwrap();
    let smith = world
        .spawn(Thing::actor("npc.smith").with_category("merchant").at(shop))
        .unwrap();
    let axe = world.spawn(Thing::item("item.axe").at(smith)).unwrap();
    world.spawn(Thing::item("item.nail").at(hero)).unwrap();

    assert_eq!(world.merchants_near(hero), vec![smith]);
    assert_eq!(world.stock_near(hero), vec![axe]);
    assert_eq!(world.occupants(shop), vec![hero, smith]);
}

#[test]
fn wear_breaks_at_durability() {
    let mut world = World::new(5);
    let shovel = world
        .spawn(Thing::item("item.shovel").with_durability(2))
        .unwrap();
    let stone = world.spawn(Thing::item("item.stone")).unwrap();

    assert!(!world.wear(shovel).unwrap());
    assert!(world.wear(shovel).unwrap());
    assert!(world.is_broken(shovel));

    for _ in 0..10 {
        assert!(!world.wear(stone).unwrap());
    }
}

#[test]
fn seeded_worlds_roll_the_same() {
    use rand::Rng;

    let mut a = World::new(99);
    let mut b = World::new(99);
    let rolls_a: Vec<u32> = (0..8).map(|_| a.rng().gen_range(0..1000)).collect();
    let rolls_b: Vec<u32> = (0..8).map(|_| b.rng().gen_range(0..1000)).collect();
    assert_eq!(rolls_a, rolls_b);
}
