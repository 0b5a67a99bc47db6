//! Containment integration tests
//!
//! Tests moving, destroying, and the contents index.

use proptest::prelude::*;
use wayfarer_foundation::EntityId;
use wayfarer_world::{Thing, World};

fn setup() -> (World, EntityId, EntityId, EntityId) {
    let mut world = World::new(1);
    let hall = world.spawn(Thing::room("room.hall")).unwrap();
    let cellar = world.spawn(Thing::room("room.cellar")).unwrap();
    let hero = world.spawn(Thing::actor("pc.hero").at(hall)).unwrap();
    (world, hall, cellar, hero)
}

// =============================================================================
// Moving
// =============================================================================

#[test]
fn move_updates_both_sides() {
    let (mut world, hall, _, hero) = setup();
    let rope = world.spawn(Thing::item("item.rope").at(hall)).unwrap();
    world.move_to(rope, hero).unwrap();
    assert_eq!(world.owner_of(rope), Some(hero));
    assert_eq!(world.room_of(rope), Some(hall));
    assert!(!world.contents(hall).contains(&rope));
    assert_eq!(world.contents(hero), vec![rope]);
}

#[test]
fn nothing_moves_into_itself() {
    let (mut world, _, _, hero) = setup();
    assert!(world.move_to(hero, hero).is_err());
}

#[test]
fn spawn_into_missing_location_fails() {
    let (mut world, _, cellar, _) = setup();
    world.destroy(cellar).unwrap();
    assert!(world.spawn(Thing::item("item.rope").at(cellar)).is_err());
}

// =============================================================================
// Destroying
// =============================================================================

#[test]
fn destroy_releases_possessions_into_the_room() {
    let (mut world, hall, _, hero) = setup();
    let rope = world.spawn(Thing::item("item.rope").at(hero)).unwrap();
    let released = world.destroy(hero).unwrap();
    assert_eq!(released, vec![rope]);
    assert_eq!(world.location_of(rope), Some(hall));
    assert!(!world.exists(hero));
    assert!(world.get(hero).is_err());
}

#[test]
fn stale_ids_stay_dead_after_slot_reuse() {
    let (mut world, hall, _, hero) = setup();
    world.destroy(hero).unwrap();
    let newcomer = world.spawn(Thing::actor("pc.new").at(hall)).unwrap();
    assert_ne!(newcomer, hero);
    assert!(!world.exists(hero));
    assert!(world.destroy(hero).is_err());
}

proptest! {
    /// After any sequence of moves, every thing is listed in exactly the
    /// contents of its own location.
    #[test]
    fn contents_index_matches_locations(moves in prop::collection::vec((0usize..4, 0usize..6), 0..40)) {
        let (mut world, hall, cellar, hero) = setup();
        let items: Vec<EntityId> = (0..4)
            .map(|i| world.spawn(Thing::item(&format!("item.{i}")).at(hall)).unwrap())
            .collect();
        let places = [hall, cellar, hero, items[0], items[1], items[2]];

        for (item, place) in moves {
            let _ = world.move_to(items[item], places[place]);
        }

        for &id in &items {
            let location = world.location_of(id).unwrap();
            prop_assert!(world.contents(location).contains(&id));
            for &other in &places {
                if other != location {
                    prop_assert!(!world.contents(other).contains(&id));
                }
            }
        }
    }
}
