//! Resolving and running `take` against the starter world.

use wayfarer_command::{CommandExecutor, FailureReason, ParseContext, ParserResult};
use wayfarer_foundation::EntityId;
use wayfarer_stdlib::{demo, standard_parser};
use wayfarer_world::{Thing, World};

fn road_with_player() -> (World, wayfarer_foundation::NameStore, EntityId, EntityId) {
    let mut demo = demo::build(7).unwrap();
    let road = demo.world.find("room.road").unwrap();
    demo.names.insert("pc.1", &["ada"]);
    let ada = demo
        .world
        .spawn(Thing::actor("pc.1").with_power(10).at(road))
        .unwrap();
    (demo.world, demo.names, ada, road)
}

fn parse(world: &World, names: &wayfarer_foundation::NameStore, actor: EntityId, line: &str) -> ParserResult {
    let parser = standard_parser().unwrap();
    let ctx = ParseContext { actor, world, names };
    parser.parse(line, &ctx).unwrap()
}

#[test]
fn take_sword_moves_it_to_the_actor() {
    let (mut world, names, ada, road) = road_with_player();
    let sword = world.find("item.sword").unwrap();
    assert_eq!(world.location_of(sword), Some(road));

    let ParserResult::Success(command) = parse(&world, &names, ada, "take sword") else {
        panic!("take sword should parse");
    };
    assert_eq!(command.action.name, "take");

    let response = CommandExecutor::new().execute(&command, &mut world).unwrap();
    assert_eq!(response.description.key, "take.done");
    assert_eq!(world.owner_of(sword), Some(ada));
    assert!(world.contents(ada).contains(&sword));
}

#[test]
fn synonyms_resolve_to_the_same_command() {
    let (world, names, ada, _) = road_with_player();
    for line in ["get sword", "pick up iron sword", "grab sword"] {
        let result = parse(&world, &names, ada, line);
        let command = result.command().unwrap_or_else(|| panic!("{line} should parse"));
        assert_eq!(command.action.name, "take", "{line}");
    }
}

#[test]
fn unseen_sword_is_a_mismatch_and_changes_nothing() {
    let (mut world, names, ada, road) = road_with_player();
    let square = world.find("room.square").unwrap();
    world.move_to(ada, square).unwrap();
    let before = world.clone();

    let ParserResult::Failure(failure) = parse(&world, &names, ada, "take sword") else {
        panic!("the sword is on the road");
    };
    assert_eq!(failure.reason, FailureReason::Mismatch);
    assert_eq!(names.render(&failure.detail), "You don't see \"sword\" here.");

    let sword = world.find("item.sword").unwrap();
    assert_eq!(world.location_of(sword), Some(road));
    assert_eq!(world.contents(ada), before.contents(ada));
}
