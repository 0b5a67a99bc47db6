//! A scripted session through the starter world.

use wayfarer_engine::Advance;
use wayfarer_foundation::EntityId;
use wayfarer_runtime::Game;

struct Session {
    game: Game,
    player: EntityId,
}

impl Session {
    fn new() -> Self {
        let mut game = Game::demo(11).unwrap();
        let player = game.spawn_player("Ada").unwrap();
        Self { game, player }
    }

    fn say(&mut self, line: &str) -> Vec<String> {
        self.game.handle(self.player, line);
        self.output()
    }

    fn wait(&mut self, units: u64) -> Vec<String> {
        self.game.advance(units);
        self.output()
    }

    fn output(&mut self) -> Vec<String> {
        let player = self.player;
        self.game
            .drain_output()
            .into_iter()
            .filter(|(target, _)| *target == player)
            .map(|(_, text)| text)
            .collect()
    }
}

#[test]
fn buy_dig_and_search_for_treasure() {
    let mut s = Session::new();

    assert_eq!(s.say("buy shovel"), vec!["You buy the shovel for 6 gold."]);
    assert_eq!(s.say("go east"), vec!["You are in the walled garden."]);

    assert_eq!(s.say("dig"), vec!["You start digging."]);
    assert!(s.wait(29).is_empty());
    assert_eq!(s.wait(1), vec!["You unearth a old chest!"]);

    assert_eq!(s.say("search"), vec!["You begin searching the area."]);
    assert_eq!(
        s.wait(15),
        vec!["You keep searching.", "You discover a silver ring!"]
    );
    assert_eq!(
        s.say("take ring"),
        vec!["You stop searching.", "You take the silver ring."]
    );

    let world = s.game.realm().world();
    let ring = world.find("item.ring").unwrap();
    let shovel = world.find("item.shovel").unwrap();
    assert_eq!(world.owner_of(ring), Some(s.player));
    assert_eq!(world.get(shovel).unwrap().wear, 1);
    assert_eq!(world.get(s.player).unwrap().gold, 14);
    assert_eq!(world.get(s.player).unwrap().power.unwrap().current, 26);
}

#[test]
fn hidden_things_cannot_be_taken_before_they_are_found() {
    let mut s = Session::new();
    s.say("go east");
    assert_eq!(s.say("take ring"), vec!["You don't see \"ring\" here."]);
    let world = s.game.realm().world();
    let ring = world.find("item.ring").unwrap();
    assert_eq!(world.owner_of(ring), None);
}

#[test]
fn the_cellar_is_too_dark_to_dig_without_a_lamp() {
    let mut s = Session::new();
    s.say("buy shovel");
    s.say("go down");
    assert_eq!(s.say("dig"), vec!["It is too dark to do that."]);

    s.say("go up");
    assert_eq!(s.say("buy lantern"), vec!["You buy the brass lantern for 8 gold."]);
    s.say("go down");
    assert_eq!(s.say("dig"), vec!["The ground here is solid rock."]);
}
