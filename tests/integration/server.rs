//! Players connected through the world worker.

use std::time::Duration;

use wayfarer_engine::ClockConfig;
use wayfarer_runtime::{Game, Server};

const WAIT: Duration = Duration::from_secs(2);

fn start() -> Server {
    let clock = ClockConfig::new()
        .with_frame(Duration::from_millis(5))
        .with_time_scale(20.0);
    Server::start(Game::demo(2).unwrap(), clock).unwrap()
}

#[test]
fn two_players_share_one_world() {
    let server = start();
    let ada = server.connect("ada").unwrap();
    let bob = server.connect("bob").unwrap();
    ada.recv_timeout(WAIT).unwrap();
    bob.recv_timeout(WAIT).unwrap();

    ada.send("buy dagger").unwrap();
    assert_eq!(ada.recv_timeout(WAIT).unwrap(), "You buy the dagger for 5 gold.");

    bob.send("buy dagger").unwrap();
    assert_eq!(bob.recv_timeout(WAIT).unwrap(), "You don't see \"dagger\" here.");

    ada.send("give dagger to bob").unwrap();
    assert_eq!(ada.recv_timeout(WAIT).unwrap(), "You give the dagger to Bob.");
    assert_eq!(bob.recv_timeout(WAIT).unwrap(), "Ada gives you the dagger.");

    let bob_id = bob.actor();
    drop(ada);
    drop(bob);
    let game = server.shutdown().unwrap();
    let world = game.realm().world();
    let dagger = world.find("item.dagger").unwrap();
    assert!(!world.exists(bob_id));
    assert_eq!(world.location_of(dagger), Some(game.start()));
}

#[test]
fn deferred_actions_finish_on_the_worker_clock() {
    let server = start();
    let ada = server.connect("ada").unwrap();
    ada.recv_timeout(WAIT).unwrap();

    ada.send("wait 300").unwrap();
    assert_eq!(ada.recv_timeout(WAIT).unwrap(), "You settle in to wait.");
    assert_eq!(ada.recv_timeout(WAIT).unwrap(), "You wait 300 moments.");
    let game = server.shutdown().unwrap();
    assert!(game.realm().now() >= 300);
}
