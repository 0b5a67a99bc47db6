//! World clock integration tests

use std::time::Duration;

use wayfarer_engine::{Advance, ClockConfig, WorldClock};

#[derive(Default)]
struct Elapsed {
    total: u64,
    calls: usize,
}

impl Advance for Elapsed {
    fn advance(&mut self, increment: u64) -> usize {
        self.total += increment;
        self.calls += 1;
        0
    }
}

#[test]
fn no_game_time_is_lost_to_rounding() {
    // 30 ms frames give 33.33 units each.
    let mut clock = WorldClock::new(ClockConfig::new().with_frame(Duration::from_millis(30))).unwrap();
    let mut target = Elapsed::default();
    for _ in 0..30 {
        clock.tick(&mut target);
    }
    assert_eq!(target.calls, 30);
    assert!((999..=1000).contains(&target.total), "{}", target.total);
    assert_eq!(clock.elapsed(), target.total);
}

#[test]
fn time_scale_speeds_game_time() {
    let mut clock = WorldClock::new(ClockConfig::accelerated(60.0)).unwrap();
    let mut target = Elapsed::default();
    clock.tick(&mut target);
    assert_eq!(target.total, 1200);
}

#[test]
fn bad_configs_are_refused() {
    assert!(WorldClock::new(ClockConfig::new().with_frame(Duration::ZERO)).is_err());
    assert!(WorldClock::new(ClockConfig::new().with_time_scale(f64::NAN)).is_err());
    assert!(WorldClock::new(ClockConfig::new().with_time_scale(0.0)).is_err());
}
