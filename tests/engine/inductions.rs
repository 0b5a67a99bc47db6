//! Induction integration tests
//!
//! Tests the per-actor induction state machine through the realm.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use proptest::prelude::*;
use wayfarer_engine::{Context, Induction, QueueKey, Realm, task};
use wayfarer_foundation::{Description, EntityId, ErrorKind, ExecutionError};
use wayfarer_world::{Thing, World};

struct Tally {
    fired: Arc<AtomicU64>,
}

impl Induction for Tally {
    fn name(&self) -> &str {
        "tally"
    }

    fn complete(&mut self, _: EntityId, _: &mut Context<'_>) -> Result<Description, ExecutionError> {
        self.fired.fetch_add(1, Ordering::SeqCst);
        Ok(Description::new("tally.done"))
    }
}

fn tally() -> (Box<dyn Induction>, Arc<AtomicU64>) {
    let fired = Arc::new(AtomicU64::new(0));
    (
        Box::new(Tally {
            fired: Arc::clone(&fired),
        }),
        fired,
    )
}

fn realm() -> (Realm, EntityId) {
    let mut world = World::new(0);
    let room = world.spawn(Thing::room("room.yard")).unwrap();
    let hero = world.spawn(Thing::actor("pc.hero").at(room)).unwrap();
    (Realm::new(world), hero)
}

// =============================================================================
// State Machine
// =============================================================================

#[test]
fn double_start_fails_until_interrupted() {
    let (mut realm, hero) = realm();
    let (a, _) = tally();
    let (b, _) = tally();
    let (c, _) = tally();
    realm.start_induction(hero, a, 10, false).unwrap();
    let err = realm.start_induction(hero, b, 10, false).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InductionActive(_)));
    assert_eq!(realm.induction_name(hero), Some("tally"));

    realm.interrupt(hero).unwrap();
    assert!(!realm.is_inducting(hero));
    realm.start_induction(hero, c, 10, false).unwrap();
}

#[test]
fn completion_alerts_the_actor_once() {
    let (mut realm, hero) = realm();
    let (induction, fired) = tally();
    realm.start_induction(hero, induction, 4, false).unwrap();
    realm.tick(100);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    let alerts = realm.drain_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].target, hero);
    assert!(realm.drain_alerts().is_empty());
}

#[test]
fn inductions_for_missing_actors_are_refused() {
    let (mut realm, hero) = realm();
    realm.destroy_entity(hero).unwrap();
    let (induction, _) = tally();
    assert!(realm.start_induction(hero, induction, 1, false).is_err());
}

#[test]
fn destroying_an_actor_drops_its_tasks() {
    let (mut realm, hero) = realm();
    let ran = Arc::new(AtomicU64::new(0));
    let seen = Arc::clone(&ran);
    realm.schedule_task(
        QueueKey::Entity(hero),
        5,
        task("poke", move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }),
    );
    realm.destroy_entity(hero).unwrap();
    realm.tick(10);
    assert_eq!(ran.load(Ordering::SeqCst), 0);
}

#[test]
fn named_queue_tasks_outlive_entities() {
    let (mut realm, hero) = realm();
    let ran = Arc::new(AtomicU64::new(0));
    let seen = Arc::clone(&ran);
    realm.schedule_task(
        QueueKey::named("weather"),
        5,
        task("rain", move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }),
    );
    realm.destroy_entity(hero).unwrap();
    realm.tick(5);
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Repeating Inductions
// =============================================================================

proptest! {
    /// Advancing a repeating induction of duration D by N*D game time fires
    /// it exactly N times, however the time is split into ticks.
    #[test]
    fn repeating_fires_once_per_period(
        duration in 1u64..20,
        periods in 0u64..12,
        chunks in prop::collection::vec(1u64..7, 1..6),
    ) {
        let (mut realm, hero) = realm();
        let (induction, fired) = tally();
        realm.start_induction(hero, induction, duration, true).unwrap();

        let total = duration * periods;
        let mut advanced = 0;
        let mut chunk = chunks.iter().cycle();
        while advanced < total {
            let step = (*chunk.next().unwrap()).min(total - advanced);
            realm.tick(step);
            advanced += step;
        }

        prop_assert_eq!(fired.load(Ordering::SeqCst), periods);
        prop_assert!(realm.is_inducting(hero));
    }
}
