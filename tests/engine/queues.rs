//! Event queue integration tests
//!
//! Tests ordering, cancellation, and chunked advancement.

use proptest::prelude::*;
use wayfarer_engine::EventQueue;

#[test]
fn cancel_after_fire_is_a_safe_noop() {
    let mut queue = EventQueue::new();
    let entry = queue.schedule(5, "bell");
    assert_eq!(queue.advance(5), vec!["bell"]);
    assert!(entry.has_fired());
    assert!(!entry.cancel());
    assert!(entry.has_fired());
    assert!(queue.advance(100).is_empty());
}

#[test]
fn canceled_entries_never_fire() {
    let mut queue = EventQueue::new();
    let first = queue.schedule(1, 1);
    queue.schedule(1, 2);
    assert!(first.cancel());
    assert!(first.is_canceled());
    assert_eq!(queue.advance(1), vec![2]);
}

#[test]
fn delays_are_relative_to_queue_time() {
    let mut queue = EventQueue::starting_at(100);
    let entry = queue.schedule(10, ());
    assert_eq!(entry.due(), 110);
    assert!(queue.advance(109).is_empty());
    assert_eq!(queue.advance(110).len(), 1);
    assert_eq!(queue.now(), 110);
}

proptest! {
    /// Whatever the step sizes, events fire in due order, ties in insertion
    /// order, and canceled events never fire.
    #[test]
    fn fires_in_due_then_insertion_order(
        delays in prop::collection::vec((0u64..50, any::<bool>()), 0..40),
        steps in prop::collection::vec(1u64..20, 1..10),
    ) {
        let mut queue = EventQueue::new();
        let mut expected = Vec::new();
        for (index, &(delay, cancel)) in delays.iter().enumerate() {
            let entry = queue.schedule(delay, index);
            if cancel {
                prop_assert!(entry.cancel());
            } else {
                expected.push((delay, index));
            }
        }

        let mut fired = Vec::new();
        let mut target = 0;
        for step in &steps {
            target += step;
            fired.extend(queue.advance(target));
        }

        expected.retain(|&(due, _)| due <= target);
        expected.sort_unstable();
        let expected: Vec<usize> = expected.into_iter().map(|(_, index)| index).collect();
        prop_assert_eq!(fired, expected);
        prop_assert_eq!(queue.now(), target);
    }
}
