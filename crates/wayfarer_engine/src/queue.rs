//! Time-ordered queue of cancelable events.
//!
//! Events are ordered by due time, then by insertion sequence, so entries due
//! at the same instant fire in the order they were scheduled. Every scheduled
//! event hands back an [`Entry`] that can cancel it; cancellation is a no-op
//! once the event has fired or was already canceled.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering as AtomicOrdering};

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELED: u8 = 2;

// =============================================================================
// Entry
// =============================================================================

/// Handle to one scheduled event.
#[derive(Clone, Debug)]
pub struct Entry {
    state: Arc<AtomicU8>,
    due: u64,
}

impl Entry {
    fn new(due: u64) -> Self {
        Self {
            state: Arc::new(AtomicU8::new(PENDING)),
            due,
        }
    }

    /// Cancels the event if it has not fired yet.
    ///
    /// Returns true if this call canceled it.
    pub fn cancel(&self) -> bool {
        self.state
            .compare_exchange(PENDING, CANCELED, AtomicOrdering::AcqRel, AtomicOrdering::Acquire)
            .is_ok()
    }

    /// Returns true while the event is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state.load(AtomicOrdering::Acquire) == PENDING
    }

    /// Returns true once the event has fired.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.state.load(AtomicOrdering::Acquire) == FIRED
    }

    /// Returns true if the event was canceled before firing.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.state.load(AtomicOrdering::Acquire) == CANCELED
    }

    /// Game time at which the event is due.
    #[must_use]
    pub const fn due(&self) -> u64 {
        self.due
    }

    fn fire(&self) -> bool {
        self.state
            .compare_exchange(PENDING, FIRED, AtomicOrdering::AcqRel, AtomicOrdering::Acquire)
            .is_ok()
    }
}

// =============================================================================
// Scheduled
// =============================================================================

struct Scheduled<E> {
    due: u64,
    seq: u64,
    entry: Entry,
    payload: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

// =============================================================================
// EventQueue
// =============================================================================

/// A queue of events keyed by game time.
pub struct EventQueue<E> {
    events: BinaryHeap<Reverse<Scheduled<E>>>,
    now: u64,
    next_seq: u64,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EventQueue<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("now", &self.now)
            .field("scheduled", &self.events.len())
            .finish()
    }
}

impl<E> EventQueue<E> {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates an empty queue whose clock reads `now`.
    #[must_use]
    pub fn starting_at(now: u64) -> Self {
        Self {
            events: BinaryHeap::new(),
            now,
            next_seq: 0,
        }
    }

    /// The queue's current game time.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Schedules `payload` to fire `delay` units from now.
    pub fn schedule(&mut self, delay: u64, payload: E) -> Entry {
        self.schedule_at(self.now.saturating_add(delay), payload)
    }

    /// Schedules `payload` to fire at an absolute time.
    ///
    /// A time in the past fires on the next advance.
    pub fn schedule_at(&mut self, due: u64, payload: E) -> Entry {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        let entry = Entry::new(due);
        self.events.push(Reverse(Scheduled {
            due,
            seq,
            entry: entry.clone(),
            payload,
        }));
        entry
    }

    /// Pops the next event due at or before `target`, skipping canceled ones.
    ///
    /// The queue's clock moves to the popped event's due time, so events
    /// scheduled while handling it are relative to that instant.
    pub fn pop_due(&mut self, target: u64) -> Option<(u64, E)> {
        loop {
            let Reverse(next) = self.events.peek()?;
            if next.due > target {
                return None;
            }
            let Reverse(event) = self.events.pop()?;
            if event.entry.fire() {
                self.now = self.now.max(event.due);
                return Some((event.due, event.payload));
            }
        }
    }

    /// Moves the clock forward to `target` once everything due has fired.
    pub fn settle(&mut self, target: u64) {
        self.now = self.now.max(target);
    }

    /// Advances to `target`, returning every event that came due in order.
    pub fn advance(&mut self, target: u64) -> Vec<E> {
        let mut fired = Vec::new();
        while let Some((_, payload)) = self.pop_due(target) {
            fired.push(payload);
        }
        self.settle(target);
        fired
    }

    /// Cancels and drops every scheduled event.
    pub fn cancel_all(&mut self) {
        for Reverse(event) in self.events.drain() {
            event.entry.cancel();
        }
    }

    /// Number of events still waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.events
            .iter()
            .filter(|Reverse(e)| e.entry.is_pending())
            .count()
    }

    /// Returns true if nothing is waiting to fire.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut queue = EventQueue::new();
        queue.schedule(30, "c");
        queue.schedule(10, "a");
        queue.schedule(20, "b");
        assert_eq!(queue.advance(25), vec!["a", "b"]);
        assert_eq!(queue.now(), 25);
        assert_eq!(queue.advance(30), vec!["c"]);
    }

    #[test]
    fn same_due_fires_in_insertion_order() {
        let mut queue = EventQueue::new();
        for n in 0..5 {
            queue.schedule(10, n);
        }
        assert_eq!(queue.advance(10), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn canceled_entries_are_skipped() {
        let mut queue = EventQueue::new();
        let a = queue.schedule(5, "a");
        queue.schedule(5, "b");
        assert!(a.cancel());
        assert!(a.is_canceled());
        assert_eq!(queue.advance(5), vec!["b"]);
    }

    #[test]
    fn cancel_after_fire_is_noop() {
        let mut queue = EventQueue::new();
        let entry = queue.schedule(1, ());
        assert_eq!(queue.advance(1).len(), 1);
        assert!(entry.has_fired());
        assert!(!entry.cancel());
        assert!(!entry.cancel());
        assert!(entry.has_fired());
        assert!(queue.advance(100).is_empty());
    }

    #[test]
    fn cancel_twice_is_noop() {
        let mut queue = EventQueue::new();
        let entry = queue.schedule(1, ());
        assert!(entry.cancel());
        assert!(!entry.cancel());
        assert!(queue.advance(1).is_empty());
    }

    #[test]
    fn pop_moves_clock_to_due_time() {
        let mut queue = EventQueue::starting_at(100);
        queue.schedule(10, ());
        let (due, ()) = queue.pop_due(500).unwrap();
        assert_eq!(due, 110);
        assert_eq!(queue.now(), 110);
        let next = queue.schedule(10, ());
        assert_eq!(next.due(), 120);
    }

    #[test]
    fn cancel_all_clears_queue() {
        let mut queue = EventQueue::new();
        let a = queue.schedule(1, 1);
        let b = queue.schedule(2, 2);
        assert_eq!(queue.pending(), 2);
        queue.cancel_all();
        assert!(a.is_canceled() && b.is_canceled());
        assert!(queue.is_idle());
        assert!(queue.advance(10).is_empty());
    }
}
