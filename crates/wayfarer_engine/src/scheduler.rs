//! A registry of event queues sharing one time source.
//!
//! Queues are either named ("global", "player", and so on) or belong to one
//! entity. Entity queues are created on first use and removed, with every
//! entry canceled, when the entity is destroyed.

use std::collections::BTreeMap;
use std::fmt;

use wayfarer_foundation::EntityId;

use crate::induction::Task;
use crate::queue::{Entry, EventQueue};

/// Identifies one queue in the scheduler.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueueKey {
    /// A shared queue registered by name.
    Named(String),
    /// The private queue of one entity.
    Entity(EntityId),
}

impl QueueKey {
    /// Key of a named queue.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl fmt::Display for QueueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{name}"),
            Self::Entity(id) => write!(f, "entity {id}"),
        }
    }
}

/// Something waiting in a queue.
pub enum Event {
    /// Completion of an actor's induction. The ticket identifies which
    /// induction the completion was scheduled for.
    Completion {
        /// The actor performing the induction.
        actor: EntityId,
        /// Identifies the induction instance.
        ticket: u64,
    },
    /// A one-shot task.
    Task(Box<dyn Task>),
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completion { actor, ticket } => f
                .debug_struct("Completion")
                .field("actor", actor)
                .field("ticket", ticket)
                .finish(),
            Self::Task(task) => f.debug_tuple("Task").field(&task.name()).finish(),
        }
    }
}

/// Named and per-entity queues advanced together.
#[derive(Debug, Default)]
pub struct Scheduler {
    queues: BTreeMap<QueueKey, EventQueue<Event>>,
    now: u64,
}

impl Scheduler {
    /// Creates a scheduler with the standard named queues.
    #[must_use]
    pub fn new() -> Self {
        let mut scheduler = Self::default();
        scheduler.register("global");
        scheduler.register("player");
        scheduler
    }

    /// Current game time.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Registers a named queue. Registering an existing name does nothing.
    pub fn register(&mut self, name: &str) {
        let now = self.now;
        self.queues
            .entry(QueueKey::named(name))
            .or_insert_with(|| EventQueue::starting_at(now));
    }

    /// Returns whether a queue exists.
    #[must_use]
    pub fn contains(&self, key: &QueueKey) -> bool {
        self.queues.contains_key(key)
    }

    /// Schedules an event `delay` units after the queue's current time.
    ///
    /// Entity and named queues are created on first use.
    pub fn schedule(&mut self, key: QueueKey, delay: u64, event: Event) -> Entry {
        let now = self.now;
        self.queues
            .entry(key)
            .or_insert_with(|| EventQueue::starting_at(now))
            .schedule(delay, event)
    }

    /// Schedules an event at an absolute game time.
    ///
    /// Used while a tick is in progress, when a queue's own clock may still
    /// read the time before the tick.
    pub fn schedule_at(&mut self, key: QueueKey, due: u64, event: Event) -> Entry {
        let now = self.now;
        self.queues
            .entry(key)
            .or_insert_with(|| EventQueue::starting_at(now))
            .schedule_at(due, event)
    }

    /// Schedules a task.
    pub fn schedule_task(&mut self, key: QueueKey, delay: u64, task: Box<dyn Task>) -> Entry {
        self.schedule(key, delay, Event::Task(task))
    }

    /// Removes a queue, canceling everything in it.
    ///
    /// Returns whether the queue existed.
    pub fn remove(&mut self, key: &QueueKey) -> bool {
        match self.queues.remove(key) {
            Some(mut queue) => {
                queue.cancel_all();
                true
            }
            None => false,
        }
    }

    /// Number of events waiting in a queue.
    #[must_use]
    pub fn pending(&self, key: &QueueKey) -> usize {
        self.queues.get(key).map_or(0, EventQueue::pending)
    }

    /// Keys of every queue, in a stable order.
    #[must_use]
    pub fn keys(&self) -> Vec<QueueKey> {
        self.queues.keys().cloned().collect()
    }

    /// Pops the next event due at or before `target` from one queue.
    pub fn pop_due(&mut self, key: &QueueKey, target: u64) -> Option<(u64, Event)> {
        self.queues.get_mut(key)?.pop_due(target)
    }

    /// Moves every queue's clock, and the scheduler's, to `target`.
    pub fn settle(&mut self, target: u64) {
        for queue in self.queues.values_mut() {
            queue.settle(target);
        }
        self.now = self.now.max(target);
    }
}
