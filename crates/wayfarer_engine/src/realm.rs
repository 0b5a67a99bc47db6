//! The realm: world state, its scheduler, and every actor's induction.
//!
//! Each actor is either idle or has exactly one active induction. Starting an
//! induction schedules its completion on the actor's queue; when it fires the
//! induction completes and the actor returns to idle, unless the induction
//! repeats, in which case it is rescheduled for the same duration measured
//! from the moment it fired.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, error};
use wayfarer_foundation::{Description, EntityId, Error, ErrorKind, ExecutionError, Result};
use wayfarer_world::World;

use crate::clock::Advance;
use crate::induction::{Alert, Context, Induction, Task};
use crate::queue::Entry;
use crate::scheduler::{Event, QueueKey, Scheduler};

struct Active {
    induction: Box<dyn Induction>,
    duration: u64,
    repeat: bool,
    ticket: u64,
    entry: Entry,
}

/// World, scheduler, and inductions, advanced together.
pub struct Realm {
    world: World,
    scheduler: Scheduler,
    active: HashMap<EntityId, Active>,
    next_ticket: u64,
    alerts: Vec<Alert>,
}

impl fmt::Debug for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Realm")
            .field("now", &self.scheduler.now())
            .field("things", &self.world.len())
            .field("inductions", &self.active.len())
            .field("alerts", &self.alerts.len())
            .finish()
    }
}

impl Realm {
    /// Wraps a world with a fresh scheduler.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self {
            world,
            scheduler: Scheduler::new(),
            active: HashMap::new(),
            next_ticket: 0,
            alerts: Vec::new(),
        }
    }

    /// The world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The scheduler.
    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The scheduler, mutably.
    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    /// Current game time.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Returns whether the actor has an active induction.
    #[must_use]
    pub fn is_inducting(&self, actor: EntityId) -> bool {
        self.active.contains_key(&actor)
    }

    /// Name of the actor's active induction.
    #[must_use]
    pub fn induction_name(&self, actor: EntityId) -> Option<&str> {
        self.active.get(&actor).map(|a| a.induction.name())
    }

    /// Starts an induction that completes after `duration` units.
    ///
    /// A repeating induction is rescheduled after each completion; its
    /// duration is at least one unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor already has an active induction or does
    /// not exist.
    pub fn start_induction(
        &mut self,
        actor: EntityId,
        induction: Box<dyn Induction>,
        duration: u64,
        repeat: bool,
    ) -> Result<()> {
        if self.active.contains_key(&actor) {
            return Err(Error::new(ErrorKind::InductionActive(actor)));
        }
        self.world.get(actor)?;

        let duration = if repeat { duration.max(1) } else { duration };
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let entry = self.scheduler.schedule(
            QueueKey::Entity(actor),
            duration,
            Event::Completion { actor, ticket },
        );
        debug!(actor = %actor, induction = induction.name(), duration, repeat, "induction started");
        self.active.insert(
            actor,
            Active {
                induction,
                duration,
                repeat,
                ticket,
                entry,
            },
        );
        Ok(())
    }

    /// Interrupts the actor's active induction.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is idle.
    pub fn interrupt(&mut self, actor: EntityId) -> Result<()> {
        let Some(mut active) = self.active.remove(&actor) else {
            return Err(Error::new(ErrorKind::InductionIdle(actor)));
        };
        active.entry.cancel();
        let now = self.scheduler.now();
        let mut ctx = Context::new(&mut self.world, &mut self.scheduler, now, &mut self.alerts);
        active.induction.interrupt(actor, &mut ctx);
        debug!(actor = %actor, induction = active.induction.name(), "induction interrupted");
        Ok(())
    }

    /// Schedules a task on a queue.
    pub fn schedule_task(&mut self, key: QueueKey, delay: u64, task: Box<dyn Task>) -> Entry {
        self.scheduler.schedule_task(key, delay, task)
    }

    /// Queues a description for an entity.
    pub fn alert(&mut self, target: EntityId, description: Description) {
        self.alerts.push(Alert::new(target, description));
    }

    /// Takes every queued alert.
    pub fn drain_alerts(&mut self) -> Vec<Alert> {
        std::mem::take(&mut self.alerts)
    }

    /// Destroys an entity.
    ///
    /// Its queue is removed with every entry canceled, and its active
    /// induction is discarded without being interrupted. Anything it held is
    /// left where it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn destroy_entity(&mut self, id: EntityId) -> Result<Vec<EntityId>> {
        let released = self.world.destroy(id)?;
        if let Some(active) = self.active.remove(&id) {
            active.entry.cancel();
        }
        self.scheduler.remove(&QueueKey::Entity(id));
        debug!(entity = %id, released = released.len(), "entity destroyed");
        Ok(released)
    }

    /// Advances game time by `increment` units, firing everything that comes
    /// due. Returns the number of events fired.
    pub fn tick(&mut self, increment: u64) -> usize {
        let target = self.scheduler.now().saturating_add(increment);
        let mut fired = 0;
        // Dispatch may create queues or schedule into ones already drained,
        // so sweep until a pass finds nothing due.
        loop {
            let before = fired;
            for key in self.scheduler.keys() {
                while let Some((due, event)) = self.scheduler.pop_due(&key, target) {
                    fired += 1;
                    self.dispatch(&key, due, event);
                }
            }
            if fired == before {
                break;
            }
        }
        self.scheduler.settle(target);
        fired
    }

    fn dispatch(&mut self, key: &QueueKey, due: u64, event: Event) {
        match event {
            Event::Completion { actor, ticket } => self.complete(actor, ticket, due),
            Event::Task(task) => {
                let name = task.name().to_string();
                let mut ctx =
                    Context::new(&mut self.world, &mut self.scheduler, due, &mut self.alerts);
                match task.run(&mut ctx) {
                    Ok(()) => debug!(queue = %key, task = %name, "task ran"),
                    Err(ExecutionError::Action(err)) => {
                        debug!(queue = %key, task = %name, reason = %err.description, "task declined");
                    }
                    Err(ExecutionError::Internal(err)) => {
                        error!(queue = %key, task = %name, error = %err, "task failed");
                    }
                }
            }
        }
    }

    fn complete(&mut self, actor: EntityId, ticket: u64, due: u64) {
        let Some(active) = self.active.get_mut(&actor) else {
            return;
        };
        if active.ticket != ticket {
            return;
        }

        let mut ctx = Context::new(&mut self.world, &mut self.scheduler, due, &mut self.alerts);
        let outcome = active.induction.complete(actor, &mut ctx);
        match outcome {
            Ok(description) => {
                self.alerts.push(Alert::new(actor, description));
                if active.repeat {
                    active.entry = self.scheduler.schedule_at(
                        QueueKey::Entity(actor),
                        due.saturating_add(active.duration),
                        Event::Completion { actor, ticket },
                    );
                    return;
                }
                debug!(actor = %actor, induction = active.induction.name(), "induction completed");
            }
            Err(ExecutionError::Action(err)) => {
                debug!(actor = %actor, induction = active.induction.name(), reason = %err.description, "induction failed");
                self.alerts.push(Alert::new(actor, err.description));
            }
            Err(ExecutionError::Internal(err)) => {
                error!(actor = %actor, induction = active.induction.name(), error = %err, "induction failed");
                self.alerts
                    .push(Alert::new(actor, Description::new("error.internal")));
            }
        }
        self.active.remove(&actor);
    }
}

impl Advance for Realm {
    fn advance(&mut self, increment: u64) -> usize {
        self.tick(increment)
    }
}
