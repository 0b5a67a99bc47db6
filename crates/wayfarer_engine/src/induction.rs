//! Deferred work: inductions and scheduled tasks.
//!
//! An [`Induction`] is an action in progress over game time. It is started by
//! the executor when a handler's response carries one, and later either
//! completes (its description is delivered to the actor) or is interrupted.
//! A [`Task`] is a one-shot callback scheduled on any queue.

use std::fmt;

use wayfarer_foundation::{Description, EntityId, ExecutionError};
use wayfarer_world::World;

use crate::queue::Entry;
use crate::scheduler::{Event, QueueKey, Scheduler};

/// A description addressed to one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    /// Who receives it.
    pub target: EntityId,
    /// What they are told.
    pub description: Description,
}

impl Alert {
    /// Creates an alert.
    #[must_use]
    pub const fn new(target: EntityId, description: Description) -> Self {
        Self {
            target,
            description,
        }
    }
}

/// What deferred work may touch while it runs.
pub struct Context<'a> {
    /// The world.
    pub world: &'a mut World,
    /// The scheduler, for follow-up events.
    pub scheduler: &'a mut Scheduler,
    /// Game time at which the work fired.
    pub now: u64,
    alerts: &'a mut Vec<Alert>,
}

impl<'a> Context<'a> {
    /// Creates a context over the given state.
    pub fn new(
        world: &'a mut World,
        scheduler: &'a mut Scheduler,
        now: u64,
        alerts: &'a mut Vec<Alert>,
    ) -> Self {
        Self {
            world,
            scheduler,
            now,
            alerts,
        }
    }

    /// Queues a description for an entity.
    pub fn alert(&mut self, target: EntityId, description: Description) {
        self.alerts.push(Alert::new(target, description));
    }

    /// Schedules a task on an entity's queue, `delay` units after this
    /// context's time.
    pub fn schedule(&mut self, owner: EntityId, delay: u64, task: Box<dyn Task>) -> Entry {
        self.scheduler.schedule_at(
            QueueKey::Entity(owner),
            self.now.saturating_add(delay),
            Event::Task(task),
        )
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("now", &self.now)
            .field("alerts", &self.alerts.len())
            .finish_non_exhaustive()
    }
}

/// An action in progress.
pub trait Induction: Send {
    /// Short name for logs.
    fn name(&self) -> &str {
        "induction"
    }

    /// Finishes one round of the action.
    ///
    /// # Errors
    ///
    /// A domain failure ends the induction and is shown to the actor; an
    /// internal failure ends it and is logged.
    fn complete(&mut self, actor: EntityId, ctx: &mut Context<'_>) -> Result<Description, ExecutionError>;

    /// Cleans up when the actor stops before completion.
    fn interrupt(&mut self, actor: EntityId, ctx: &mut Context<'_>) {
        let _ = (actor, ctx);
    }
}

/// A one-shot scheduled callback.
pub trait Task: Send {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Runs the task.
    ///
    /// # Errors
    ///
    /// Failures are logged; they never reach a player directly.
    fn run(self: Box<Self>, ctx: &mut Context<'_>) -> Result<(), ExecutionError>;
}

struct FnTask<F> {
    name: &'static str,
    run: F,
}

impl<F> Task for FnTask<F>
where
    F: FnOnce(&mut Context<'_>) -> Result<(), ExecutionError> + Send,
{
    fn name(&self) -> &str {
        self.name
    }

    fn run(self: Box<Self>, ctx: &mut Context<'_>) -> Result<(), ExecutionError> {
        (self.run)(ctx)
    }
}

/// Wraps a closure as a task.
pub fn task<F>(name: &'static str, run: F) -> Box<dyn Task>
where
    F: FnOnce(&mut Context<'_>) -> Result<(), ExecutionError> + Send + 'static,
{
    Box::new(FnTask { name, run })
}
