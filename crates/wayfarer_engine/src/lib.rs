//! Deferred execution for Wayfarer.
//!
//! This crate provides:
//! - [`EventQueue`] / [`Entry`] - Time-ordered, cancelable scheduled events
//! - [`Scheduler`] - Named and per-entity queues driven by one time source
//! - [`Induction`] - An action in progress, completed or interrupted later
//! - [`Realm`] - World, scheduler, and inductions advanced together
//! - [`WorldClock`] - Fixed-period tick loop with time scaling

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod induction;
pub mod queue;
pub mod realm;
pub mod scheduler;

pub use clock::{Advance, ClockConfig, WorldClock};
pub use induction::{Alert, Context, Induction, Task, task};
pub use queue::{Entry, EventQueue};
pub use realm::Realm;
pub use scheduler::{Event, QueueKey, Scheduler};
