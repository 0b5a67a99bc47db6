//! Entity storage and world state for Wayfarer.
//!
//! This crate provides:
//! - [`EntityStore`] - Generational entity allocation
//! - [`Thing`] - The record describing a room, actor, or item
//! - [`World`] - Things, their locations, and a deterministic random source

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod store;
pub mod thing;
pub mod world;

pub use store::EntityStore;
pub use thing::{Meter, Stance, Thing, ThingKind};
pub use world::World;
