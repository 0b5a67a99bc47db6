//! Wayfarer - Multi-user text-adventure server
//!
//! This crate re-exports all layers of the Wayfarer system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: wayfarer_runtime    - Game loop, world worker, console, CLI
//! Layer 4: wayfarer_stdlib     - Standard actions and vocabulary
//! Layer 3: wayfarer_command    - Tokenizer, argument parsers, registry, executor
//! Layer 2: wayfarer_engine     - Event queues, inductions, world clock
//! Layer 1: wayfarer_world      - Entity store, things, world queries
//! Layer 0: wayfarer_foundation - Core types (EntityId, Value, Description, Error)
//! ```

pub use wayfarer_command as command;
pub use wayfarer_engine as engine;
pub use wayfarer_foundation as foundation;
pub use wayfarer_runtime as runtime;
pub use wayfarer_stdlib as stdlib;
pub use wayfarer_world as world;
