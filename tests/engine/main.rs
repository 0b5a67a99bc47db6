//! Integration tests for Layer 2: Engine
//!
//! Tests for event queues, inductions, and the world clock.

mod clock;
mod inductions;
mod queues;
