//! Integration tests for Layer 1: World
//!
//! Tests for the entity store, containment, and world queries.

mod containment;
mod queries;
