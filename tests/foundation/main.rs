//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: names and rendering, errors, parameter types.

mod errors;
mod names;
mod types;
