//! Integration tests for Layer 3: Command
//!
//! Tests for registration, parsing, and execution across the command layer.

mod execution;
mod parsing;
mod registration;
