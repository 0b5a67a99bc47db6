//! Cross-layer integration tests for Wayfarer
//!
//! Tests that drive the full pipeline: vocabulary, parser, executor,
//! scheduler, and the world worker.

mod playthrough;
mod server;
mod take;
