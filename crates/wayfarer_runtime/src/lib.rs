//! Game loop, world worker, console, and CLI for Wayfarer.
//!
//! This crate provides:
//! - [`Game`] - parse, execute, and schedule for each command line
//! - [`Server`] - the single world worker and its [`Client`] connections
//! - [`Console`] - interactive play from a terminal
//! - [`ServerConfig`] - configuration from defaults, environment, and flags

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod console;
pub mod editor;
pub mod game;
pub mod server;

pub use config::{CliOptions, ServerConfig};
pub use console::Console;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use game::Game;
pub use server::{Client, Server};
