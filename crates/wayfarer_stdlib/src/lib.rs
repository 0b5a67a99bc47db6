//! Standard content for Wayfarer.
//!
//! This crate provides:
//! - [`register_standard`] - The standard actions: look, inventory, take,
//!   drop, give, go, hide, say, wait, dig, bandage, attack, search, and trade
//! - [`standard_names`] - Verbs, directions, effort words, and message templates
//! - [`standard_parser`] - A command parser over the standard actions
//! - [`demo`] - A small starter world

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actions;
pub mod demo;
pub mod names;

pub use actions::{
    DigInduction, SearchInduction, WaitInduction, register_standard, standard_actions,
};
pub use names::standard_names;

use wayfarer_command::{ActionRegistry, ArgumentParserGroup, CommandParser};
use wayfarer_foundation::Result;

/// Builds a command parser over the standard actions and argument parsers.
///
/// # Errors
///
/// Returns an error if the standard declarations are inconsistent.
pub fn standard_parser() -> Result<CommandParser> {
    let mut registry = ActionRegistry::new();
    register_standard(&mut registry)?;
    CommandParser::new(registry, ArgumentParserGroup::standard())
}
