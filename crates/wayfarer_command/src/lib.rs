//! Command pipeline for Wayfarer.
//!
//! This crate provides:
//! - [`InputTokenizer`] / [`Cursor`] - Tokenized input with restartable positions
//! - [`ArgumentParser`] / [`ArgumentParserGroup`] - Typed argument parsers in ordered sources
//! - [`ActionRegistry`] / [`ActionSpec`] - Validated action declarations
//! - [`CommandParser`] - Binds a command line to an action
//! - [`CommandExecutor`] - Runs a [`Command`] with its preconditions and side effects

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod argument;
pub mod command;
pub mod cursor;
pub mod executor;
pub mod parser;
pub mod registry;
pub mod tokenizer;

pub use argument::{
    ArgumentParser, ArgumentParserGroup, EnumArgumentParser, LiteralArgumentParser, Malformed,
    NumericArgumentParser, ParseContext, ParseOutcome, StringArgumentParser, ThingArgumentParser,
};
pub use command::Command;
pub use cursor::{Cursor, Mark};
pub use executor::{CommandExecutor, PendingInduction, PowerTransaction, Response, Transaction};
pub use parser::{CommandParser, FailureReason, ParseFailure, ParserResult};
pub use registry::{
    ActionContext, ActionDescriptor, ActionRegistry, ActionSpec, Argument, Arguments, Handler,
    Parameter, RequiredDescriptor, Slot,
};
pub use tokenizer::{InputToken, InputTokenizer};
