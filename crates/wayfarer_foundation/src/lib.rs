//! Core identifiers, values, and errors for Wayfarer.
//!
//! This crate provides:
//! - [`EntityId`] - Generational identifiers for everything in the world
//! - [`Value`] - A bound command argument
//! - [`ParamType`] - Declared parameter types and their assignability rules
//! - [`Description`] - A message key plus arguments, rendered through a [`NameStore`]
//! - [`NameStore`] - Canonical keys mapped to surface words and message templates
//! - [`Error`] / [`ActionError`] - Fatal/internal errors versus expected domain failures

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod description;
pub mod entity;
pub mod error;
pub mod names;
pub mod types;
pub mod value;

pub use description::{Description, DescriptionArg};
pub use entity::EntityId;
pub use error::{ActionError, Error, ErrorContext, ErrorKind, ExecutionError, Result};
pub use names::NameStore;
pub use types::{Effort, ParamType, Scope};
pub use value::Value;
