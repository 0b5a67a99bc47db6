//! Error types for Wayfarer.
//!
//! Two families are kept apart:
//! - [`Error`]: configuration mistakes and internal faults. Registration
//!   errors are fatal at startup; internal faults abort one command.
//! - [`ActionError`]: expected domain failures ("it is too dark", "you have
//!   no shovel"). They carry a [`Description`] for the player and never
//!   indicate a bug.

use std::fmt;

use thiserror::Error;

use crate::description::Description;
use crate::entity::EntityId;

/// Result alias for fallible Wayfarer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for configuration and internal failures.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a calling-convention error for a handler slot.
    #[must_use]
    pub fn calling_convention(
        handler: impl Into<String>,
        slot: usize,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::CallingConvention {
            handler: handler.into(),
            slot,
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates a missing-parser error for a parameter type.
    #[must_use]
    pub fn no_parser(param_type: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoParser(param_type.into()))
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true for errors that must stop the server from starting.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::CallingConvention { .. }
                | ErrorKind::NoParser(_)
                | ErrorKind::DuplicateAction(_)
                | ErrorKind::Config(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A handler's declared slots break the calling convention.
    #[error("handler `{handler}` slot {slot}: expected {expected}, found {actual}")]
    CallingConvention {
        /// The handler that was being registered.
        handler: String,
        /// Zero-based slot index.
        slot: usize,
        /// What the convention requires at this position.
        expected: String,
        /// What the handler declared.
        actual: String,
    },

    /// A parameter type has no argument parser that produces it.
    #[error("no argument parser produces parameters of type {0}")]
    NoParser(String),

    /// Two actions were registered under the same name.
    #[error("action `{0}` is already registered")]
    DuplicateAction(String),

    /// Entity was not found in the world.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// An induction was started while another one is active.
    #[error("entity {0} already has an active induction")]
    InductionActive(EntityId),

    /// An induction was interrupted while none is active.
    #[error("entity {0} has no active induction")]
    InductionIdle(EntityId),

    /// A command's arguments do not fit its action.
    #[error("command for `{action}` is malformed: {message}")]
    MalformedCommand {
        /// The action name.
        action: String,
        /// What is wrong.
        message: String,
    },

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The action or component involved.
    pub source: Option<String>,
    /// The actor involved, if any.
    pub actor: Option<EntityId>,
    /// Call frames, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the actor.
    #[must_use]
    pub fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
        }
        if let Some(actor) = self.actor {
            write!(f, " (actor {actor})")?;
        }
        for frame in &self.stack {
            write!(f, "\n  at {frame}")?;
        }
        Ok(())
    }
}

/// An expected domain failure, reported to the player.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("action failed: {description}")]
pub struct ActionError {
    /// What to tell the player.
    pub description: Description,
}

impl ActionError {
    /// Creates a failure with a bare message key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            description: Description::new(key),
        }
    }

    /// Wraps an existing description.
    #[must_use]
    pub const fn with_description(description: Description) -> Self {
        Self { description }
    }
}

impl From<Description> for ActionError {
    fn from(description: Description) -> Self {
        Self { description }
    }
}

/// Failure of an action handler, an induction completion, or a scheduled task.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// An expected domain failure; shown to the player.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// A bug or inconsistent state; logged, with a generic failure shown.
    #[error(transparent)]
    Internal(#[from] Error),
}

impl ExecutionError {
    /// Creates a domain failure with a bare message key.
    #[must_use]
    pub fn action(key: impl Into<String>) -> Self {
        Self::Action(ActionError::new(key))
    }
}

impl From<Description> for ExecutionError {
    fn from(description: Description) -> Self {
        Self::Action(ActionError::from(description))
    }
}
