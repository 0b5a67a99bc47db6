//! Bound argument values.

use std::fmt;

use crate::entity::EntityId;

/// A value bound to a command parameter.
///
/// Values are produced by argument parsers and handed to action handlers in
/// calling-convention order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    /// A thing in the world.
    Entity(EntityId),
    /// Free text.
    Text(String),
    /// An integer.
    Number(i64),
    /// A canonical key from an enumerated set or a literal keyword.
    Token(String),
}

impl Value {
    /// Returns the entity, if this is an entity value.
    #[must_use]
    pub const fn as_entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric value.
    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the token key, if this is a token value.
    #[must_use]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Self::Token(k) => Some(k),
            _ => None,
        }
    }

    /// Short name of the value's runtime class, for diagnostics.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Entity(_) => "thing",
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Token(_) => "token",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(id) => write!(f, "{id}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Token(k) => write!(f, ":{k}"),
        }
    }
}
