//! Parameter type descriptors.
//!
//! An action declares the type of each free parameter. Argument parsers
//! declare which types they can produce, and a bound [`Value`] must be
//! assignable to its declared type.

use std::fmt;

use crate::value::Value;

/// Where a thing-typed parameter looks for candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Perceivable contents of the actor's location plus the actor's possessions.
    Nearby,
    /// Goods held by a merchant in the actor's location.
    Stock,
}

/// Declared type of a free parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// A thing in the world, optionally restricted to a category.
    Thing {
        /// Candidate source.
        scope: Scope,
        /// Required category tag, if any.
        category: Option<String>,
    },
    /// Free text. Greedy text takes the rest of the line; otherwise a single
    /// quoted string.
    Text {
        /// Whether the parameter consumes every remaining word.
        greedy: bool,
    },
    /// An integer.
    Number,
    /// A member of an enumerated token set (directions, for example).
    Token {
        /// Name of the set in the name store.
        set: String,
    },
    /// A fixed keyword such as "to" or "with".
    Literal {
        /// Canonical key of the keyword.
        key: String,
    },
}

impl ParamType {
    /// A nearby thing of any category.
    #[must_use]
    pub const fn thing() -> Self {
        Self::Thing {
            scope: Scope::Nearby,
            category: None,
        }
    }

    /// A nearby thing of the given category.
    #[must_use]
    pub fn thing_of(category: &str) -> Self {
        Self::Thing {
            scope: Scope::Nearby,
            category: Some(category.to_string()),
        }
    }

    /// A thing from a merchant's stock.
    #[must_use]
    pub const fn stock() -> Self {
        Self::Thing {
            scope: Scope::Stock,
            category: None,
        }
    }

    /// A member of an enumerated token set.
    #[must_use]
    pub fn token(set: &str) -> Self {
        Self::Token {
            set: set.to_string(),
        }
    }

    /// A fixed keyword.
    #[must_use]
    pub fn literal(key: &str) -> Self {
        Self::Literal {
            key: key.to_string(),
        }
    }

    /// Checks that a value's runtime class is assignable to this type.
    ///
    /// This is structural only; world-dependent restrictions such as the
    /// category of a thing are checked by the command itself.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Thing { .. }, Value::Entity(_))
            | (Self::Text { .. }, Value::Text(_))
            | (Self::Number, Value::Number(_))
            | (Self::Token { .. }, Value::Token(_)) => true,
            (Self::Literal { key }, Value::Token(k)) => key == k,
            _ => false,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thing { scope, category } => {
                let scope = match scope {
                    Scope::Nearby => "thing",
                    Scope::Stock => "stock",
                };
                match category {
                    Some(c) => write!(f, "{scope}<{c}>"),
                    None => write!(f, "{scope}"),
                }
            }
            Self::Text { greedy: true } => write!(f, "text..."),
            Self::Text { greedy: false } => write!(f, "text"),
            Self::Number => write!(f, "number"),
            Self::Token { set } => write!(f, "token<{set}>"),
            Self::Literal { key } => write!(f, "literal<{key}>"),
        }
    }
}

/// How hard the actor pushes an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Effort {
    /// Careful and slow.
    Slow,
    /// The default pace.
    #[default]
    Normal,
    /// Hurried.
    Fast,
}

impl Effort {
    /// All efforts with their name-store keys.
    pub const KEYS: [(Effort, &'static str); 3] = [
        (Effort::Slow, "effort.slow"),
        (Effort::Normal, "effort.normal"),
        (Effort::Fast, "effort.fast"),
    ];

    /// The effort's name-store key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Slow => "effort.slow",
            Self::Normal => "effort.normal",
            Self::Fast => "effort.fast",
        }
    }

    /// Scales a game-time duration: slow doubles it, fast halves it.
    #[must_use]
    pub const fn scale(self, duration: u64) -> u64 {
        match self {
            Self::Slow => duration.saturating_mul(2),
            Self::Normal => duration,
            Self::Fast => duration.div_ceil(2),
        }
    }
}
