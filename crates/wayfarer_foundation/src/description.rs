//! Language-neutral messages.
//!
//! Actions never build user-facing text directly. They return a
//! [`Description`]: a message key and positional arguments that a
//! [`NameStore`](crate::NameStore) turns into text for the player.

use std::fmt;

/// One positional argument of a description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DescriptionArg {
    /// A canonical name key, rendered as the key's display form.
    Name(String),
    /// Literal text, rendered verbatim.
    Text(String),
    /// A number.
    Number(i64),
}

/// A message key with positional arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Description {
    /// Message key, looked up in the name store's templates.
    pub key: String,
    /// Arguments substituted for `{0}`, `{1}`, ... in the template.
    pub args: Vec<DescriptionArg>,
}

impl Description {
    /// Creates a description with no arguments.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    /// Appends a name-key argument.
    #[must_use]
    pub fn with_name(mut self, key: impl Into<String>) -> Self {
        self.args.push(DescriptionArg::Name(key.into()));
        self
    }

    /// Appends a literal text argument.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.args.push(DescriptionArg::Text(text.into()));
        self
    }

    /// Appends a numeric argument.
    #[must_use]
    pub fn with_number(mut self, n: i64) -> Self {
        self.args.push(DescriptionArg::Number(n));
        self
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                match arg {
                    DescriptionArg::Name(k) => write!(f, "{k}")?,
                    DescriptionArg::Text(t) => write!(f, "{t:?}")?,
                    DescriptionArg::Number(n) => write!(f, "{n}")?,
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}
