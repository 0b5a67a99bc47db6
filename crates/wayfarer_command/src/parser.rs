//! Command-line parsing.
//!
//! The [`CommandParser`] matches the longest verb phrase at the start of the
//! line, then tries each action answering to that verb in priority order.
//! A candidate binds when every free parameter, an optional trailing effort,
//! and nothing else remain on the line. The first candidate that binds wins;
//! otherwise the failures of all candidates are merged into one.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use wayfarer_foundation::{Description, Effort, Error, Result, Value};

use crate::argument::{ArgumentParserGroup, ParseContext};
use crate::command::Command;
use crate::cursor::Cursor;
use crate::registry::{ActionDescriptor, ActionRegistry};

// =============================================================================
// Results
// =============================================================================

/// Why a line failed to parse.
///
/// Ordered so that the more useful diagnostic compares greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureReason {
    /// No action recognised the verb.
    Syntax,
    /// An action recognised the verb but rejected the arguments.
    Mismatch,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Mismatch => write!(f, "mismatch"),
        }
    }
}

/// How specific a failure detail is. Higher wins when merging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Specificity {
    Verb,
    Binding,
    Malformed,
}

/// A failed parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseFailure {
    /// Failure class.
    pub reason: FailureReason,
    /// What to tell the player.
    pub detail: Description,
    specificity: Specificity,
}

impl ParseFailure {
    fn syntax(detail: Description) -> Self {
        Self {
            reason: FailureReason::Syntax,
            detail,
            specificity: Specificity::Verb,
        }
    }

    fn mismatch(detail: Description, specificity: Specificity) -> Self {
        Self {
            reason: FailureReason::Mismatch,
            detail,
            specificity,
        }
    }

    /// Combines two failures: the stronger reason and the more specific
    /// detail. Ties keep `self`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let reason = self.reason.max(other.reason);
        let (detail, specificity) = match other.specificity.cmp(&self.specificity) {
            Ordering::Greater => (other.detail, other.specificity),
            _ => (self.detail, self.specificity),
        };
        Self {
            reason,
            detail,
            specificity,
        }
    }
}

/// Outcome of parsing one line.
#[derive(Clone, Debug)]
pub enum ParserResult {
    /// A fully bound command.
    Success(Command),
    /// Nothing bound.
    Failure(ParseFailure),
}

impl ParserResult {
    /// Returns the command, if the parse succeeded.
    #[must_use]
    pub fn command(self) -> Option<Command> {
        match self {
            Self::Success(command) => Some(command),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure reason, if the parse failed.
    #[must_use]
    pub const fn reason(&self) -> Option<FailureReason> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure.reason),
        }
    }
}

// =============================================================================
// CommandParser
// =============================================================================

/// Binds command lines to registered actions.
#[derive(Debug)]
pub struct CommandParser {
    registry: ActionRegistry,
    group: ArgumentParserGroup,
}

impl CommandParser {
    /// Creates a parser over a registry and a parser group.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if any registered action declares a parameter
    /// type that no parser in the group produces.
    pub fn new(registry: ActionRegistry, group: ArgumentParserGroup) -> Result<Self> {
        for action in registry.iter() {
            if let Some(parameter) = action.parameters.iter().find(|p| !group.supports(&p.ty)) {
                return Err(Error::no_parser(parameter.ty.to_string()));
            }
        }
        Ok(Self { registry, group })
    }

    /// The registered actions.
    #[must_use]
    pub const fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// The argument parsers.
    #[must_use]
    pub const fn group(&self) -> &ArgumentParserGroup {
        &self.group
    }

    /// Parses a command line for `ctx.actor`.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if a parameter type has no parser. Unparseable
    /// input is a [`ParserResult::Failure`], not an error.
    pub fn parse(&self, line: &str, ctx: &ParseContext<'_>) -> Result<ParserResult> {
        let mut cursor = Cursor::from_line(line);
        if cursor.is_at_end() {
            return Ok(ParserResult::Failure(ParseFailure::syntax(Description::new(
                "parse.empty",
            ))));
        }

        let Some((length, candidates)) = self.match_verb(&cursor, ctx) else {
            let verb = cursor.words().first().copied().unwrap_or_default().to_string();
            return Ok(ParserResult::Failure(ParseFailure::syntax(
                Description::new("parse.unknown_verb").with_text(verb),
            )));
        };
        cursor.advance(length);
        let start = cursor.mark();

        let mut failure: Option<ParseFailure> = None;
        for action in &candidates {
            cursor.rewind(start);
            match self.bind(action, &mut cursor, ctx)? {
                Ok(command) => return Ok(ParserResult::Success(command)),
                Err(next) => {
                    failure = Some(match failure {
                        Some(prev) => prev.merge(next),
                        None => next,
                    });
                }
            }
        }
        let failure = failure.unwrap_or_else(|| {
            ParseFailure::mismatch(Description::new("parse.no_match"), Specificity::Verb)
        });
        Ok(ParserResult::Failure(failure))
    }

    /// Finds the longest verb phrase and the actions answering to it.
    fn match_verb(
        &self,
        cursor: &Cursor,
        ctx: &ParseContext<'_>,
    ) -> Option<(usize, Vec<Arc<ActionDescriptor>>)> {
        let words = cursor.words();
        let limit = words.len().min(ctx.names.max_phrase_words().max(1));
        (1..=limit).rev().find_map(|n| {
            let phrase = words[..n].join(" ");
            let mut keys: Vec<&str> = ctx
                .names
                .keys_for(&phrase)
                .iter()
                .map(String::as_str)
                .filter(|key| self.registry.has_verb(key))
                .collect();
            if keys.is_empty() && ctx.names.forms(&phrase).is_empty() && self.registry.has_verb(&phrase)
            {
                keys.push(phrase.as_str());
            }
            if keys.is_empty() {
                return None;
            }
            let mut candidates: Vec<Arc<ActionDescriptor>> = keys
                .iter()
                .flat_map(|key| self.registry.candidates(key))
                .collect();
            candidates.sort_by_key(|action| action.priority);
            Some((n, candidates))
        })
    }

    /// Tries to bind one candidate at the cursor.
    ///
    /// The outer result carries configuration errors; the inner one the
    /// candidate's parse failure.
    fn bind(
        &self,
        action: &Arc<ActionDescriptor>,
        cursor: &mut Cursor,
        ctx: &ParseContext<'_>,
    ) -> Result<std::result::Result<Command, ParseFailure>> {
        let mut values: Vec<Value> = Vec::with_capacity(action.parameters.len());
        for parameter in &action.parameters {
            if !self.group.supports(&parameter.ty) {
                return Err(Error::no_parser(parameter.ty.to_string()));
            }
            match self.group.parse(&parameter.ty, cursor, ctx) {
                Ok(Some(value)) => values.push(value),
                Ok(None) => {
                    let detail = if cursor.is_at_end() {
                        Description::new("parse.missing").with_text(parameter.name.clone())
                    } else {
                        Description::new("parse.no_match").with_text(cursor.rest_text())
                    };
                    return Ok(Err(ParseFailure::mismatch(detail, Specificity::Binding)));
                }
                Err(malformed) => {
                    return Ok(Err(ParseFailure::mismatch(
                        malformed.detail,
                        Specificity::Malformed,
                    )));
                }
            }
        }

        let mut effort = Effort::Normal;
        if action.effort_required {
            let words = cursor.words();
            // Longest phrase wins; ties go to the first effort listed.
            let found = Effort::KEYS
                .iter()
                .filter_map(|(candidate, key)| {
                    ctx.names
                        .longest_match(key, &words)
                        .map(|length| (*candidate, length))
                })
                .rev()
                .max_by_key(|&(_, length)| length);
            if let Some((candidate, length)) = found {
                effort = candidate;
                cursor.advance(length);
            }
        }

        if !cursor.is_at_end() {
            return Ok(Err(ParseFailure::mismatch(
                Description::new("parse.extra").with_text(cursor.rest_text()),
                Specificity::Binding,
            )));
        }

        Ok(Ok(Command::new(ctx.actor, Arc::clone(action), values, effort)))
    }
}
