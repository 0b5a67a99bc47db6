//! Argument parsers.
//!
//! An [`ArgumentParser`] turns words at the cursor into a [`Value`] of some
//! [`ParamType`]. It answers one of three ways:
//!
//! - `Ok(Some(value))`: matched, cursor moved past the consumed words
//! - `Ok(None)`: no match
//! - `Err(Malformed)`: the words are there but name the wrong kind of thing
//!
//! Parsers are collected in an [`ArgumentParserGroup`] made of ordered
//! sources. For a parameter type the group tries every parser that declares
//! it, source by source, and the first match wins. Whatever a failed parser
//! did to the cursor is undone before the next one runs.

use std::fmt;
use std::sync::Arc;

use wayfarer_foundation::{Description, EntityId, NameStore, ParamType, Scope, Value};
use wayfarer_world::World;

use crate::cursor::Cursor;
use crate::tokenizer::InputToken;

/// Input that is present but cannot be used for the parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Malformed {
    /// What to tell the player.
    pub detail: Description,
}

impl Malformed {
    /// Creates a malformed-input signal.
    #[must_use]
    pub const fn new(detail: Description) -> Self {
        Self { detail }
    }
}

/// Outcome of one parse attempt.
pub type ParseOutcome = Result<Option<Value>, Malformed>;

/// Everything a parser may look at.
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    /// Who typed the command.
    pub actor: EntityId,
    /// The world, read-only.
    pub world: &'a World,
    /// Surface forms for every key.
    pub names: &'a NameStore,
}

impl fmt::Debug for ParseContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("actor", &self.actor)
            .finish_non_exhaustive()
    }
}

/// Converts words into a typed value.
pub trait ArgumentParser: Send + Sync {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    /// Returns whether this parser can produce values of `ty`.
    fn produces(&self, ty: &ParamType) -> bool;

    /// Tries to read a value of `ty` at the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Malformed`] when the input names something of the wrong
    /// kind.
    fn parse(&self, ty: &ParamType, cursor: &mut Cursor, ctx: &ParseContext<'_>) -> ParseOutcome;
}

// =============================================================================
// Leaf parsers
// =============================================================================

/// Matches a fixed keyword such as "to" or "with".
#[derive(Clone, Copy, Debug, Default)]
pub struct LiteralArgumentParser;

impl ArgumentParser for LiteralArgumentParser {
    fn name(&self) -> &str {
        "literal"
    }

    fn produces(&self, ty: &ParamType) -> bool {
        matches!(ty, ParamType::Literal { .. })
    }

    fn parse(&self, ty: &ParamType, cursor: &mut Cursor, ctx: &ParseContext<'_>) -> ParseOutcome {
        let ParamType::Literal { key } = ty else {
            return Ok(None);
        };
        let Some(n) = ctx.names.longest_match(key, &cursor.words()) else {
            return Ok(None);
        };
        cursor.advance(n);
        Ok(Some(Value::Token(key.clone())))
    }
}

/// Matches a member of an enumerated token set, such as a direction.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumArgumentParser;

impl ArgumentParser for EnumArgumentParser {
    fn name(&self) -> &str {
        "enum"
    }

    fn produces(&self, ty: &ParamType) -> bool {
        matches!(ty, ParamType::Token { .. })
    }

    fn parse(&self, ty: &ParamType, cursor: &mut Cursor, ctx: &ParseContext<'_>) -> ParseOutcome {
        let ParamType::Token { set } = ty else {
            return Ok(None);
        };
        let words = cursor.words();
        let best = ctx
            .names
            .members(set)
            .iter()
            .filter_map(|key| ctx.names.longest_match(key, &words).map(|n| (n, key)))
            .fold(None, |best: Option<(usize, &String)>, (n, key)| match best {
                Some((m, _)) if m >= n => best,
                _ => Some((n, key)),
            });
        let Some((n, key)) = best else {
            return Ok(None);
        };
        let value = Value::Token(key.clone());
        cursor.advance(n);
        Ok(Some(value))
    }
}

/// Matches an integer.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumericArgumentParser;

impl ArgumentParser for NumericArgumentParser {
    fn name(&self) -> &str {
        "numeric"
    }

    fn produces(&self, ty: &ParamType) -> bool {
        matches!(ty, ParamType::Number)
    }

    fn parse(&self, _: &ParamType, cursor: &mut Cursor, _: &ParseContext<'_>) -> ParseOutcome {
        let Some(word) = cursor.peek().and_then(InputToken::as_word) else {
            return Ok(None);
        };
        let digits = word.strip_prefix('-').unwrap_or(word);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(None);
        }
        let n = word.parse::<i64>().map_err(|_| {
            Malformed::new(Description::new("parse.number_range").with_text(word))
        })?;
        cursor.advance(1);
        Ok(Some(Value::Number(n)))
    }
}

/// Matches free text: a quoted string, or for greedy parameters the rest of
/// the line.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringArgumentParser;

impl ArgumentParser for StringArgumentParser {
    fn name(&self) -> &str {
        "string"
    }

    fn produces(&self, ty: &ParamType) -> bool {
        matches!(ty, ParamType::Text { .. })
    }

    fn parse(&self, ty: &ParamType, cursor: &mut Cursor, _: &ParseContext<'_>) -> ParseOutcome {
        let ParamType::Text { greedy } = ty else {
            return Ok(None);
        };
        if *greedy {
            if cursor.is_at_end() {
                return Ok(None);
            }
            return Ok(Some(Value::Text(cursor.take_rest())));
        }
        match cursor.peek() {
            Some(InputToken::Quoted(text)) => {
                let value = Value::Text(text.clone());
                cursor.advance(1);
                Ok(Some(value))
            }
            _ => Ok(None),
        }
    }
}

// =============================================================================
// Thing parser
// =============================================================================

/// Matches a thing by name among the candidates a scope provides.
///
/// The longest name match wins. Among equally long matches, one that
/// satisfies the parameter's category wins; if every match fails the
/// category, the input is malformed.
#[derive(Clone, Copy, Debug)]
pub struct ThingArgumentParser {
    scope: Scope,
}

impl ThingArgumentParser {
    /// Parser for things perceivable by the actor.
    #[must_use]
    pub const fn nearby() -> Self {
        Self {
            scope: Scope::Nearby,
        }
    }

    /// Parser for goods offered by merchants near the actor.
    #[must_use]
    pub const fn stock() -> Self {
        Self {
            scope: Scope::Stock,
        }
    }

    fn candidates(&self, ctx: &ParseContext<'_>) -> Vec<EntityId> {
        match self.scope {
            Scope::Nearby => ctx.world.perceivable_by(ctx.actor),
            Scope::Stock => ctx.world.stock_near(ctx.actor),
        }
    }
}

impl ArgumentParser for ThingArgumentParser {
    fn name(&self) -> &str {
        match self.scope {
            Scope::Nearby => "nearby",
            Scope::Stock => "stock",
        }
    }

    fn produces(&self, ty: &ParamType) -> bool {
        matches!(ty, ParamType::Thing { scope, .. } if *scope == self.scope)
    }

    fn parse(&self, ty: &ParamType, cursor: &mut Cursor, ctx: &ParseContext<'_>) -> ParseOutcome {
        let ParamType::Thing { category, .. } = ty else {
            return Ok(None);
        };
        let words = cursor.words();
        if words.is_empty() {
            return Ok(None);
        }

        let mut best_len = 0;
        let mut fitting = None;
        let mut wrong_kind = None;
        for id in self.candidates(ctx) {
            let Ok(thing) = ctx.world.get(id) else {
                continue;
            };
            let Some(n) = ctx.names.longest_match(&thing.name, &words) else {
                continue;
            };
            if n < best_len {
                continue;
            }
            if n > best_len {
                best_len = n;
                fitting = None;
                wrong_kind = None;
            }
            let fits = category.as_deref().is_none_or(|c| thing.is(c));
            if fits && fitting.is_none() {
                fitting = Some(id);
            } else if !fits && wrong_kind.is_none() {
                wrong_kind = Some(thing.name.clone());
            }
        }

        if let Some(id) = fitting {
            cursor.advance(best_len);
            return Ok(Some(Value::Entity(id)));
        }
        match wrong_kind {
            Some(name) => Err(Malformed::new(
                Description::new("parse.wrong_kind").with_name(name),
            )),
            None => Ok(None),
        }
    }
}

// =============================================================================
// Group
// =============================================================================

struct Source {
    name: String,
    parsers: Vec<Arc<dyn ArgumentParser>>,
}

/// Ordered sources of argument parsers.
#[derive(Default)]
pub struct ArgumentParserGroup {
    sources: Vec<Source>,
}

impl fmt::Debug for ArgumentParserGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for source in &self.sources {
            let names: Vec<&str> = source.parsers.iter().map(|p| p.name()).collect();
            list.entry(&(source.name.as_str(), names));
        }
        list.finish()
    }
}

impl ArgumentParserGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard group: scoped thing parsers first, then the leaf parsers.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_source(
                "context",
                vec![
                    Arc::new(ThingArgumentParser::nearby()),
                    Arc::new(ThingArgumentParser::stock()),
                ],
            )
            .with_source(
                "global",
                vec![
                    Arc::new(LiteralArgumentParser),
                    Arc::new(EnumArgumentParser),
                    Arc::new(NumericArgumentParser),
                    Arc::new(StringArgumentParser),
                ],
            )
    }

    /// Appends a source. Sources registered earlier are tried first.
    #[must_use]
    pub fn with_source(mut self, name: &str, parsers: Vec<Arc<dyn ArgumentParser>>) -> Self {
        self.add_source(name, parsers);
        self
    }

    /// Appends a source.
    pub fn add_source(&mut self, name: &str, parsers: Vec<Arc<dyn ArgumentParser>>) {
        self.sources.push(Source {
            name: name.to_string(),
            parsers,
        });
    }

    /// Every parser that produces `ty`, in trial order.
    pub fn parsers_for<'a>(
        &'a self,
        ty: &'a ParamType,
    ) -> impl Iterator<Item = &'a dyn ArgumentParser> + 'a {
        self.sources
            .iter()
            .flat_map(|source| source.parsers.iter())
            .map(AsRef::as_ref)
            .filter(move |parser| parser.produces(ty))
    }

    /// Returns whether any parser produces `ty`.
    #[must_use]
    pub fn supports(&self, ty: &ParamType) -> bool {
        self.parsers_for(ty).next().is_some()
    }

    /// Tries each parser for `ty` in order; the first match wins.
    ///
    /// The cursor is only moved by a successful parser. If none matches, the
    /// first malformed signal is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Malformed`] if no parser matched and one reported malformed
    /// input.
    pub fn parse(&self, ty: &ParamType, cursor: &mut Cursor, ctx: &ParseContext<'_>) -> ParseOutcome {
        let mark = cursor.mark();
        let mut malformed = None;
        for parser in self.parsers_for(ty) {
            match parser.parse(ty, cursor, ctx) {
                Ok(Some(value)) => return Ok(Some(value)),
                Ok(None) => cursor.rewind(mark),
                Err(signal) => {
                    cursor.rewind(mark);
                    malformed.get_or_insert(signal);
                }
            }
        }
        malformed.map_or(Ok(None), Err)
    }
}
