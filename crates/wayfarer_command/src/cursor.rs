//! A restartable position over a tokenized command line.
//!
//! Argument parsers read from a [`Cursor`]. A parser that fails must leave the
//! cursor where it found it; [`Cursor::mark`] and [`Cursor::rewind`] let the
//! caller enforce that so another parser can retry from the same place.

use crate::tokenizer::{InputToken, InputTokenizer};

/// Read position over a token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    tokens: Vec<InputToken>,
    pos: usize,
    /// The line as typed, with each token's byte offset into it. Empty when
    /// the cursor was built from bare tokens.
    line: String,
    starts: Vec<usize>,
}

/// A saved cursor position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark(usize);

impl Cursor {
    /// Creates a cursor at the start of `tokens`.
    #[must_use]
    pub const fn new(tokens: Vec<InputToken>) -> Self {
        Self {
            tokens,
            pos: 0,
            line: String::new(),
            starts: Vec::new(),
        }
    }

    /// Tokenizes a line and positions a cursor at its start.
    #[must_use]
    pub fn from_line(line: &str) -> Self {
        let (starts, tokens) = InputTokenizer::tokenize_spans(line).into_iter().unzip();
        Self {
            tokens,
            pos: 0,
            line: line.to_string(),
            starts,
        }
    }

    /// Saves the current position.
    #[must_use]
    pub const fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    /// Returns to a saved position.
    pub fn rewind(&mut self, mark: Mark) {
        self.pos = mark.0.min(self.tokens.len());
    }

    /// Number of tokens consumed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns true if every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&InputToken> {
        self.tokens.get(self.pos)
    }

    /// Unconsumed tokens.
    #[must_use]
    pub fn remaining(&self) -> &[InputToken] {
        self.tokens.get(self.pos..).unwrap_or_default()
    }

    /// The run of plain words ahead, stopping at the first quoted string.
    #[must_use]
    pub fn words(&self) -> Vec<&str> {
        self.remaining()
            .iter()
            .map_while(InputToken::as_word)
            .collect()
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Option<&InputToken> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Consumes `n` tokens.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.tokens.len());
    }

    /// Consumes the rest of the line and returns it as typed, case and
    /// punctuation intact. A lone quoted string is returned without its
    /// quotes. Without the original line, token texts are joined by spaces.
    pub fn take_rest(&mut self) -> String {
        let text = match (self.remaining(), self.starts.get(self.pos)) {
            ([InputToken::Quoted(text)], _) => text.clone(),
            (_, Some(&start)) => self.line.get(start..).unwrap_or_default().trim().to_string(),
            (_, None) => self.rest_text(),
        };
        self.pos = self.tokens.len();
        text
    }

    /// The unconsumed text, for diagnostics.
    #[must_use]
    pub fn rest_text(&self) -> String {
        self.remaining()
            .iter()
            .map(InputToken::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
