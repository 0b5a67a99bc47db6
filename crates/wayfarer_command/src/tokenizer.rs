//! Input tokenization.
//!
//! Converts a raw command line into words and quoted strings.

/// A token from player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputToken {
    /// A lowercase word.
    Word(String),
    /// A quoted string, preserved as typed.
    Quoted(String),
}

impl InputToken {
    /// Returns the word, if this is a word.
    #[must_use]
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            Self::Quoted(_) => None,
        }
    }

    /// The token's text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Word(w) | Self::Quoted(w) => w,
        }
    }
}

/// Tokenizes player input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Tokenizes a raw input string.
    ///
    /// - Converts words to lowercase
    /// - Strips punctuation (except within quotes)
    /// - Keeps quoted strings as single tokens; an unterminated quote runs to
    ///   the end of the line
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<InputToken> {
        Self::tokenize_spans(input)
            .into_iter()
            .map(|(_, token)| token)
            .collect()
    }

    /// Tokenizes like [`tokenize`](Self::tokenize), pairing each token with
    /// the byte offset in `input` where it begins. A quoted string begins at
    /// its opening quote; a word at its first character, punctuation included.
    #[must_use]
    pub fn tokenize_spans(input: &str) -> Vec<(usize, InputToken)> {
        let mut tokens = Vec::new();
        let mut chars = input.char_indices();
        let mut word = Word::default();

        while let Some((at, ch)) = chars.next() {
            match ch {
                '"' => {
                    word.flush(&mut tokens);
                    let quoted: String = chars
                        .by_ref()
                        .map(|(_, c)| c)
                        .take_while(|&c| c != '"')
                        .collect();
                    tokens.push((at, InputToken::Quoted(quoted)));
                }
                c if c.is_whitespace() => word.flush(&mut tokens),
                '.' | ',' | '!' | '?' | ';' | ':' | '\'' => {
                    word.start.get_or_insert(at);
                }
                _ => {
                    word.start.get_or_insert(at);
                    word.text.push(ch);
                }
            }
        }

        word.flush(&mut tokens);
        tokens
    }
}

#[derive(Default)]
struct Word {
    start: Option<usize>,
    text: String,
}

impl Word {
    fn flush(&mut self, tokens: &mut Vec<(usize, InputToken)>) {
        let start = self.start.take();
        if self.text.is_empty() {
            return;
        }
        tokens.push((
            start.unwrap_or_default(),
            InputToken::Word(self.text.to_lowercase()),
        ));
        self.text.clear();
    }
}
