//! Regex-driven lexical analysis for the Eightebed compiler.
//!
//! This module provides the [`Lexer`], a pattern-table tokenizer: it is
//! configured with *ignore* patterns (matched and discarded, retried
//! repeatedly before each token) and *token* patterns (optionally tagged).
//! On each step the ignore patterns fire until none matches, then the token
//! patterns are tried in registration order; the first match consumes its
//! span and yields a [`Token`].
//!
//! Two views of the same scan are offered:
//!
//! - [`Lexer::tokens`] returns an iterator that terminates silently at the
//!   first position where no pattern matches (the parser will then fail on
//!   look-ahead).
//! - [`Lexer::tokenize`] scans the whole input strictly and reports
//!   unmatched residue as a [`LexError`].
//!
//! # Examples
//!
//! ```
//! use eightebed::lexer::Lexer;
//!
//! let mut lexer = Lexer::new();
//! lexer.ignore(r"\s+");
//! lexer.register(r"\d+");
//! lexer.register(r"\(|\)");
//!
//! let tokens = lexer.tokenize("12 ( 34 )").unwrap();
//! let lexemes: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
//! assert_eq!(lexemes, ["12", "(", "34", ")"]);
//! ```

mod error;

#[cfg(test)]
mod tests;

pub use error::LexError;

use crate::token::Token;
use regex::Regex;

/// One registered token pattern with its optional tag.
struct Pattern {
    regex: Regex,
    tag: Option<String>,
}

/// A pattern-table lexer.
///
/// Patterns are anchored at the current input position. Registration order
/// is significant: the first token pattern that matches wins.
pub struct Lexer {
    ignoring: Vec<Regex>,
    patterns: Vec<Pattern>,
}

impl Lexer {
    /// Creates a lexer with no patterns registered.
    pub fn new() -> Self {
        Lexer {
            ignoring: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Registers an ignore pattern (matched and discarded before each token).
    ///
    /// # Panics
    /// Panics if `pattern` is not a valid regular expression. Patterns are
    /// written in source by the lexer's configurer, so a bad pattern is a
    /// programming error, not an input error.
    pub fn ignore(&mut self, pattern: &str) {
        self.ignoring.push(compile_anchored(pattern));
    }

    /// Registers an untagged token pattern.
    ///
    /// # Panics
    /// Panics if `pattern` is not a valid regular expression.
    pub fn register(&mut self, pattern: &str) {
        self.patterns.push(Pattern {
            regex: compile_anchored(pattern),
            tag: None,
        });
    }

    /// Registers a token pattern whose matches are tagged with `tag`.
    ///
    /// # Panics
    /// Panics if `pattern` is not a valid regular expression.
    pub fn register_tagged(&mut self, tag: &str, pattern: &str) {
        self.patterns.push(Pattern {
            regex: compile_anchored(pattern),
            tag: Some(tag.to_string()),
        });
    }

    /// Returns a lazy token iterator over `text`.
    ///
    /// The iterator ends at end of input, or silently at the first position
    /// where no registered pattern matches.
    pub fn tokens<'a>(&'a self, text: &'a str) -> Tokens<'a> {
        Tokens {
            lexer: self,
            text,
            pos: 0,
        }
    }

    /// Tokenizes all of `text`, reporting unmatched input as an error.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, LexError> {
        let mut iter = self.tokens(text);
        let mut tokens = Vec::new();
        for token in iter.by_ref() {
            tokens.push(token);
        }
        match iter.residue() {
            Some(offset) => Err(LexError::no_match(offset, &text[offset..])),
            None => Ok(tokens),
        }
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_anchored(pattern: &str) -> Regex {
    Regex::new(&format!(r"\A(?:{})", pattern))
        .unwrap_or_else(|e| panic!("invalid lexer pattern {:?}: {}", pattern, e))
}

/// Lazy token iterator returned by [`Lexer::tokens`].
pub struct Tokens<'a> {
    lexer: &'a Lexer,
    text: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    /// After the iterator has stopped, returns the byte offset of unmatched
    /// input, or `None` if the whole text was consumed.
    pub fn residue(&self) -> Option<usize> {
        if self.pos < self.text.len() {
            Some(self.pos)
        } else {
            None
        }
    }

    fn skip_ignored(&mut self) {
        let mut matched = true;
        while matched {
            matched = false;
            for pattern in &self.lexer.ignoring {
                if let Some(m) = pattern.find(&self.text[self.pos..]) {
                    if !m.is_empty() {
                        self.pos += m.end();
                        matched = true;
                        break;
                    }
                }
            }
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_ignored();
        if self.pos >= self.text.len() {
            return None;
        }
        for pattern in &self.lexer.patterns {
            if let Some(m) = pattern.regex.find(&self.text[self.pos..]) {
                if m.is_empty() {
                    continue;
                }
                let lexeme = m.as_str().to_string();
                self.pos += m.end();
                return Some(match &pattern.tag {
                    Some(tag) => Token::Tagged(tag.clone(), lexeme),
                    None => Token::Bare(lexeme),
                });
            }
        }
        // No pattern matches here; stop and leave the residue observable.
        None
    }
}
