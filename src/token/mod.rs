//! Token types for the Eightebed lexer.
//!
//! The lexer produces a flat stream of [`Token`]s. Unlike a keyword-aware
//! tokenizer, the Eightebed lexer is configured entirely with patterns, so a
//! token is just the matched lexeme, optionally labelled with the tag its
//! pattern was registered under.

/// A single lexed token.
///
/// A token is either a bare lexeme, or a `(tag, lexeme)` pair when the
/// pattern that matched it was registered with a tag via
/// [`Lexer::register_tagged`](crate::lexer::Lexer::register_tagged).
/// The Eightebed grammar registers all of its patterns untagged and matches
/// tokens by lexeme text alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A lexeme matched by an untagged pattern.
    Bare(String),
    /// A `(tag, lexeme)` pair matched by a tagged pattern.
    Tagged(String, String),
}

impl Token {
    /// Returns the matched lexeme text, regardless of tagging.
    pub fn text(&self) -> &str {
        match self {
            Token::Bare(text) => text,
            Token::Tagged(_, text) => text,
        }
    }

    /// Returns the tag this token's pattern was registered with, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Token::Bare(_) => None,
            Token::Tagged(tag, _) => Some(tag),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_token_text() {
        let token = Token::Bare("while".to_string());
        assert_eq!(token.text(), "while");
        assert_eq!(token.tag(), None);
    }

    #[test]
    fn test_tagged_token_text_and_tag() {
        let token = Token::Tagged("integer".to_string(), "12".to_string());
        assert_eq!(token.text(), "12");
        assert_eq!(token.tag(), Some("integer"));
    }

    #[test]
    fn test_display_shows_lexeme() {
        assert_eq!(Token::Bare("@".to_string()).to_string(), "@");
        assert_eq!(
            Token::Tagged("integer".to_string(), "34".to_string()).to_string(),
            "34"
        );
    }
}
