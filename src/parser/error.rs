//! Parse error types.

use crate::lexer::LexError;

/// An error that occurred while turning source text into an AST.
///
/// The combinator layer does not track source positions, so syntax errors
/// are reported generically; the lexical variant names the offending byte
/// offset.
#[derive(Debug)]
pub enum ParseError {
    /// No registered lexer pattern matched the remaining input.
    Lex(LexError),
    /// A production returned null at the top level, left tokens unconsumed,
    /// or a constructor rejected its input.
    Syntax {
        /// A human-readable description of the error.
        message: String,
    },
}

impl ParseError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        ParseError::Syntax {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lex(error) => write!(f, "{}", error),
            ParseError::Syntax { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(error) => Some(error),
            ParseError::Syntax { .. } => None,
        }
    }
}
