//! Lexical analysis error types.

/// An error that occurred during lexical analysis.
///
/// The lexer fails in exactly one way: no registered pattern matches the
/// input at the current position. Diagnostics are textual; the message names
/// the byte offset and a snippet of the offending input.
#[derive(Debug)]
pub struct LexError {
    /// A human-readable description of the error.
    pub message: String,
}

impl LexError {
    /// Creates the "no pattern matches" error for the given position.
    pub(super) fn no_match(offset: usize, rest: &str) -> Self {
        let snippet: String = rest.chars().take(20).collect();
        LexError {
            message: format!(
                "no token pattern matches input at byte {}: {:?}",
                offset, snippet
            ),
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for LexError {}
