//! One-token look-ahead over a lazy token sequence.

use crate::token::Token;

/// A `TokenStream` wraps a token iterator and allows a limited form of
/// look-ahead into its results.
///
/// Two operations are provided: [`peek`](TokenStream::peek), which returns
/// the next token without consuming it (`None` once the sequence is
/// exhausted), and [`advance`](TokenStream::advance), which discards exactly
/// the token `peek` would return and is a no-op at end of input.
pub struct TokenStream<'a> {
    iter: Box<dyn Iterator<Item = Token> + 'a>,
    peeked: Option<Token>,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream over any token iterator.
    pub fn new(iter: impl Iterator<Item = Token> + 'a) -> Self {
        TokenStream {
            iter: Box::new(iter),
            peeked: None,
        }
    }

    /// Returns the next token without consuming it.
    ///
    /// Repeated calls return the same token. Once the underlying sequence is
    /// exhausted, returns `None` indefinitely.
    pub fn peek(&mut self) -> Option<&Token> {
        if self.peeked.is_none() {
            self.peeked = self.iter.next();
        }
        self.peeked.as_ref()
    }

    /// Consumes and returns the token `peek` would have returned.
    pub fn take(&mut self) -> Option<Token> {
        if self.peeked.is_none() {
            self.peeked = self.iter.next();
        }
        self.peeked.take()
    }

    /// Discards exactly one token; a no-op at end of input.
    pub fn advance(&mut self) {
        let _ = self.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream_of(lexemes: &[&str]) -> TokenStream<'static> {
        let tokens: Vec<Token> = lexemes
            .iter()
            .map(|s| Token::Bare((*s).to_string()))
            .collect();
        TokenStream::new(tokens.into_iter())
    }

    #[test]
    fn test_peek_is_stable() {
        let mut stream = stream_of(&["6", "1", "7"]);
        assert_eq!(stream.peek().map(Token::text), Some("6"));
        assert_eq!(stream.peek().map(Token::text), Some("6"));
    }

    #[test]
    fn test_advance_moves_to_next() {
        let mut stream = stream_of(&["6", "1", "7"]);
        stream.peek();
        stream.advance();
        assert_eq!(stream.peek().map(Token::text), Some("1"));
        stream.advance();
        assert_eq!(stream.peek().map(Token::text), Some("7"));
        stream.advance();
        assert_eq!(stream.peek(), None);
    }

    #[test]
    fn test_advance_without_peek_discards_one_token() {
        let mut stream = stream_of(&["a", "b"]);
        stream.advance();
        assert_eq!(stream.peek().map(Token::text), Some("b"));
    }

    #[test]
    fn test_advance_at_eof_is_noop() {
        let mut stream = stream_of(&[]);
        stream.advance();
        stream.advance();
        assert_eq!(stream.peek(), None);
    }

    #[test]
    fn test_take_returns_owned_token() {
        let mut stream = stream_of(&["x"]);
        assert_eq!(stream.take(), Some(Token::Bare("x".to_string())));
        assert_eq!(stream.take(), None);
    }
}
