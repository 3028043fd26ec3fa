//! Unit tests for the lexer.

use super::*;

fn punctuated_lexer() -> Lexer {
    let mut lexer = Lexer::new();
    lexer.register_tagged("integer", r"\d+");
    lexer.register(r"\(|\)");
    lexer
}

#[test]
fn test_tagged_and_bare_tokens() {
    let lexer = punctuated_lexer();
    let tokens: Vec<Token> = lexer.tokens("12(34)").collect();
    assert_eq!(
        tokens,
        vec![
            Token::Tagged("integer".to_string(), "12".to_string()),
            Token::Bare("(".to_string()),
            Token::Tagged("integer".to_string(), "34".to_string()),
            Token::Bare(")".to_string()),
        ]
    );
}

#[test]
fn test_unmatched_input_stops_iteration_silently() {
    // Without an ignore pattern, the first space stops the scan.
    let lexer = punctuated_lexer();
    let tokens: Vec<Token> = lexer.tokens("12 ( 34 )").collect();
    assert_eq!(
        tokens,
        vec![Token::Tagged("integer".to_string(), "12".to_string())]
    );
}

#[test]
fn test_ignore_pattern_discards_whitespace() {
    let mut lexer = punctuated_lexer();
    lexer.ignore(r"\s+");
    let tokens: Vec<Token> = lexer.tokens("12 ( 34 )").collect();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[3], Token::Bare(")".to_string()));
}

#[test]
fn test_tokenize_reports_residue() {
    let lexer = punctuated_lexer();
    let err = lexer.tokenize("12x").unwrap_err();
    assert!(
        err.message.contains("byte 2"),
        "unexpected message: {}",
        err.message
    );
}

#[test]
fn test_tokenize_accepts_full_match() {
    let mut lexer = punctuated_lexer();
    lexer.ignore(r"\s+");
    let tokens = lexer.tokenize("12 ( 34 )  ").unwrap();
    assert_eq!(tokens.len(), 4);
}

#[test]
fn test_registration_order_decides_ties() {
    // Both patterns match "to"; the first registered wins.
    let mut lexer = Lexer::new();
    lexer.register_tagged("keyword", r"to");
    lexer.register(r"[a-z]+");
    let tokens: Vec<Token> = lexer.tokens("to").collect();
    assert_eq!(tokens[0].tag(), Some("keyword"));
}

#[test]
fn test_empty_input_yields_no_tokens() {
    let lexer = punctuated_lexer();
    assert!(lexer.tokenize("").unwrap().is_empty());
}

#[test]
fn test_eightebed_punctuation_set() {
    let mut lexer = Lexer::new();
    lexer.ignore(r"\s+");
    lexer.register(r"\d+");
    lexer.register(r"\(|\)|\[|\]|;|\{|\}|=|\+|-|\*|/|,|@|\.|>|&|\|");
    lexer.register(r"[a-zA-Z]\w*");
    let tokens = lexer.tokenize("[@jim].next = malloc node;").unwrap();
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
    assert_eq!(
        lexemes,
        ["[", "@", "jim", "]", ".", "next", "=", "malloc", "node", ";"]
    );
}
