//! Parser for the Eightebed programming language.
//!
//! This module turns source text into an AST ([`Program`]). Tokenization is
//! handled by a pattern-table [`Lexer`](crate::lexer::Lexer); parsing is
//! done by a predictive combinator engine driven by FIRST sets. There is no
//! backtracking: the grammar is LL(1) over these combinators.
//!
//! # Grammar
//!
//! ```text
//! Program  = TypeDecl* VarDecl* Block
//! TypeDecl = 'type' TypeName Type ';'
//! Type     = 'int' | 'struct' '{' Decl* '}' | 'ptr' 'to' Type | TypeName
//! Decl     = Type VarName ';'
//! VarDecl  = 'var' Decl
//! Block    = '{' Stmt* '}'
//! Stmt     = 'while' Expr Block
//!          | 'if'    Expr Block ('else' Block)?
//!          | 'free'  Ref ';'
//!          | 'print' Expr ';'
//!          | Ref '=' Expr ';'
//! Ref      = '[' Ref ']' '.' VarName
//!          | '@' Ref
//!          | VarName
//! Expr     = '(' Expr BinOp Expr ')'
//!          | 'malloc' Type
//!          | 'valid'  Expr
//!          | IntLit
//!          | Ref
//! BinOp    = '+'|'-'|'*'|'/'|'='|'>'|'&'|'|'
//! ```
//!
//! # Examples
//!
//! ```
//! use eightebed::parser::parse;
//!
//! let program = parse("var int jim; { jim = 4; }").unwrap();
//! assert!(program.typedecls.is_empty());
//! assert_eq!(program.vardecls[0].name, "jim");
//! ```
//!
//! # Module Structure
//!
//! - [`stream`] - One-token look-ahead over the token sequence
//! - [`combinators`] - The production engine (FIRST sets, predicate sets)
//! - `grammar` - The Eightebed production table and AST constructors
//! - [`error`] - Parse error types
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::lexer`] - Produces the token stream consumed here
//! * [`crate::ast`] - Defines the AST types produced here
//! * [`crate::semantic`] - Validates the AST

pub mod combinators;
mod error;
mod grammar;
pub mod stream;


pub use error::ParseError;

use once_cell::sync::Lazy;

use crate::ast::Program;
use crate::lexer::Lexer;
use combinators::{Grammar, Parsed};
use stream::TokenStream;

/// The Eightebed lexer: ignorable whitespace, then integer literals,
/// single-character punctuation, and identifiers, in that order.
static LEXER: Lazy<Lexer> = Lazy::new(|| {
    let mut lexer = Lexer::new();
    lexer.ignore(r"\s+");
    lexer.register(r"\d+");
    lexer.register(r"\(|\)|\[|\]|;|\{|\}|=|\+|-|\*|/|,|@|\.|>|&|\|");
    lexer.register(r"[a-zA-Z]\w*");
    lexer
});

/// The Eightebed grammar, built once per process.
static GRAMMAR: Lazy<Grammar> = Lazy::new(grammar::eightebed_grammar);

/// Parses Eightebed source text into a [`Program`].
///
/// # Errors
///
/// Returns a [`ParseError`] if the input cannot be tokenized, if the
/// `Eightebed` production does not match, or if tokens are left unconsumed
/// after the program.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = LEXER.tokenize(source).map_err(ParseError::Lex)?;
    let mut stream = TokenStream::new(tokens.into_iter());
    match GRAMMAR.parse("Eightebed", &mut stream)? {
        Some(Parsed::Program(program)) => {
            if stream.peek().is_some() {
                Err(ParseError::syntax(
                    "parse failed: input left unconsumed after program",
                ))
            } else {
                Ok(program)
            }
        }
        Some(other) => unreachable!("Eightebed production constructed {:?}", other),
        None => Err(ParseError::syntax("parse failed")),
    }
}
