//! A predictive parser-combinator engine.
//!
//! A [`Grammar`] maps production names to [`Production`]s. Each production
//! supports three operations: `parse` against a [`TokenStream`], `firsts`
//! (the [`PredicateSet`] of accepted look-ahead lexemes), and `is_nullable`.
//!
//! The engine never backtracks. [`Alternation`](Production::alternation)
//! commits to the first alternative whose FIRST set contains the current
//! look-ahead, and [`Sequence`](Production::sequence) fails without
//! rewinding, so grammars must be predictive: alternatives have to be
//! discriminated by their first token.
//!
//! A production may carry a *constructor*, applied to the raw parse result
//! on success; this is how grammar productions map onto AST nodes.

use std::collections::{BTreeSet, HashMap};

use crate::ast::{Block, Decl, Expr, Program, Ref, Stmt, Type, TypeDecl, VarDecl};
use crate::token::Token;

use super::error::ParseError;
use super::stream::TokenStream;

/// The raw result of parsing one production.
///
/// Terminals produce tokens; sequences, asterations, and optionals produce
/// lists; constructors replace those with AST nodes.
#[derive(Debug, PartialEq)]
pub enum Parsed {
    /// A consumed terminal token.
    Token(Token),
    /// The collected results of a compound production.
    List(Vec<Parsed>),
    /// A constructed type expression.
    Type(Type),
    /// A constructed member declaration.
    Decl(Decl),
    /// A constructed type declaration.
    TypeDecl(TypeDecl),
    /// A constructed variable declaration.
    VarDecl(VarDecl),
    /// A constructed block.
    Block(Block),
    /// A constructed statement.
    Stmt(Stmt),
    /// A constructed reference.
    Ref(Ref),
    /// A constructed expression.
    Expr(Expr),
    /// A constructed program.
    Program(Program),
}

/// A constructor turns a raw parse result into an AST node.
///
/// Constructors may fail (for example an out-of-range integer literal);
/// the error aborts the parse.
pub type Constructor = fn(Parsed) -> Result<Parsed, ParseError>;

/// A terminal matcher: either a literal lexeme or a predicate over lexemes.
#[derive(Clone, Copy)]
pub enum Matcher {
    /// Accepts exactly this lexeme.
    Lexeme(&'static str),
    /// Accepts any lexeme the predicate accepts.
    Predicate(fn(&str) -> bool),
}

impl Matcher {
    /// Tests a lexeme against this matcher.
    pub fn accepts(&self, lexeme: &str) -> bool {
        match self {
            Matcher::Lexeme(expected) => lexeme == *expected,
            Matcher::Predicate(pred) => pred(lexeme),
        }
    }
}

/// A set whose membership test is backed by literal lexemes and predicates.
///
/// FIRST sets are predicate sets: `Terminal("int")` contributes the literal
/// `int`, while `Terminal(is_name)` contributes the predicate itself.
#[derive(Default)]
pub struct PredicateSet {
    lexemes: BTreeSet<&'static str>,
    predicates: Vec<fn(&str) -> bool>,
}

impl PredicateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        PredicateSet::default()
    }

    /// Adds one matcher to the set.
    pub fn add(&mut self, matcher: &Matcher) {
        match *matcher {
            Matcher::Lexeme(lexeme) => {
                self.lexemes.insert(lexeme);
            }
            Matcher::Predicate(pred) => {
                if !self.predicates.contains(&pred) {
                    self.predicates.push(pred);
                }
            }
        }
    }

    /// Merges another set into this one.
    pub fn update(&mut self, other: PredicateSet) {
        self.lexemes.extend(other.lexemes);
        for pred in other.predicates {
            if !self.predicates.contains(&pred) {
                self.predicates.push(pred);
            }
        }
    }

    /// Tests whether a lexeme is in the set.
    pub fn contains(&self, lexeme: &str) -> bool {
        self.lexemes.contains(lexeme) || self.predicates.iter().any(|pred| pred(lexeme))
    }

    /// Tests the current look-ahead; the end-of-input sentinel is never in
    /// any FIRST set.
    pub fn contains_token(&self, token: Option<&Token>) -> bool {
        token.is_some_and(|t| self.contains(t.text()))
    }
}

enum Rule {
    Terminal(Matcher),
    Alternation(Vec<Production>),
    Sequence(Vec<Production>),
    Asteration(Box<Production>),
    Optional(Box<Production>),
    NonTerminal(&'static str),
}

/// One grammar production: a rule plus an optional AST constructor.
pub struct Production {
    rule: Rule,
    constructor: Option<Constructor>,
}

impl Production {
    /// A terminal accepting exactly `lexeme`.
    pub fn lexeme(lexeme: &'static str) -> Production {
        Production {
            rule: Rule::Terminal(Matcher::Lexeme(lexeme)),
            constructor: None,
        }
    }

    /// A terminal accepting any lexeme `pred` accepts.
    pub fn matching(pred: fn(&str) -> bool) -> Production {
        Production {
            rule: Rule::Terminal(Matcher::Predicate(pred)),
            constructor: None,
        }
    }

    /// An ordered-choice production. The first alternative whose FIRST set
    /// contains the look-ahead is committed to.
    pub fn alternation(alternatives: Vec<Production>) -> Production {
        Production {
            rule: Rule::Alternation(alternatives),
            constructor: None,
        }
    }

    /// A sequence production; fails without rewinding.
    pub fn sequence(parts: Vec<Production>) -> Production {
        Production {
            rule: Rule::Sequence(parts),
            constructor: None,
        }
    }

    /// Zero-or-more repetition, greedy under the FIRST-set guard.
    pub fn asteration(production: Production) -> Production {
        Production {
            rule: Rule::Asteration(Box::new(production)),
            constructor: None,
        }
    }

    /// Zero-or-one occurrence under the FIRST-set guard.
    pub fn optional(production: Production) -> Production {
        Production {
            rule: Rule::Optional(Box::new(production)),
            constructor: None,
        }
    }

    /// A reference to a named production, resolved through the grammar at
    /// parse time.
    pub fn nonterminal(name: &'static str) -> Production {
        Production {
            rule: Rule::NonTerminal(name),
            constructor: None,
        }
    }

    /// Attaches a constructor, applied to the raw result on success.
    pub fn construct(mut self, constructor: Constructor) -> Production {
        self.constructor = Some(constructor);
        self
    }

    /// Parses this production against the stream.
    ///
    /// `Ok(None)` means the production did not match (a *soft* failure the
    /// enclosing production may tolerate); `Err` means a constructor
    /// rejected its input and the parse is aborted.
    pub fn parse(
        &self,
        stream: &mut TokenStream<'_>,
        grammar: &Grammar,
    ) -> Result<Option<Parsed>, ParseError> {
        let raw = self.parse_rule(stream, grammar)?;
        match raw {
            Some(value) => Ok(Some(self.capture(value)?)),
            None => Ok(None),
        }
    }

    fn parse_rule(
        &self,
        stream: &mut TokenStream<'_>,
        grammar: &Grammar,
    ) -> Result<Option<Parsed>, ParseError> {
        match &self.rule {
            Rule::Terminal(matcher) => {
                let hit = stream.peek().is_some_and(|t| matcher.accepts(t.text()));
                if hit {
                    Ok(stream.take().map(Parsed::Token))
                } else {
                    Ok(None)
                }
            }
            Rule::Alternation(alternatives) => {
                for alternative in alternatives {
                    if alternative.firsts(grammar).contains_token(stream.peek()) {
                        return alternative.parse(stream, grammar);
                    }
                }
                Ok(None)
            }
            Rule::Sequence(parts) => {
                let mut results = Vec::with_capacity(parts.len());
                for part in parts {
                    match part.parse(stream, grammar)? {
                        Some(value) => results.push(value),
                        // No rewinding: the grammar is predictive.
                        None => return Ok(None),
                    }
                }
                Ok(Some(Parsed::List(results)))
            }
            Rule::Asteration(production) => {
                let mut results = Vec::new();
                while production.firsts(grammar).contains_token(stream.peek()) {
                    match production.parse(stream, grammar)? {
                        Some(value) => results.push(value),
                        None => break,
                    }
                }
                Ok(Some(Parsed::List(results)))
            }
            Rule::Optional(production) => {
                let mut results = Vec::new();
                if production.firsts(grammar).contains_token(stream.peek()) {
                    if let Some(value) = production.parse(stream, grammar)? {
                        results.push(value);
                    }
                }
                Ok(Some(Parsed::List(results)))
            }
            Rule::NonTerminal(name) => grammar.production(name).parse(stream, grammar),
        }
    }

    fn capture(&self, value: Parsed) -> Result<Parsed, ParseError> {
        match self.constructor {
            Some(constructor) => constructor(value),
            None => Ok(value),
        }
    }

    /// The set of look-ahead lexemes this production can start with.
    pub fn firsts(&self, grammar: &Grammar) -> PredicateSet {
        match &self.rule {
            Rule::Terminal(matcher) => {
                let mut set = PredicateSet::new();
                set.add(matcher);
                set
            }
            Rule::Alternation(alternatives) => {
                let mut set = PredicateSet::new();
                for alternative in alternatives {
                    set.update(alternative.firsts(grammar));
                }
                set
            }
            Rule::Sequence(parts) => {
                let mut set = PredicateSet::new();
                for part in parts {
                    set.update(part.firsts(grammar));
                    if !part.is_nullable(grammar) {
                        break;
                    }
                }
                set
            }
            Rule::Asteration(production) | Rule::Optional(production) => {
                production.firsts(grammar)
            }
            Rule::NonTerminal(name) => grammar.production(name).firsts(grammar),
        }
    }

    /// Whether this production can match the empty sequence.
    pub fn is_nullable(&self, grammar: &Grammar) -> bool {
        match &self.rule {
            Rule::Terminal(_) => false,
            Rule::Alternation(alternatives) => alternatives
                .iter()
                .any(|alternative| alternative.is_nullable(grammar)),
            Rule::Sequence(parts) => parts.iter().all(|part| part.is_nullable(grammar)),
            Rule::Asteration(_) | Rule::Optional(_) => true,
            Rule::NonTerminal(name) => grammar.production(name).is_nullable(grammar),
        }
    }
}

/// A named set of productions.
pub struct Grammar {
    productions: HashMap<&'static str, Production>,
}

impl Grammar {
    /// Creates an empty grammar.
    pub fn new() -> Self {
        Grammar {
            productions: HashMap::new(),
        }
    }

    /// Defines (or redefines) a named production.
    pub fn define(&mut self, name: &'static str, production: Production) {
        self.productions.insert(name, production);
    }

    /// Looks up a production by name.
    ///
    /// # Panics
    /// Panics if the name is undefined. Production names are written in the
    /// grammar table, so an unknown name is a bug in the table.
    fn production(&self, name: &str) -> &Production {
        self.productions
            .get(name)
            .unwrap_or_else(|| panic!("no production {:?} in grammar", name))
    }

    /// Parses the named production against a stream.
    pub fn parse(
        &self,
        name: &str,
        stream: &mut TokenStream<'_>,
    ) -> Result<Option<Parsed>, ParseError> {
        self.production(name).parse(stream, self)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}
