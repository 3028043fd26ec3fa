//! The Eightebed production table and its AST constructors.
//!
//! Each production mirrors one line of the grammar in the [module
//! documentation](super); constructors unpack the raw parse lists into AST
//! nodes. The alternation order within `Type`, `Stmt`, `Ref`, and `Expr` is
//! significant: keyword alternatives are listed before the name predicates
//! that would also accept them.

use crate::ast::{BinOp, Block, Decl, Expr, Program, Ref, Stmt, Type, TypeDecl, VarDecl};
use crate::token::Token;

use super::combinators::{Grammar, Parsed, Production};
use super::error::ParseError;

/// Builds the Eightebed grammar.
pub(super) fn eightebed_grammar() -> Grammar {
    let mut g = Grammar::new();

    g.define(
        "Eightebed",
        Production::sequence(vec![
            Production::asteration(Production::nonterminal("TypeDecl")),
            Production::asteration(Production::nonterminal("VarDecl")),
            Production::nonterminal("Block"),
        ])
        .construct(build_program),
    );
    g.define(
        "Block",
        Production::sequence(vec![
            Production::lexeme("{"),
            Production::asteration(Production::nonterminal("Stmt")),
            Production::lexeme("}"),
        ])
        .construct(build_block),
    );
    g.define(
        "TypeDecl",
        Production::sequence(vec![
            Production::lexeme("type"),
            Production::nonterminal("TypeName"),
            Production::nonterminal("Type"),
            Production::lexeme(";"),
        ])
        .construct(build_typedecl),
    );
    g.define(
        "Type",
        Production::alternation(vec![
            Production::lexeme("int").construct(build_int_type),
            Production::sequence(vec![
                Production::lexeme("struct"),
                Production::lexeme("{"),
                Production::asteration(Production::nonterminal("Decl")),
                Production::lexeme("}"),
            ])
            .construct(build_struct_type),
            Production::sequence(vec![
                Production::lexeme("ptr"),
                Production::lexeme("to"),
                Production::nonterminal("Type"),
            ])
            .construct(build_ptr_type),
            Production::nonterminal("TypeName").construct(build_named_type),
        ]),
    );
    g.define(
        "Decl",
        Production::sequence(vec![
            Production::nonterminal("Type"),
            Production::nonterminal("VarName"),
            Production::lexeme(";"),
        ])
        .construct(build_decl),
    );
    g.define(
        "VarDecl",
        Production::sequence(vec![
            Production::lexeme("var"),
            Production::nonterminal("Decl"),
        ])
        .construct(build_vardecl),
    );
    g.define(
        "Stmt",
        Production::alternation(vec![
            Production::sequence(vec![
                Production::lexeme("while"),
                Production::nonterminal("Expr"),
                Production::nonterminal("Block"),
            ])
            .construct(build_while),
            Production::sequence(vec![
                Production::lexeme("if"),
                Production::nonterminal("Expr"),
                Production::nonterminal("Block"),
                Production::optional(Production::sequence(vec![
                    Production::lexeme("else"),
                    Production::nonterminal("Block"),
                ])),
            ])
            .construct(build_if),
            Production::sequence(vec![
                Production::lexeme("free"),
                Production::nonterminal("Ref"),
                Production::lexeme(";"),
            ])
            .construct(build_free),
            Production::sequence(vec![
                Production::lexeme("print"),
                Production::nonterminal("Expr"),
                Production::lexeme(";"),
            ])
            .construct(build_print),
            Production::sequence(vec![
                Production::nonterminal("Ref"),
                Production::lexeme("="),
                Production::nonterminal("Expr"),
                Production::lexeme(";"),
            ])
            .construct(build_assign),
        ]),
    );
    g.define(
        "Ref",
        Production::alternation(vec![
            Production::sequence(vec![
                Production::lexeme("["),
                Production::nonterminal("Ref"),
                Production::lexeme("]"),
                Production::lexeme("."),
                Production::nonterminal("VarName"),
            ])
            .construct(build_dotted_ref),
            Production::sequence(vec![
                Production::lexeme("@"),
                Production::nonterminal("Ref"),
            ])
            .construct(build_deref),
            Production::nonterminal("VarName").construct(build_var_ref),
        ]),
    );
    g.define(
        "Expr",
        Production::alternation(vec![
            Production::sequence(vec![
                Production::lexeme("("),
                Production::nonterminal("Expr"),
                Production::nonterminal("BinOp"),
                Production::nonterminal("Expr"),
                Production::lexeme(")"),
            ])
            .construct(build_binop),
            Production::sequence(vec![
                Production::lexeme("malloc"),
                Production::nonterminal("Type"),
            ])
            .construct(build_malloc),
            Production::sequence(vec![
                Production::lexeme("valid"),
                Production::nonterminal("Expr"),
            ])
            .construct(build_valid),
            Production::nonterminal("IntLit").construct(build_int_const),
            Production::nonterminal("Ref").construct(build_ref_expr),
        ]),
    );
    g.define(
        "BinOp",
        Production::alternation(vec![
            Production::lexeme("+"),
            Production::lexeme("-"),
            Production::lexeme("*"),
            Production::lexeme("/"),
            Production::lexeme("="),
            Production::lexeme(">"),
            Production::lexeme("&"),
            Production::lexeme("|"),
        ]),
    );
    g.define("TypeName", Production::matching(is_name));
    g.define("VarName", Production::matching(is_name));
    g.define("IntLit", Production::matching(is_int_lit));

    g
}

/// `[a-zA-Z]\w*`: a letter followed by word characters.
fn is_name(lexeme: &str) -> bool {
    let mut chars = lexeme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `\d+`: one or more decimal digits.
fn is_int_lit(lexeme: &str) -> bool {
    !lexeme.is_empty() && lexeme.chars().all(|c| c.is_ascii_digit())
}

// Constructor plumbing. A constructor receives exactly the shape its
// production parses, so a mismatch is a bug in the table above, not an
// input error.

fn into_parts(value: Parsed) -> Vec<Parsed> {
    match value {
        Parsed::List(parts) => parts,
        other => unreachable!("expected a parse list, got {:?}", other),
    }
}

fn take_token(part: Parsed) -> Token {
    match part {
        Parsed::Token(token) => token,
        other => unreachable!("expected a token, got {:?}", other),
    }
}

fn take_type(part: Parsed) -> Type {
    match part {
        Parsed::Type(ty) => ty,
        other => unreachable!("expected a type, got {:?}", other),
    }
}

fn take_decl(part: Parsed) -> Decl {
    match part {
        Parsed::Decl(decl) => decl,
        other => unreachable!("expected a member declaration, got {:?}", other),
    }
}

fn take_block(part: Parsed) -> Block {
    match part {
        Parsed::Block(block) => block,
        other => unreachable!("expected a block, got {:?}", other),
    }
}

fn take_expr(part: Parsed) -> Expr {
    match part {
        Parsed::Expr(expr) => expr,
        other => unreachable!("expected an expression, got {:?}", other),
    }
}

fn take_ref(part: Parsed) -> Ref {
    match part {
        Parsed::Ref(r) => r,
        other => unreachable!("expected a reference, got {:?}", other),
    }
}

fn build_program(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let typedecls = into_parts(next_part(&mut parts))
        .into_iter()
        .map(|part| match part {
            Parsed::TypeDecl(decl) => decl,
            other => unreachable!("expected a type declaration, got {:?}", other),
        })
        .collect();
    let vardecls = into_parts(next_part(&mut parts))
        .into_iter()
        .map(|part| match part {
            Parsed::VarDecl(decl) => decl,
            other => unreachable!("expected a variable declaration, got {:?}", other),
        })
        .collect();
    let block = take_block(next_part(&mut parts));
    Ok(Parsed::Program(Program {
        typedecls,
        vardecls,
        block,
    }))
}

fn build_block(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _open = next_part(&mut parts);
    let stmts = into_parts(next_part(&mut parts))
        .into_iter()
        .map(|part| match part {
            Parsed::Stmt(stmt) => stmt,
            other => unreachable!("expected a statement, got {:?}", other),
        })
        .collect();
    Ok(Parsed::Block(Block { stmts }))
}

fn build_typedecl(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _keyword = next_part(&mut parts);
    let name = take_token(next_part(&mut parts)).text().to_string();
    let ty = take_type(next_part(&mut parts));
    Ok(Parsed::TypeDecl(TypeDecl { name, ty }))
}

fn build_int_type(_value: Parsed) -> Result<Parsed, ParseError> {
    Ok(Parsed::Type(Type::Int))
}

fn build_struct_type(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _keyword = next_part(&mut parts);
    let _open = next_part(&mut parts);
    let members = into_parts(next_part(&mut parts))
        .into_iter()
        .map(take_decl)
        .collect();
    Ok(Parsed::Type(Type::fresh_struct(members)))
}

fn build_ptr_type(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _ptr = next_part(&mut parts);
    let _to = next_part(&mut parts);
    let target = take_type(next_part(&mut parts));
    Ok(Parsed::Type(Type::ptr(target)))
}

fn build_named_type(value: Parsed) -> Result<Parsed, ParseError> {
    let name = take_token(value).text().to_string();
    Ok(Parsed::Type(Type::named(name)))
}

fn build_decl(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let ty = take_type(next_part(&mut parts));
    let name = take_token(next_part(&mut parts)).text().to_string();
    Ok(Parsed::Decl(Decl { ty, name }))
}

fn build_vardecl(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _keyword = next_part(&mut parts);
    let decl = take_decl(next_part(&mut parts));
    Ok(Parsed::VarDecl(VarDecl {
        name: decl.name,
        ty: decl.ty,
    }))
}

fn build_while(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _keyword = next_part(&mut parts);
    let condition = take_expr(next_part(&mut parts));
    let body = take_block(next_part(&mut parts));
    Ok(Parsed::Stmt(Stmt::While { condition, body }))
}

fn build_if(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _keyword = next_part(&mut parts);
    let condition = take_expr(next_part(&mut parts));
    let then_branch = take_block(next_part(&mut parts));
    let mut elsepart = into_parts(next_part(&mut parts)).into_iter();
    let else_branch = match elsepart.next() {
        Some(clause) => {
            let mut clause = into_parts(clause).into_iter();
            let _keyword = next_part(&mut clause);
            take_block(next_part(&mut clause))
        }
        None => Block::default(),
    };
    Ok(Parsed::Stmt(Stmt::If {
        condition,
        then_branch,
        else_branch,
    }))
}

fn build_free(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _keyword = next_part(&mut parts);
    let target = take_ref(next_part(&mut parts));
    Ok(Parsed::Stmt(Stmt::Free(target)))
}

fn build_print(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _keyword = next_part(&mut parts);
    let expr = take_expr(next_part(&mut parts));
    Ok(Parsed::Stmt(Stmt::Print(expr)))
}

fn build_assign(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let target = take_ref(next_part(&mut parts));
    let _equals = next_part(&mut parts);
    let expr = take_expr(next_part(&mut parts));
    Ok(Parsed::Stmt(Stmt::Assign {
        target,
        value: expr,
    }))
}

fn build_dotted_ref(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _open = next_part(&mut parts);
    let source = take_ref(next_part(&mut parts));
    let _close = next_part(&mut parts);
    let _dot = next_part(&mut parts);
    let member = take_token(next_part(&mut parts)).text().to_string();
    Ok(Parsed::Ref(Ref::dotted(source, member)))
}

fn build_deref(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _at = next_part(&mut parts);
    let source = take_ref(next_part(&mut parts));
    Ok(Parsed::Ref(Ref::deref(source)))
}

fn build_var_ref(value: Parsed) -> Result<Parsed, ParseError> {
    let name = take_token(value).text().to_string();
    Ok(Parsed::Ref(Ref::var(name)))
}

fn build_binop(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _open = next_part(&mut parts);
    let lhs = take_expr(next_part(&mut parts));
    let op_token = take_token(next_part(&mut parts));
    let rhs = take_expr(next_part(&mut parts));
    let op = match BinOp::from_lexeme(op_token.text()) {
        Some(op) => op,
        None => unreachable!("BinOp production matched {:?}", op_token.text()),
    };
    Ok(Parsed::Expr(Expr::binop(lhs, op, rhs)))
}

fn build_malloc(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _keyword = next_part(&mut parts);
    let ty = take_type(next_part(&mut parts));
    Ok(Parsed::Expr(Expr::Malloc(ty)))
}

fn build_valid(value: Parsed) -> Result<Parsed, ParseError> {
    let mut parts = into_parts(value).into_iter();
    let _keyword = next_part(&mut parts);
    let expr = take_expr(next_part(&mut parts));
    Ok(Parsed::Expr(Expr::valid(expr)))
}

fn build_int_const(value: Parsed) -> Result<Parsed, ParseError> {
    let token = take_token(value);
    let parsed: i64 = token
        .text()
        .parse()
        .map_err(|_| ParseError::syntax(format!("integer literal {} out of range", token.text())))?;
    Ok(Parsed::Expr(Expr::IntConst(parsed)))
}

fn build_ref_expr(value: Parsed) -> Result<Parsed, ParseError> {
    let r = take_ref(value);
    Ok(Parsed::Expr(Expr::Ref(r)))
}

fn next_part(parts: &mut impl Iterator<Item = Parsed>) -> Parsed {
    match parts.next() {
        Some(part) => part,
        None => unreachable!("parse list shorter than its production"),
    }
}
