//! Source-form pretty-printing for AST nodes.
//!
//! Every node prints itself as valid Eightebed source, so the output of
//! `Display` can be fed back to the parser. Struct ids are not printed;
//! re-parsing therefore yields an equivalent tree up to struct-id
//! renumbering.

use std::fmt;

use super::expr::Expr;
use super::program::{Block, Program, TypeDecl, VarDecl};
use super::refs::Ref;
use super::stmt::Stmt;
use super::types::{Decl, Type};

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Void => write!(f, "void"),
            Type::Struct { members, .. } => {
                write!(f, "struct {{ ")?;
                for member in members {
                    write!(f, "{} ", member)?;
                }
                write!(f, "}}")
            }
            Type::Ptr { target } => write!(f, "ptr to {}", target),
            Type::Named { name } => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {};", self.ty, self.name)
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ref::Var(name) => write!(f, "{}", name),
            Ref::Dotted { source, member } => write!(f, "[{}].{}", source, member),
            Ref::DeRef { source, .. } => write!(f, "@{}", source),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::IntConst(value) => write!(f, "{}", value),
            Expr::Ref(r) => write!(f, "{}", r),
            Expr::BinOp { lhs, op, rhs } => write!(f, "({} {} {})", lhs, op.lexeme(), rhs),
            Expr::Malloc(ty) => write!(f, "malloc {}", ty),
            Expr::Valid(expr) => write!(f, "valid {}", expr),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::While { condition, body } => write!(f, "while {} {}", condition, body),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "if {} {} else {}", condition, then_branch, else_branch),
            Stmt::Free(target) => write!(f, "free {};", target),
            Stmt::Print(expr) => write!(f, "print {};", expr),
            Stmt::Assign { target, value } => write!(f, "{} = {};", target, value),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for stmt in &self.stmts {
            write!(f, "{} ", stmt)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type {} {};", self.name, self.ty)
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var {} {};", self.ty, self.name)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for typedecl in &self.typedecls {
            writeln!(f, "{}", typedecl)?;
        }
        for vardecl in &self.vardecls {
            writeln!(f, "{}", vardecl)?;
        }
        write!(f, "{}", self.block)
    }
}
