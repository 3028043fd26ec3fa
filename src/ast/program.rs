//! Top-level program structure for the Eightebed AST.

use super::stmt::Stmt;
use super::types::Type;

/// A brace-delimited list of statements.
///
/// Blocks open a transient scope during checking; the grammar permits no
/// declarations inside blocks, so the scope exists for symmetry with the
/// environment discipline rather than for content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    /// The statements, in source order.
    pub stmts: Vec<Stmt>,
}

/// A top-level type declaration, `type name T;`.
///
/// Only struct types may be named; the type checker enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    /// The declared name.
    pub name: String,
    /// The named type.
    pub ty: Type,
}

/// A top-level variable declaration, `var T name;`.
///
/// Variables live at C file scope in the emitted program and are therefore
/// zero-initialized, which is what makes every pointer start out invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    /// The declared name.
    pub name: String,
    /// The variable's type.
    pub ty: Type,
}

/// The root node of an Eightebed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Type declarations, in source order.
    pub typedecls: Vec<TypeDecl>,
    /// Variable declarations, in source order. Pointer-typed entries form
    /// the *root set* from which free-time marking begins.
    pub vardecls: Vec<VarDecl>,
    /// The program body.
    pub block: Block,
}
