//! Semantic analysis error types.
//!
//! One error type covers both static passes: structural type errors and
//! validity-flow errors. Diagnostics are textual without source positions;
//! the [`SemanticErrorKind`] lets callers match on the violation
//! structurally instead of parsing messages.

use crate::ast::Type;

/// The kind of semantic analysis error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// A name was declared while already visible in the scope chain.
    AlreadyDeclared,
    /// A name was looked up but never declared.
    NotDeclared,
    /// A type declaration named something other than a struct.
    NonStructNamed,
    /// A struct literal appeared as a struct member.
    NestedStruct,
    /// A pointer type targets something other than a named type.
    UnnamedPointerTarget,
    /// A pointer-typed operand was required.
    NotAPointer,
    /// An integer-typed operand was required.
    NotAnInt,
    /// A struct member access named a missing member.
    NoSuchMember,
    /// The two sides of an assignment have inequivalent types.
    TypeMismatch,
    /// A dereference outside any safe area.
    UnsafeDereference,
}

/// An error raised by type checking or validity analysis.
#[derive(Debug)]
pub struct SemanticError {
    kind: SemanticErrorKind,
    message: String,
}

impl SemanticError {
    fn new(kind: SemanticErrorKind, message: String) -> Self {
        SemanticError { kind, message }
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> SemanticErrorKind {
        self.kind
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(super) fn already_declared(name: &str) -> Self {
        Self::new(
            SemanticErrorKind::AlreadyDeclared,
            format!("{} already declared", name),
        )
    }

    pub(super) fn not_declared(name: &str) -> Self {
        Self::new(
            SemanticErrorKind::NotDeclared,
            format!("{} is not declared", name),
        )
    }

    pub(super) fn non_struct_named() -> Self {
        Self::new(
            SemanticErrorKind::NonStructNamed,
            "Only structs may be named".to_string(),
        )
    }

    pub(super) fn nested_struct() -> Self {
        Self::new(
            SemanticErrorKind::NestedStruct,
            "Structs may not contain other structs".to_string(),
        )
    }

    pub(super) fn unnamed_pointer_target() -> Self {
        Self::new(
            SemanticErrorKind::UnnamedPointerTarget,
            "Pointer type must point to named type".to_string(),
        )
    }

    pub(super) fn not_a_pointer(ty: &Type) -> Self {
        Self::new(
            SemanticErrorKind::NotAPointer,
            format!("{} is not a pointer type", ty),
        )
    }

    pub(super) fn not_an_int(ty: &Type) -> Self {
        Self::new(SemanticErrorKind::NotAnInt, format!("{} is not an int", ty))
    }

    pub(super) fn no_such_member(ty: &Type, member: &str) -> Self {
        Self::new(
            SemanticErrorKind::NoSuchMember,
            format!("{} does not have member {}", ty, member),
        )
    }

    pub(super) fn type_mismatch(lhs: &Type, rhs: &Type) -> Self {
        Self::new(
            SemanticErrorKind::TypeMismatch,
            format!("{} is not equivalent to {}", lhs, rhs),
        )
    }

    pub(super) fn unsafe_dereference(name: &str) -> Self {
        Self::new(
            SemanticErrorKind::UnsafeDereference,
            format!("Attempt to dereference {} in non-safe context", name),
        )
    }
}

impl std::fmt::Display for SemanticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SemanticError {}
