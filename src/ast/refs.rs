//! Storage references for the Eightebed AST.

use super::types::Type;

/// A reference to a storage location.
///
/// References appear on the left of assignments, as `free` operands, and
/// (wrapped in [`Expr::Ref`](super::Expr::Ref)) as expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Ref {
    /// A named variable.
    Var(String),
    /// Member access `[r].m` on a struct-valued reference.
    Dotted {
        /// The struct-valued reference being accessed.
        source: Box<Ref>,
        /// The member name.
        member: String,
    },
    /// Pointer dereference `@r`.
    DeRef {
        /// The pointer-valued reference being dereferenced.
        source: Box<Ref>,
        /// The pointee type, cached by the type checker for the emitter.
        ///
        /// `None` until the program has been checked.
        dest_type: Option<Type>,
    },
}

impl Ref {
    /// Creates a plain variable reference.
    pub fn var(name: impl Into<String>) -> Ref {
        Ref::Var(name.into())
    }

    /// Creates a member access reference.
    pub fn dotted(source: Ref, member: impl Into<String>) -> Ref {
        Ref::Dotted {
            source: Box::new(source),
            member: member.into(),
        }
    }

    /// Creates a dereference with an unresolved target type.
    pub fn deref(source: Ref) -> Ref {
        Ref::DeRef {
            source: Box::new(source),
            dest_type: None,
        }
    }
}
