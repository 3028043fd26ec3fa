//! Type expressions for the Eightebed AST.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Source of process-wide unique struct ids.
///
/// Struct ids only need to be unique within one output program, so a
/// monotonically increasing counter shared by every compilation in the
/// process is sufficient.
static NEXT_STRUCT_ID: AtomicUsize = AtomicUsize::new(0);

/// A type expression in the Eightebed language.
///
/// The type language is deliberately narrow: pointers may only point to
/// *named* types, and only structs may be named, so every pointer ultimately
/// targets a struct whose pointer-typed members the emitter can enumerate.
/// That shape restriction is what makes mark-on-free invalidation tractable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// The integer type, `int` in source.
    Int,
    /// The type of statements; never written in source.
    Void,
    /// An anonymous struct body, `struct { ... }` in source.
    ///
    /// Each struct is assigned a process-wide unique `id` when it is
    /// constructed during parsing; the emitter names the C struct after it.
    Struct {
        /// Process-wide unique id, used for the emitted `struct s_<id>` tag.
        id: usize,
        /// The struct's members, in declaration order.
        members: Vec<Decl>,
    },
    /// A pointer type, `ptr to T` in source.
    Ptr {
        /// The pointee type. The type checker requires this to be `Named`.
        target: Box<Type>,
    },
    /// A reference to a declared type name.
    ///
    /// Resolution is deferred to the type checker, so a struct may refer to
    /// its own name in a `ptr to` member.
    Named {
        /// The declared type name.
        name: String,
    },
}

/// A single member declaration inside a struct: a type and a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    /// The member's type.
    pub ty: Type,
    /// The member's name.
    pub name: String,
}

impl Type {
    /// Creates a struct type with a fresh process-wide unique id.
    pub fn fresh_struct(members: Vec<Decl>) -> Type {
        Type::Struct {
            id: NEXT_STRUCT_ID.fetch_add(1, Ordering::Relaxed),
            members,
        }
    }

    /// Creates a pointer type to `target`.
    pub fn ptr(target: Type) -> Type {
        Type::Ptr {
            target: Box::new(target),
        }
    }

    /// Creates a named type reference.
    pub fn named(name: impl Into<String>) -> Type {
        Type::Named { name: name.into() }
    }

    /// Type equivalence as used by assignment checking.
    ///
    /// `int` and `void` are equivalent to themselves, pointers are
    /// equivalent when their targets are, and named types are equivalent
    /// when their names match. Two struct bodies are never equivalent:
    /// structs have nominal identity through their enclosing declared name.
    pub fn equiv(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Int, Type::Int) => true,
            (Type::Void, Type::Void) => true,
            (Type::Ptr { target: a }, Type::Ptr { target: b }) => a.equiv(b),
            (Type::Named { name: a }, Type::Named { name: b }) => a == b,
            _ => false,
        }
    }

    /// Returns the pointee type if this is a pointer type.
    pub fn points_to(&self) -> Option<&Type> {
        match self {
            Type::Ptr { target } => Some(target),
            _ => None,
        }
    }

    /// Looks up a member's type if this is a struct type.
    pub fn member_type(&self, member: &str) -> Option<&Type> {
        match self {
            Type::Struct { members, .. } => members
                .iter()
                .find(|decl| decl.name == member)
                .map(|decl| &decl.ty),
            _ => None,
        }
    }
}
