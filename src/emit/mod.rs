//! C code generation for checked Eightebed programs.
//!
//! The emitter lowers a [`CheckedProgram`] to one portable C translation
//! unit, compilable by a C89/C99 compiler against the C standard library
//! alone. Emission is a pure function of the AST and the [`EmitOptions`]:
//! identical inputs produce identical output bytes.
//!
//! # The invalidation runtime
//!
//! Every output embeds a small runtime built around a smart-pointer struct:
//!
//! ```c
//! typedef struct _ptr { void *p; int valid; } _ptr;
//! ```
//!
//! `free` must invalidate not just the freed pointer but every live alias
//! of it. For each named struct type `T` the emitter generates a *marker*
//! `mark_T(_ptr victim, T* self)` that walks `self`'s pointer-typed
//! members: a member aliasing the victim is invalidated, any other valid
//! member is recursed into. A program-wide root marker applies the same
//! rule to every global pointer variable, so `_8ebed_free` can blank every
//! alias reachable from the root set before the heap block is released.
//!
//! Global variables are emitted at C file scope on purpose: C zero-
//! initializes them, so every pointer starts out with `valid == 0`.

#[cfg(test)]
mod tests;

use std::io::{self, Write};

use crate::ast::{Block, Expr, Program, Ref, Stmt, Type, TypeDecl, VarDecl};
use crate::semantic::CheckedProgram;

/// Options controlling code generation.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Opaque banner text naming the producer of the generated C.
    pub pedigree: String,
    /// When true, define `TRACE_MARKING` so the marker trace statements
    /// compiled into every output become active.
    pub trace_marking: bool,
    /// The printf conversion used for pointer values in marking traces.
    ///
    /// The corresponding C argument is cast to `long`, so the conversion
    /// should consume a `long`-sized value.
    pub pointer_format: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            pedigree: "eightebed".to_string(),
            trace_marking: false,
            pointer_format: "$%08lx".to_string(),
        }
    }
}

/// Lowers a checked program to C source on `sink`.
///
/// # Errors
///
/// Only I/O errors from the sink are possible; the emitter itself assumes a
/// well-checked AST and has no failure modes of its own.
pub fn emit<W: Write>(
    checked: &CheckedProgram,
    sink: &mut W,
    options: &EmitOptions,
) -> io::Result<()> {
    Emitter { sink, options }.program(checked.program())
}

/// The embedded smart-pointer runtime.
const RUNTIME: &str = r#"typedef struct _ptr {
  void *p;
  int valid;
} _ptr;

static void _8ebed_invalidate(_ptr *ptr) {
  ptr->valid = 0;
}

static int _8ebed_valid(_ptr ptr) {
  return ptr.valid;
}

static int _8ebed_is_alias(_ptr a, _ptr b) {
  return a.p == b.p;
}

static _ptr _8ebed_malloc(size_t size) {
  _ptr ptr;
  ptr.p = malloc(size);
  ptr.valid = (ptr.p != NULL);
  if (ptr.p != NULL) {
    memset(ptr.p, 0, size);
  }
  return ptr;
}

static void _mark__root(_ptr);
static void _8ebed_free(_ptr *ptr) {
  if (!_8ebed_valid(*ptr)) return;
  _mark__root(*ptr);
  free(ptr->p);
  _8ebed_invalidate(ptr);
}
"#;

struct Emitter<'a, W: Write> {
    sink: &'a mut W,
    options: &'a EmitOptions,
}

impl<'a, W: Write> Emitter<'a, W> {
    fn program(&mut self, program: &Program) -> io::Result<()> {
        writeln!(
            self.sink,
            "/* Achtung!  This Source was Automatically Generated by {}! */",
            self.options.pedigree
        )?;
        writeln!(self.sink, "#include <stdlib.h>")?;
        writeln!(self.sink, "#include <stdio.h>")?;
        writeln!(self.sink, "#include <string.h>")?;
        writeln!(self.sink, "#include <assert.h>")?;
        writeln!(self.sink)?;
        if self.options.trace_marking {
            writeln!(self.sink, "#define TRACE_MARKING 1")?;
        }
        self.sink.write_all(RUNTIME.as_bytes())?;
        writeln!(self.sink)?;
        for typedecl in &program.typedecls {
            self.typedecl(typedecl)?;
        }
        for vardecl in &program.vardecls {
            self.vardecl(vardecl)?;
        }
        self.root_marker(&program.vardecls)?;
        writeln!(self.sink, "int main(int argc, char **argv) {{")?;
        self.block(&program.block)?;
        writeln!(self.sink, "}}")?;
        Ok(())
    }

    /// The C rendition of a type as it appears in declarations and casts.
    fn c_type(ty: &Type) -> String {
        match ty {
            Type::Int => "int".to_string(),
            Type::Void => "void".to_string(),
            Type::Named { name } => name.clone(),
            // The comment preserves the Eightebed-level target type.
            Type::Ptr { target } => format!("/* {}* */ _ptr", Self::c_type(target)),
            Type::Struct { id, .. } => format!("struct s_{}", id),
        }
    }

    /// Emits the typedef, struct body, and marker for one type declaration.
    ///
    /// The type checker guarantees the declared type is a struct.
    fn typedecl(&mut self, decl: &TypeDecl) -> io::Result<()> {
        let Type::Struct { id, members } = &decl.ty else {
            unreachable!("type declaration of a non-struct survived checking");
        };
        writeln!(self.sink, "typedef struct s_{} {};", id, decl.name)?;
        writeln!(self.sink, "struct s_{} {{", id)?;
        for member in members {
            writeln!(self.sink, "  {} {};", Self::c_type(&member.ty), member.name)?;
        }
        writeln!(self.sink, "}};")?;

        writeln!(
            self.sink,
            "static void mark_{}(_ptr victim, {}* self) {{",
            decl.name, decl.name
        )?;
        let trace = format!(
            "{} @{} {}",
            self.options.pointer_format, decl.name, self.options.pointer_format
        );
        self.trace_line("BEGIN", &trace, ", (long)victim.p, (long)self")?;
        for member in members {
            if let Type::Ptr { target } = &member.ty {
                let target_name = Self::c_type(target);
                writeln!(
                    self.sink,
                    "  if (_8ebed_is_alias(victim, self->{})) {{",
                    member.name
                )?;
                writeln!(self.sink, "    _8ebed_invalidate(&self->{});", member.name)?;
                writeln!(
                    self.sink,
                    "  }} else if (_8ebed_valid(self->{})) {{",
                    member.name
                )?;
                writeln!(
                    self.sink,
                    "    mark_{}(victim, ({} *)(self->{}.p));",
                    target_name, target_name, member.name
                )?;
                writeln!(self.sink, "  }}")?;
            }
        }
        self.trace_line("END", &trace, ", (long)victim.p, (long)self")?;
        writeln!(self.sink, "}}")?;
        writeln!(self.sink)?;
        Ok(())
    }

    fn vardecl(&mut self, decl: &VarDecl) -> io::Result<()> {
        writeln!(self.sink, "{} {};", Self::c_type(&decl.ty), decl.name)
    }

    /// Emits the program-wide root marker over the global pointer
    /// variables; marking begins here on every free.
    fn root_marker(&mut self, vardecls: &[VarDecl]) -> io::Result<()> {
        writeln!(self.sink, "static void _mark__root(_ptr victim) {{")?;
        let trace = format!("{} @root", self.options.pointer_format);
        self.trace_line("BEGIN", &trace, ", (long)victim.p")?;
        for decl in vardecls {
            if let Type::Ptr { target } = &decl.ty {
                let target_name = Self::c_type(target);
                writeln!(
                    self.sink,
                    "  if (_8ebed_is_alias(victim, {})) {{",
                    decl.name
                )?;
                writeln!(self.sink, "    _8ebed_invalidate(&{});", decl.name)?;
                writeln!(self.sink, "  }} else if (_8ebed_valid({})) {{", decl.name)?;
                writeln!(
                    self.sink,
                    "    mark_{}(victim, ({} *){}.p);",
                    target_name, target_name, decl.name
                )?;
                writeln!(self.sink, "  }}")?;
            }
        }
        self.trace_line("END", &trace, ", (long)victim.p")?;
        writeln!(self.sink, "}}")?;
        writeln!(self.sink)?;
        Ok(())
    }

    /// Emits one `#ifdef TRACE_MARKING` fprintf with the pointer format
    /// interpolated into the literal.
    fn trace_line(&mut self, phase: &str, formats: &str, args: &str) -> io::Result<()> {
        writeln!(self.sink, "#ifdef TRACE_MARKING")?;
        writeln!(
            self.sink,
            "fprintf(stderr, \"-> {} marking {}\\n\"{});",
            phase, formats, args
        )?;
        writeln!(self.sink, "#endif")?;
        Ok(())
    }

    fn block(&mut self, block: &Block) -> io::Result<()> {
        for stmt in &block.stmts {
            self.stmt(stmt)?;
        }
        Ok(())
    }

    fn stmt(&mut self, stmt: &Stmt) -> io::Result<()> {
        match stmt {
            Stmt::While { condition, body } => {
                write!(self.sink, "while(")?;
                self.expr(condition)?;
                writeln!(self.sink, ") {{")?;
                self.block(body)?;
                writeln!(self.sink, "}}")
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(self.sink, "if(")?;
                self.expr(condition)?;
                writeln!(self.sink, ") {{")?;
                self.block(then_branch)?;
                writeln!(self.sink, "}} else {{")?;
                self.block(else_branch)?;
                writeln!(self.sink, "}}")
            }
            Stmt::Free(target) => {
                write!(self.sink, "_8ebed_free(&")?;
                self.reference(target)?;
                writeln!(self.sink, ");")
            }
            Stmt::Print(expr) => {
                write!(self.sink, "printf(\"%d \", ")?;
                self.expr(expr)?;
                writeln!(self.sink, ");")
            }
            Stmt::Assign { target, value } => {
                self.reference(target)?;
                write!(self.sink, " = ")?;
                self.expr(value)?;
                writeln!(self.sink, ";")
            }
        }
    }

    fn expr(&mut self, expr: &Expr) -> io::Result<()> {
        match expr {
            Expr::IntConst(value) => write!(self.sink, "{}", value),
            Expr::Ref(r) => self.reference(r),
            Expr::BinOp { lhs, op, rhs } => {
                write!(self.sink, "(")?;
                self.expr(lhs)?;
                write!(self.sink, " {} ", op.c_op())?;
                self.expr(rhs)?;
                write!(self.sink, ")")
            }
            Expr::Malloc(ty) => {
                write!(self.sink, "_8ebed_malloc(sizeof({}))", Self::c_type(ty))
            }
            Expr::Valid(inner) => {
                write!(self.sink, "_8ebed_valid(")?;
                self.expr(inner)?;
                write!(self.sink, ")")
            }
        }
    }

    fn reference(&mut self, r: &Ref) -> io::Result<()> {
        match r {
            Ref::Var(name) => write!(self.sink, "{}", name),
            // Source syntax is `[r].m`; C syntax is plain member access.
            Ref::Dotted { source, member } => {
                self.reference(source)?;
                write!(self.sink, ".{}", member)
            }
            Ref::DeRef { source, dest_type } => {
                let dest = match dest_type {
                    Some(ty) => Self::c_type(ty),
                    None => unreachable!("dereference not annotated by the type checker"),
                };
                write!(self.sink, "(*({} *)", dest)?;
                self.reference(source)?;
                write!(self.sink, ".p)")
            }
        }
    }
}
