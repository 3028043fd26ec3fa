//! Static analysis for Eightebed programs.
//!
//! This module provides [`check`], which validates a parsed [`Program`] in
//! two passes before code generation:
//!
//! 1. **Type checking** ([`typecheck`](self)): structural rules over two
//!    scoped environments. The key shape restriction is that pointers may
//!    only point to named struct types, which is what makes free-time
//!    invalidation tractable.
//! 2. **Validity-flow analysis** ([`validity`](self)): decides, at every
//!    dereference site, whether the pointer is provably valid there.
//!
//! # Pipeline Position
//!
//! ```text
//! Source → Lexer → Parser → TypeChecker → FlowAnalyzer → Emitter → C
//! ```
//!
//! `check` consumes the program and returns a [`CheckedProgram`], the
//! witness type the emitter requires: if checking succeeds, emission cannot
//! fail.

mod error;
mod scope;
mod typecheck;
mod validity;

#[cfg(test)]
mod tests;

pub use error::{SemanticError, SemanticErrorKind};
pub use scope::ScopeChain;

use crate::ast::Program;
use typecheck::TypeChecker;
use validity::FlowAnalyzer;

/// A program that has passed both static analysis passes.
///
/// Holding one of these is proof that every dereference is annotated with
/// its target type and provably valid at its site.
#[derive(Debug)]
pub struct CheckedProgram {
    program: Program,
}

impl CheckedProgram {
    /// Returns the checked program's AST.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Unwraps the AST, discarding the checked witness.
    pub fn into_program(self) -> Program {
        self.program
    }
}

/// Runs both static analysis passes over a parsed program.
///
/// Type checking annotates each dereference with its pointee type; the
/// flow pass then verifies every dereference happens inside a safe area.
///
/// # Errors
///
/// Returns the first [`SemanticError`] either pass encounters. There is no
/// recovery and there are no warnings; an error aborts the pipeline.
pub fn check(mut program: Program) -> Result<CheckedProgram, SemanticError> {
    TypeChecker::new().check_program(&mut program)?;
    FlowAnalyzer::new().analyze_program(&program)?;
    Ok(CheckedProgram { program })
}
