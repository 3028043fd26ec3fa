//! The validity-flow analysis pass.
//!
//! Tracks, at each program point, the set of variable names known to hold
//! valid pointers. The set grows only one way: entering the then-branch of
//! an `if valid x` inserts `x` into a child context. Any assignment or
//! `free` clears the *entire* context chain, because the analyzer does not
//! track which assertions an arbitrary write could invalidate.
//!
//! The effect is that the only pointer a program may dereference is one
//! whose name literally appears in the condition of an enclosing
//! `if valid x`, with no assignment or free since that test.

use std::collections::HashSet;

use crate::ast::{Block, Expr, Program, Ref, Stmt};

use super::error::SemanticError;

/// A chainable set of names currently known to be valid pointers.
pub(super) struct ValidityContext {
    scopes: Vec<HashSet<String>>,
}

impl ValidityContext {
    pub(super) fn new() -> Self {
        ValidityContext {
            scopes: vec![HashSet::new()],
        }
    }

    fn enter(&mut self) {
        self.scopes.push(HashSet::new());
    }

    fn exit(&mut self) {
        debug_assert!(self.scopes.len() > 1, "exit() without matching enter()");
        self.scopes.pop();
    }

    fn assert_valid(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string());
        }
    }

    fn is_valid(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains(name))
    }

    /// Drops every assertion in the chain, parents included.
    fn clear_all(&mut self) {
        for scope in &mut self.scopes {
            scope.clear();
        }
    }
}

pub(super) struct FlowAnalyzer {
    context: ValidityContext,
}

impl FlowAnalyzer {
    pub(super) fn new() -> Self {
        FlowAnalyzer {
            context: ValidityContext::new(),
        }
    }

    pub(super) fn analyze_program(&mut self, program: &Program) -> Result<(), SemanticError> {
        self.analyze_block(&program.block)
    }

    fn analyze_block(&mut self, block: &Block) -> Result<(), SemanticError> {
        block
            .stmts
            .iter()
            .try_for_each(|stmt| self.analyze_stmt(stmt))
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::While { condition, body } => {
                self.analyze_expr(condition)?;
                self.analyze_block(body)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.analyze_expr(condition)?;
                // If the test is exactly `valid x`, x is known valid
                // throughout the then-branch.
                self.context.enter();
                if let Expr::Valid(inner) = condition {
                    if let Expr::Ref(Ref::Var(name)) = &**inner {
                        self.context.assert_valid(name);
                    }
                }
                let then_result = self.analyze_block(then_branch);
                self.context.exit();
                then_result?;
                // The else-branch never sees the assertion.
                self.analyze_block(else_branch)
            }
            Stmt::Free(target) => {
                self.analyze_ref(target, false)?;
                // End of safe area: any alias may now be invalid.
                self.context.clear_all();
                Ok(())
            }
            Stmt::Print(expr) => self.analyze_expr(expr),
            Stmt::Assign { target, value } => {
                self.analyze_ref(target, false)?;
                self.analyze_expr(value)?;
                // End of safe area: the write may have re-bound a pointer.
                self.context.clear_all();
                Ok(())
            }
        }
    }

    fn analyze_expr(&mut self, expr: &Expr) -> Result<(), SemanticError> {
        match expr {
            Expr::IntConst(_) | Expr::Malloc(_) => Ok(()),
            Expr::Ref(r) => self.analyze_ref(r, false),
            Expr::BinOp { lhs, rhs, .. } => {
                self.analyze_expr(lhs)?;
                self.analyze_expr(rhs)
            }
            Expr::Valid(inner) => self.analyze_expr(inner),
        }
    }

    /// Visits a reference; `deref` is true when the visit crossed a `@`.
    fn analyze_ref(&self, r: &Ref, deref: bool) -> Result<(), SemanticError> {
        match r {
            Ref::Var(name) => {
                if deref && !self.context.is_valid(name) {
                    return Err(SemanticError::unsafe_dereference(name));
                }
                Ok(())
            }
            // `[r].m` itself needs no validity, but the mode propagates to
            // whatever `r` dereferences.
            Ref::Dotted { source, .. } => self.analyze_ref(source, deref),
            Ref::DeRef { source, .. } => self.analyze_ref(source, true),
        }
    }
}
