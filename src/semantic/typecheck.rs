//! The structural type checking pass.
//!
//! Walks the AST with two scoped environments: `Types` (type name to type,
//! populated only at program top level) and `Vars` (variable name to type).
//! The pass also caches every dereference's pointee type on its AST node for
//! the emitter.

use crate::ast::{Block, Expr, Program, Ref, Stmt, Type, TypeDecl, VarDecl};

use super::error::SemanticError;
use super::scope::ScopeChain;

pub(super) struct TypeChecker {
    types: ScopeChain<Type>,
    vars: ScopeChain<Type>,
}

impl TypeChecker {
    pub(super) fn new() -> Self {
        TypeChecker {
            types: ScopeChain::new(),
            vars: ScopeChain::new(),
        }
    }

    pub(super) fn check_program(&mut self, program: &mut Program) -> Result<(), SemanticError> {
        for typedecl in &program.typedecls {
            self.check_typedecl(typedecl)?;
        }
        for vardecl in &program.vardecls {
            self.check_vardecl(vardecl)?;
        }
        self.check_block(&mut program.block)
    }

    fn check_typedecl(&mut self, decl: &TypeDecl) -> Result<(), SemanticError> {
        // Declare before descending so duplicate names are caught first;
        // named-type resolution is deferred, so self-reference is fine.
        self.types.declare(&decl.name, decl.ty.clone())?;
        self.check_type(&decl.ty)?;
        if !matches!(decl.ty, Type::Struct { .. }) {
            return Err(SemanticError::non_struct_named());
        }
        Ok(())
    }

    fn check_vardecl(&mut self, decl: &VarDecl) -> Result<(), SemanticError> {
        self.check_type(&decl.ty)?;
        self.vars.declare(&decl.name, decl.ty.clone())
    }

    /// Structural check of a type expression.
    ///
    /// Named types are accepted unconditionally here; they are resolved
    /// through the type environment when actually used.
    fn check_type(&mut self, ty: &Type) -> Result<(), SemanticError> {
        match ty {
            Type::Int | Type::Void | Type::Named { .. } => Ok(()),
            Type::Struct { members, .. } => {
                for member in members {
                    self.check_type(&member.ty)?;
                    if matches!(member.ty, Type::Struct { .. }) {
                        return Err(SemanticError::nested_struct());
                    }
                }
                Ok(())
            }
            Type::Ptr { target } => {
                self.check_type(target)?;
                if matches!(**target, Type::Named { .. }) {
                    Ok(())
                } else {
                    Err(SemanticError::unnamed_pointer_target())
                }
            }
        }
    }

    fn check_block(&mut self, block: &mut Block) -> Result<(), SemanticError> {
        self.types.enter();
        self.vars.enter();
        let result = block
            .stmts
            .iter_mut()
            .try_for_each(|stmt| self.check_stmt(stmt));
        self.vars.exit();
        self.types.exit();
        result
    }

    fn check_stmt(&mut self, stmt: &mut Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::While { condition, body } => {
                self.check_expr(condition)?;
                self.check_block(body)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.check_expr(condition)?;
                self.check_block(then_branch)?;
                self.check_block(else_branch)
            }
            Stmt::Free(target) => {
                let ty = self.check_ref(target)?;
                if ty.points_to().is_none() {
                    return Err(SemanticError::not_a_pointer(&ty));
                }
                Ok(())
            }
            Stmt::Print(expr) => {
                let ty = self.check_expr(expr)?;
                if !ty.equiv(&Type::Int) {
                    return Err(SemanticError::not_an_int(&ty));
                }
                Ok(())
            }
            Stmt::Assign { target, value } => {
                let lhs = self.check_ref(target)?;
                let rhs = self.check_expr(value)?;
                if rhs.equiv(&lhs) {
                    Ok(())
                } else {
                    Err(SemanticError::type_mismatch(&lhs, &rhs))
                }
            }
        }
    }

    fn check_expr(&mut self, expr: &mut Expr) -> Result<Type, SemanticError> {
        match expr {
            Expr::IntConst(_) => Ok(Type::Int),
            Expr::Ref(r) => self.check_ref(r),
            Expr::BinOp { lhs, rhs, .. } => {
                let lhs_ty = self.check_expr(lhs)?;
                let rhs_ty = self.check_expr(rhs)?;
                if !lhs_ty.equiv(&Type::Int) {
                    return Err(SemanticError::not_an_int(&lhs_ty));
                }
                if !rhs_ty.equiv(&Type::Int) {
                    return Err(SemanticError::not_an_int(&rhs_ty));
                }
                Ok(Type::Int)
            }
            Expr::Malloc(ty) => Ok(Type::ptr(ty.clone())),
            Expr::Valid(inner) => {
                let ty = self.check_expr(inner)?;
                if ty.points_to().is_none() {
                    return Err(SemanticError::not_a_pointer(&ty));
                }
                Ok(Type::Int)
            }
        }
    }

    fn check_ref(&mut self, r: &mut Ref) -> Result<Type, SemanticError> {
        match r {
            Ref::Var(name) => self
                .vars
                .lookup(name)
                .cloned()
                .ok_or_else(|| SemanticError::not_declared(name)),
            Ref::Dotted { source, member } => {
                let source_ty = self.check_ref(source)?;
                let resolved = self.resolve(&source_ty)?;
                resolved
                    .member_type(member)
                    .cloned()
                    .ok_or_else(|| SemanticError::no_such_member(&resolved, member))
            }
            Ref::DeRef { source, dest_type } => {
                let source_ty = self.check_ref(source)?;
                match source_ty.points_to() {
                    Some(dest) => {
                        let dest = dest.clone();
                        *dest_type = Some(dest.clone());
                        Ok(dest)
                    }
                    None => Err(SemanticError::not_a_pointer(&source_ty)),
                }
            }
        }
    }

    /// Resolves a named type through the type environment; other types
    /// resolve to themselves.
    fn resolve(&self, ty: &Type) -> Result<Type, SemanticError> {
        match ty {
            Type::Named { name } => self
                .types
                .lookup(name)
                .cloned()
                .ok_or_else(|| SemanticError::not_declared(name)),
            other => Ok(other.clone()),
        }
    }
}
