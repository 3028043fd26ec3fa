//! Unit tests for the static analysis passes.

use super::*;
use crate::ast::{Ref, Stmt};
use crate::fixtures;
use crate::parser::parse;

fn check_source(source: &str) -> Result<CheckedProgram, SemanticError> {
    check(parse(source).unwrap_or_else(|e| panic!("fixture failed to parse: {}", e)))
}

fn check_error(source: &str) -> SemanticError {
    match check_source(source) {
        Ok(_) => panic!("expected checking to fail for {:?}", source),
        Err(e) => e,
    }
}

// ===================
// Accepted programs
// ===================

#[test]
fn test_simple_ok_is_accepted() {
    assert!(check_source(fixtures::SIMPLE_OK).is_ok());
}

#[test]
fn test_runtime_fixtures_are_accepted() {
    for source in [
        fixtures::SIMPLE_ARITH,
        fixtures::LOOP_1,
        fixtures::ALLOCATED_VALUES_INITIALIZED,
        fixtures::ALLOCATING_LOOP,
        fixtures::FREE_INVALIDATES,
        fixtures::ALIAS_IS_INVALIDATED,
        fixtures::ALLOCATE_AND_FREE_LOOP,
    ] {
        check_source(source).unwrap_or_else(|e| panic!("rejected: {}\n{}", e, source));
    }
}

#[test]
fn test_dereference_within_nested_safe_area_is_accepted() {
    // An outer `if valid jim` assertion survives into a nested
    // `if valid [@jim].next` branch: validity contexts chain.
    assert!(check_source(fixtures::DEREFERENCE_WITHIN_NESTED_SAFE_AREA).is_ok());
}

#[test]
fn test_checking_annotates_dereferences() {
    let checked = check_source("type node struct { int value; ptr to node next; } ; var ptr to node jim; { if valid jim { print [@jim].value; } }");
    let program = checked.unwrap();
    let if_stmt = &program.program().block.stmts[0];
    let Stmt::If { then_branch, .. } = if_stmt else {
        panic!("expected an if statement");
    };
    let Stmt::Print(crate::ast::Expr::Ref(Ref::Dotted { source, .. })) = &then_branch.stmts[0]
    else {
        panic!("expected print of a member access");
    };
    match &**source {
        Ref::DeRef { dest_type, .. } => {
            assert_eq!(dest_type.as_ref(), Some(&crate::ast::Type::named("node")));
        }
        other => panic!("expected a dereference, got {:?}", other),
    }
}

// ===================
// Type errors
// ===================

#[test]
fn test_double_declaration() {
    let err = check_error(fixtures::DOUBLE_DECLARATION);
    assert_eq!(err.kind(), SemanticErrorKind::AlreadyDeclared);
    assert_eq!(err.message(), "jim already declared");
}

#[test]
fn test_ptr_to_ptr() {
    let err = check_error(fixtures::PTR_TO_PTR);
    assert_eq!(err.kind(), SemanticErrorKind::UnnamedPointerTarget);
    assert_eq!(err.message(), "Pointer type must point to named type");
}

#[test]
fn test_ptr_to_int() {
    let err = check_error(fixtures::PTR_TO_INT);
    assert_eq!(err.message(), "Pointer type must point to named type");
}

#[test]
fn test_struct_within_struct() {
    let err = check_error(fixtures::STRUCT_WITHIN_STRUCT);
    assert_eq!(err.kind(), SemanticErrorKind::NestedStruct);
    assert_eq!(err.message(), "Structs may not contain other structs");
}

#[test]
fn test_named_int() {
    let err = check_error(fixtures::NAMED_INT);
    assert_eq!(err.kind(), SemanticErrorKind::NonStructNamed);
    assert_eq!(err.message(), "Only structs may be named");
}

#[test]
fn test_undeclared_variable() {
    let err = check_error("{ jim = 4; }");
    assert_eq!(err.kind(), SemanticErrorKind::NotDeclared);
}

#[test]
fn test_print_of_pointer_is_rejected() {
    let err = check_error(
        "type node struct { int value; } ; var ptr to node jim; { print jim; }",
    );
    assert_eq!(err.kind(), SemanticErrorKind::NotAnInt);
}

#[test]
fn test_free_of_int_is_rejected() {
    let err = check_error("var int jim; { free jim; }");
    assert_eq!(err.kind(), SemanticErrorKind::NotAPointer);
}

#[test]
fn test_valid_of_int_is_rejected() {
    let err = check_error("var int jim; { if valid jim { print 1; } }");
    assert_eq!(err.kind(), SemanticErrorKind::NotAPointer);
}

#[test]
fn test_assignment_type_mismatch() {
    let err = check_error(
        "type node struct { int value; } ; var ptr to node jim; var int i; { i = jim; }",
    );
    assert_eq!(err.kind(), SemanticErrorKind::TypeMismatch);
}

#[test]
fn test_missing_member() {
    let err = check_error(
        "type node struct { int value; } ; var node jim; { print [jim].missing; }",
    );
    assert_eq!(err.kind(), SemanticErrorKind::NoSuchMember);
}

#[test]
fn test_binop_over_pointer_is_rejected() {
    let err = check_error(
        "type node struct { int value; } ; var ptr to node jim; { print (jim + 1); }",
    );
    assert_eq!(err.kind(), SemanticErrorKind::NotAnInt);
}

// ===================
// Flow errors
// ===================

#[test]
fn test_dereference_outside_conditional() {
    let err = check_error(fixtures::DEREFERENCE_OUTSIDE_CONDITIONAL);
    assert_eq!(err.kind(), SemanticErrorKind::UnsafeDereference);
    assert_eq!(
        err.message(),
        "Attempt to dereference jim in non-safe context"
    );
}

#[test]
fn test_dereference_after_reassignment_in_safe_area() {
    let err = check_error(fixtures::DEREFERENCE_OUTSIDE_SAFE_AREA);
    assert_eq!(
        err.message(),
        "Attempt to dereference jim in non-safe context"
    );
}

#[test]
fn test_dereference_after_free_of_alias() {
    let err = check_error(fixtures::DEREFERENCE_AFTER_FREE);
    assert_eq!(
        err.message(),
        "Attempt to dereference jim in non-safe context"
    );
}

#[test]
fn test_else_branch_is_not_a_safe_area() {
    let err = check_error(
        "type node struct { int value; } ; var ptr to node jim; \
         { if valid jim { print 1; } else { print [@jim].value; } }",
    );
    assert_eq!(err.kind(), SemanticErrorKind::UnsafeDereference);
}

#[test]
fn test_while_condition_is_not_a_safe_area() {
    let err = check_error(
        "type node struct { int value; } ; var ptr to node jim; \
         { while valid jim { print [@jim].value; } }",
    );
    assert_eq!(err.kind(), SemanticErrorKind::UnsafeDereference);
}

#[test]
fn test_valid_of_compound_expression_asserts_nothing() {
    // Only the syntactic form `valid x` opens a safe area; testing
    // `valid [jim].next` asserts nothing about any name, so the
    // dereference in the branch is still unsafe.
    let err = check_error(
        "type node struct { int value; ptr to node next; } ; var node jim; \
         { if valid [jim].next { print [@[jim].next].value; } }",
    );
    assert_eq!(err.kind(), SemanticErrorKind::UnsafeDereference);
    assert_eq!(
        err.message(),
        "Attempt to dereference jim in non-safe context"
    );
}

#[test]
fn test_dereference_mode_reaches_through_member_access() {
    // `@x` under `[ ... ].m` still requires x itself to be asserted valid;
    // validity never attaches to intermediate links.
    assert!(check_source(
        "type node struct { int value; ptr to node next; } ; var ptr to node jim; \
         { if valid jim { print [@jim].value; } }",
    )
    .is_ok());
}
