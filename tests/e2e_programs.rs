//! End-to-end tests: compile generated C with the system C compiler, run
//! the executable, and check its stdout.
//!
//! Every expected string is part of the language's output contract,
//! including the trailing space printed after each integer.

mod common;

use common::{compile_and_run, compile_and_run_with, have_c_compiler};
use eightebed::emit::EmitOptions;
use eightebed::fixtures;

macro_rules! require_c_compiler {
    () => {
        if !have_c_compiler() {
            eprintln!("skipping: no system C compiler found");
            return;
        }
    };
}

#[test]
fn test_simple_assign_prints_nothing() {
    require_c_compiler!();
    assert_eq!(compile_and_run(fixtures::SIMPLE_OK).unwrap(), "");
}

#[test]
fn test_arithmetic_and_precedence() {
    require_c_compiler!();
    assert_eq!(compile_and_run(fixtures::SIMPLE_ARITH).unwrap(), "4 ");
}

#[test]
fn test_loop_counts_down() {
    require_c_compiler!();
    assert_eq!(compile_and_run(fixtures::LOOP_1).unwrap(), "5 4 3 2 1 ");
}

#[test]
fn test_allocated_values_zeroed_and_null_links_invalid() {
    require_c_compiler!();
    // The fresh node's value prints as 0; its next link is null with
    // valid == 0, so the inner `if valid` filters out the 99.
    assert_eq!(
        compile_and_run(fixtures::ALLOCATED_VALUES_INITIALIZED).unwrap(),
        "0 "
    );
}

#[test]
fn test_free_invalidates_the_pointer() {
    require_c_compiler!();
    // valid(jim) is 0 immediately after `free jim`, so 42 is never printed.
    assert_eq!(compile_and_run(fixtures::FREE_INVALIDATES).unwrap(), "53 ");
}

#[test]
fn test_allocating_loop_prints_nothing() {
    require_c_compiler!();
    assert_eq!(compile_and_run(fixtures::ALLOCATING_LOOP).unwrap(), "");
}

#[test]
fn test_alias_invalidation_stops_list_walk() {
    require_c_compiler!();
    // bertie aliases the node stored when i = 87. Freeing bertie marks the
    // whole root-reachable graph, so the predecessor's next link (an alias
    // of the freed block) is invalidated and the walk stops exactly there.
    assert_eq!(
        compile_and_run(fixtures::ALIAS_IS_INVALIDATED).unwrap(),
        "100 99 98 97 96 95 94 93 92 91 90 89 88 "
    );
}

#[test]
fn test_allocate_and_free_loop_keeps_survivor() {
    require_c_compiler!();
    assert_eq!(
        compile_and_run(fixtures::ALLOCATE_AND_FREE_LOOP).unwrap(),
        "50 "
    );
}

#[test]
fn test_trace_marking_does_not_change_stdout() {
    require_c_compiler!();
    // Traces go to stderr; stdout is part of the language contract.
    let options = EmitOptions {
        trace_marking: true,
        ..EmitOptions::default()
    };
    assert_eq!(
        compile_and_run_with(fixtures::FREE_INVALIDATES, &options).unwrap(),
        "53 "
    );
}

#[test]
fn test_nested_safe_area_program_runs() {
    require_c_compiler!();
    // The link was allocated in the first safe area, so the nested
    // `if valid [@jim].next` passes and the zeroed value prints.
    assert_eq!(
        compile_and_run(fixtures::DEREFERENCE_WITHIN_NESTED_SAFE_AREA).unwrap(),
        "0 "
    );
}
