//! Common test utilities for Eightebed integration tests.
//!
//! This module provides shared helpers used across the integration test
//! files: running the library pipeline, compiling the generated C with the
//! system C compiler, and executing the result.

// Each test file is compiled as a separate crate, so not all functions
// are used in every test file. This is expected behavior.
#![allow(dead_code)]

use std::fs;
use std::process::Command;

use tempfile::tempdir;

use eightebed::emit::{EmitOptions, emit};
use eightebed::parser::parse;
use eightebed::semantic::check;

/// Returns the path to the eightebed binary built by cargo.
pub fn eightebed_binary() -> String {
    env!("CARGO_BIN_EXE_eightebed").to_string()
}

/// Returns true when a system C compiler is available.
///
/// End-to-end tests call this first and skip (with a message) when no C
/// compiler can be found, so the unit suite still passes on bare machines.
pub fn have_c_compiler() -> bool {
    Command::new("cc")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Generates C for an Eightebed program with the given options.
pub fn generate_c(source: &str, options: &EmitOptions) -> Result<String, String> {
    let program = parse(source).map_err(|e| format!("parse error: {}", e))?;
    let checked = check(program).map_err(|e| format!("check error: {}", e))?;
    let mut out = Vec::new();
    emit(&checked, &mut out, options).map_err(|e| format!("emit error: {}", e))?;
    String::from_utf8(out).map_err(|e| format!("emitted C is not UTF-8: {}", e))
}

/// Compiles an Eightebed program to a native executable and runs it,
/// returning the program's stdout.
pub fn compile_and_run(source: &str) -> Result<String, String> {
    compile_and_run_with(source, &EmitOptions::default())
}

/// Like [`compile_and_run`], with explicit emit options.
pub fn compile_and_run_with(source: &str, options: &EmitOptions) -> Result<String, String> {
    let c_source = generate_c(source, options)?;

    let dir = tempdir().map_err(|e| format!("failed to create temp dir: {}", e))?;
    let c_path = dir.path().join("program.c");
    let exe_path = dir.path().join("program");
    fs::write(&c_path, c_source).map_err(|e| format!("failed to write C source: {}", e))?;

    let output = Command::new("cc")
        .arg("-o")
        .arg(&exe_path)
        .arg(&c_path)
        .output()
        .map_err(|e| format!("failed to run cc: {}", e))?;
    if !output.status.success() {
        return Err(format!(
            "cc failed with {}:\n{}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let output = Command::new(&exe_path)
        .output()
        .map_err(|e| format!("failed to run compiled program: {}", e))?;
    if !output.status.success() {
        return Err(format!("compiled program failed with {}", output.status));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
