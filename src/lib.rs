//! The Eightebed programming language compiler library.
//!
//! Eightebed is a tiny imperative language whose distinguishing feature is
//! memory-safe manual heap management: programs explicitly allocate and
//! free heap nodes through pointer variables, yet dereferencing an invalid
//! pointer is statically impossible. This library is the compiler core that
//! makes that guarantee hold; it lowers checked programs to portable C.
//!
//! # Modules
//!
//! - [`token`] - Token types
//! - [`lexer`] - Regex-driven tokenization
//! - [`parser`] - Predictive parser combinators and the Eightebed grammar
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`semantic`] - Type checking and validity-flow analysis
//! - [`emit`] - C code generation with the invalidation runtime
//! - [`fixtures`] - Built-in test programs, addressable from the CLI
//!
//! # Example
//!
//! ```
//! use eightebed::emit::{emit, EmitOptions};
//! use eightebed::parser::parse;
//! use eightebed::semantic::check;
//!
//! let source = "var int jim; { jim = 4; }";
//!
//! let program = parse(source).expect("parse error");
//! let checked = check(program).expect("check error");
//!
//! let mut c_source = Vec::new();
//! emit(&checked, &mut c_source, &EmitOptions::default()).expect("write error");
//! assert!(String::from_utf8(c_source).unwrap().contains("int main"));
//! ```

pub mod ast;
pub mod emit;
pub mod fixtures;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod token;
