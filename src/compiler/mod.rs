//! Code generation module for the compiler.
//!
//! Lowers a checked module to LLVM IR. Only compiled with the `llvm`
//! feature. It handles:
//!
//! - Conversion of interned types to LLVM types
//! - Function declarations and bodies
//! - Compilation of statements and expressions

pub mod compiler;
pub mod expr;
pub mod stmt;

pub use compiler::{generate, Compiler};

#[cfg(test)]
mod tests;
