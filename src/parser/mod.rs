//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an arena-allocated Abstract Syntax Tree. It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Function declarations and their parameter lists
//! - Statement parsing (locals, assignments, control flow)
//! - Expression parsing (binary ops, calls, indexing, literals)
//! - Type parsing for type annotations
//! - Error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

pub use parser::{parse, ParseResult, Parser};

#[cfg(test)]
mod tests;
