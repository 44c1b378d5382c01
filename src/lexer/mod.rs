//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using anchored regex patterns
//! - Recognition of keywords, identifiers, numbers, and operators
//! - Token spans for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;

pub use lexer::{tokenize, LexResult, Lexer};
pub use tokens::{Token, TokenKind};

#[cfg(test)]
mod tests;
