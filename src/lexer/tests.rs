//! Unit tests for the lexer module.
//!
//! Covers keywords, identifiers, numbers, operators, comments and the
//! recovery from invalid characters.

use pretty_assertions::assert_eq;

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};
use crate::{errors::LexErrorKind, Span};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).tokens.iter().map(|token| token.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("fn void number let var if else while break return"),
        vec![
            TokenKind::Fn,
            TokenKind::Void,
            TokenKind::NumberType,
            TokenKind::Let,
            TokenKind::Var,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Break,
            TokenKind::Return,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let result = tokenize("foo baz_123 _under returned");
    let values: Vec<_> = result.tokens.iter().map(|token| token.value).collect();

    assert!(result.errors.is_empty());
    assert_eq!(values, vec!["foo", "baz_123", "_under", "returned", ""]);
    assert!(result.tokens[..4]
        .iter()
        .all(|token| token.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_numbers() {
    let result = tokenize("42 3.14 0");

    assert_eq!(result.tokens[0].value, "42");
    assert_eq!(result.tokens[1].value, "3.14");
    assert_eq!(result.tokens[1].span, Span::new(3, 7));
    assert_eq!(result.tokens[2].kind, TokenKind::Number);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("= == ! != < <= > >= && || & + - * /"),
        vec![
            TokenKind::Assignment,
            TokenKind::Equals,
            TokenKind::Not,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::LessEquals,
            TokenKind::Greater,
            TokenKind::GreaterEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Amp,
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("(){}[],.:;"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_comments() {
    let source = "let x = 1; // trailing\nx";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );

    let result = Lexer::new(source).with_comments(true).tokenize();
    let comment = result
        .tokens
        .iter()
        .find(|token| token.kind == TokenKind::Comment)
        .unwrap();
    assert_eq!(comment.value, "// trailing");
}

#[test]
fn test_invalid_characters_are_collected() {
    let result = tokenize("let @ x # = 1;");

    assert_eq!(result.errors.len(), 2);
    assert_eq!(
        result.errors[0].get_kind(),
        &LexErrorKind::InvalidCharacter { character: '@' }
    );
    assert_eq!(result.errors[0].get_span(), Span::new(4, 5));
    assert_eq!(result.errors[1].get_span(), Span::new(8, 9));
    // Scanning went on after both errors.
    assert_eq!(result.tokens.len(), 6);
}

#[test]
fn test_eof_span() {
    let result = tokenize("fn  ");
    let eof = result.tokens.last().unwrap();

    assert_eq!(eof.kind, TokenKind::EOF);
    assert_eq!(eof.span, Span::new(4, 4));
    assert_eq!(tokenize("").tokens.len(), 1);
}
