use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("void", TokenKind::Void);
        map.insert("number", TokenKind::NumberType);
        map.insert("let", TokenKind::Let);
        map.insert("var", TokenKind::Var);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("break", TokenKind::Break);
        map.insert("return", TokenKind::Return);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    Identifier,
    Comment,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Amp,

    Dot,
    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,

    // Reserved
    Fn,
    Void,
    NumberType,
    Let,
    Var,
    If,
    Else,
    While,
    Break,
    Return,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A token borrowing its text from the source buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub value: &'a str,
    pub span: Span,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[TokenKind::Identifier, TokenKind::Number, TokenKind::Comment]) {
            write!(f, "{} ({}) @ {}", self.kind, self.value, self.span)
        } else {
            write!(f, "{} @ {}", self.kind, self.span)
        }
    }
}

impl Token<'_> {
    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
