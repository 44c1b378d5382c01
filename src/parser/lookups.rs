use std::collections::HashMap;

use crate::{
    ast::{Expr, Stmt},
    errors::ParseError,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, weakest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Call,
    Primary,
}

pub type StmtHandler<'a> = fn(&mut Parser<'a>) -> Result<&'a Stmt<'a>, ParseError>;
pub type NUDHandler<'a> = fn(&mut Parser<'a>) -> Result<&'a Expr<'a>, ParseError>;
pub type LEDHandler<'a> =
    fn(&mut Parser<'a>, &'a Expr<'a>, BindingPower) -> Result<&'a Expr<'a>, ParseError>;

pub fn create_token_lookups(parser: &mut Parser<'_>) {
    // Logical
    parser.led(TokenKind::Or, BindingPower::LogicalOr, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::LogicalAnd, parse_binary_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    // Postfix
    parser.led(TokenKind::OpenParen, BindingPower::Call, parse_call_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Call, parse_index_expr);

    // Literals, symbols and prefix operators
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_local_stmt);
    parser.stmt(TokenKind::Var, parse_local_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::Break, parse_break_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::OpenCurly, parse_block_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup<'a> = HashMap<TokenKind, StmtHandler<'a>>;
pub type NUDLookup<'a> = HashMap<TokenKind, NUDHandler<'a>>;
pub type LEDLookup<'a> = HashMap<TokenKind, LEDHandler<'a>>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
