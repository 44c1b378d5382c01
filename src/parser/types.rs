//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - `void` and `number`
//! - Pointer types (`&T`, including `&&T` which lexes as one token)
//! - Function types (`fn(T, ..): R`)
//!
//! Like expressions, types are parsed through a handler table keyed on the
//! current token. Every parsed type is interned in the parser's type table.

use std::collections::HashMap;

use crate::{
    errors::{ParseError, ParseErrorKind},
    lexer::tokens::TokenKind,
    typing::TypeRef,
};

use super::parser::Parser;

/// Type alias for type handler functions.
pub type TypeNUDHandler<'a> = fn(&mut Parser<'a>) -> Result<TypeRef<'a>, ParseError>;

/// Type alias for the type handler lookup table.
pub type TypeNUDLookup<'a> = HashMap<TokenKind, TypeNUDHandler<'a>>;

/// Initializes the type parsing lookup table.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser<'_>) {
    parser.type_nud(TokenKind::Void, parse_void_type);
    parser.type_nud(TokenKind::NumberType, parse_number_type);
    parser.type_nud(TokenKind::Amp, parse_pointer_type);
    parser.type_nud(TokenKind::And, parse_pointer_type);
    parser.type_nud(TokenKind::Fn, parse_fn_type);
}

pub fn parse_type<'a>(parser: &mut Parser<'a>) -> Result<TypeRef<'a>, ParseError> {
    let handler = parser.get_type_nud_handler().ok_or_else(|| {
        parser.error_here(ParseErrorKind::ExpectedType {
            found: parser.current_token_kind(),
        })
    })?;

    handler(parser)
}

pub fn parse_void_type<'a>(parser: &mut Parser<'a>) -> Result<TypeRef<'a>, ParseError> {
    parser.expect(TokenKind::Void)?;
    Ok(parser.types().void_type())
}

pub fn parse_number_type<'a>(parser: &mut Parser<'a>) -> Result<TypeRef<'a>, ParseError> {
    parser.expect(TokenKind::NumberType)?;
    Ok(parser.types().number_type())
}

pub fn parse_pointer_type<'a>(parser: &mut Parser<'a>) -> Result<TypeRef<'a>, ParseError> {
    let token = parser.advance();
    let pointee = parse_type(parser)?;
    let pointer = parser.types().pointer(pointee);

    // `&&` is a single token.
    if token.kind == TokenKind::And {
        return Ok(parser.types().pointer(pointer));
    }
    Ok(pointer)
}

pub fn parse_fn_type<'a>(parser: &mut Parser<'a>) -> Result<TypeRef<'a>, ParseError> {
    parser.expect(TokenKind::Fn)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            params.push(parse_type(parser)?);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Colon)?;
    let ret = parse_type(parser)?;

    Ok(parser.types().function(&params, ret))
}
