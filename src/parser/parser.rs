//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and parsing functions.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//! Every node is allocated in the arena the parser was given.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers

use std::collections::HashMap;

use crate::{
    adt::IntrusiveList,
    alloc::Arena,
    ast::{Expr, ExprKind, Module, Stmt, StmtKind},
    errors::{ParseError, ParseErrorKind},
    lexer::tokens::{Token, TokenKind},
    typing::TypeTable,
    Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_fn_decl,
    types::{create_token_type_lookups, TypeNUDHandler, TypeNUDLookup},
};

/// Output of [`parse`]. The module holds every declaration that parsed
/// cleanly, even when `errors` is not empty.
#[derive(Debug)]
pub struct ParseResult<'a> {
    pub module: &'a Module<'a>,
    pub errors: Vec<ParseError>,
}

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and maintains lookup tables for
/// parsing statements, expressions, and types. It tracks the current
/// position in the token stream and provides methods for token consumption.
pub struct Parser<'a> {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token<'a>>,
    /// Current position in the token stream
    pos: usize,
    /// Owner of every node the parser creates
    arena: &'a Arena,
    /// Interning table for the types written in the source
    types: &'a TypeTable<'a>,
    /// Errors reported so far
    errors: Vec<ParseError>,
    /// Whether an end-of-file error was already reported
    reported_eof: bool,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup<'a>,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup<'a>,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup<'a>,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type handlers
    type_nud_lookup: TypeNUDLookup<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser instance.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse
    /// * `arena` - Arena that will own the AST
    /// * `types` - Type table shared with the later passes
    ///
    /// # Returns
    ///
    /// A new Parser instance with its lookup tables filled in.
    pub fn new(mut tokens: Vec<Token<'a>>, arena: &'a Arena, types: &'a TypeTable<'a>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map_or(0, |token| token.span.end as usize);
            tokens.push(Token {
                kind: TokenKind::EOF,
                value: "",
                span: Span::new(end, end),
            });
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            arena,
            types,
            errors: vec![],
            reported_eof: false,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);
        parser
    }

    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    pub fn types(&self) -> &'a TypeTable<'a> {
        self.types
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> Token<'a> {
        self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    /// Advances to the next token and returns the previous token.
    /// The cursor never moves past `EOF`.
    pub fn advance(&mut self) -> Token<'a> {
        let token = self.current_token();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Builds an error located at the current token. Any error raised at
    /// the end of input becomes `UnexpectedEof`.
    pub fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        let token = self.current_token();
        if token.kind == TokenKind::EOF {
            ParseError::new(ParseErrorKind::UnexpectedEof, token.span)
        } else {
            ParseError::new(kind, token.span)
        }
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) and advances if the current token matches,
    /// otherwise returns an `UnexpectedToken` error.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token<'a>, ParseError> {
        let kind = self.current_token_kind();
        if kind != expected_kind {
            Err(self.error_here(ParseErrorKind::UnexpectedToken {
                expected: expected_kind,
                found: kind,
            }))
        } else {
            Ok(self.advance())
        }
    }

    /// Checks if there are more tokens to parse.
    ///
    /// # Returns
    ///
    /// Returns true if the current token is not EOF.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Records an error. Only the first end-of-file error is kept.
    pub fn report(&mut self, error: ParseError) {
        if *error.get_kind() == ParseErrorKind::UnexpectedEof {
            if self.reported_eof {
                return;
            }
            self.reported_eof = true;
        }
        tracing::trace!(error = %error, "parse error");
        self.errors.push(error);
    }

    /// Skips to the end of the current statement: past the next `;`, or up
    /// to (not past) the next `}`.
    pub fn synchronize_stmt(&mut self) {
        while self.has_tokens() {
            match self.current_token_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::CloseCurly => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skips to the next `fn`.
    pub fn synchronize_decl(&mut self) {
        while self.has_tokens() && self.current_token_kind() != TokenKind::Fn {
            self.advance();
        }
    }

    pub fn new_expr(&self, kind: ExprKind<'a>, span: Span) -> &'a Expr<'a> {
        self.arena.alloc(Expr::new(kind, span))
    }

    pub fn new_stmt(&self, kind: StmtKind<'a>, span: Span) -> &'a Stmt<'a> {
        self.arena.alloc(Stmt::new(kind, span))
    }

    /// Returns the statement handler for the current token, if any.
    pub fn get_stmt_handler(&self) -> Option<StmtHandler<'a>> {
        self.stmt_lookup.get(&self.current_token_kind()).copied()
    }

    /// Returns the NUD handler for the current token, if any.
    pub fn get_nud_handler(&self) -> Option<NUDHandler<'a>> {
        self.nud_lookup.get(&self.current_token_kind()).copied()
    }

    /// Returns the LED handler for the current token, if any.
    pub fn get_led_handler(&self) -> Option<LEDHandler<'a>> {
        self.led_lookup.get(&self.current_token_kind()).copied()
    }

    /// Returns the binding power of the current token.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Returns the type handler for the current token, if any.
    pub fn get_type_nud_handler(&self) -> Option<TypeNUDHandler<'a>> {
        self.type_nud_lookup.get(&self.current_token_kind()).copied()
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler<'a>) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler<'a>) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler<'a>) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type handler for a token.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler<'a>) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    fn parse_module(&mut self, name: &'a str) -> &'a Module<'a> {
        let mut decls = IntrusiveList::new();

        while self.has_tokens() {
            if self.current_token_kind() != TokenKind::Fn {
                let error = self.error_here(ParseErrorKind::UnexpectedToken {
                    expected: TokenKind::Fn,
                    found: self.current_token_kind(),
                });
                self.report(error);
                self.advance();
                self.synchronize_decl();
                continue;
            }

            match parse_fn_decl(self) {
                Ok(decl) => decls.emplace_back(self.arena, decl),
                Err(error) => {
                    self.report(error);
                    self.synchronize_decl();
                }
            }
        }

        self.arena.alloc(Module { name, decls })
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses function declarations until
/// EOF, recovering from errors along the way.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse
/// * `arena` - Arena that will own the AST
/// * `types` - Type table used for type annotations
/// * `name` - Name given to the module
///
/// # Returns
///
/// The module together with every error that was reported.
pub fn parse<'a>(
    tokens: Vec<Token<'a>>,
    arena: &'a Arena,
    types: &'a TypeTable<'a>,
    name: &'a str,
) -> ParseResult<'a> {
    let mut parser = Parser::new(tokens, arena, types);
    let module = parser.parse_module(name);

    tracing::debug!(
        decls = module.decls.len(),
        errors = parser.errors.len(),
        "parsing finished"
    );
    ParseResult {
        module,
        errors: parser.errors,
    }
}

