use std::{fmt::Display, path::PathBuf};

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Span};

/// A diagnostic category. The `Display` text is the label printed under the
/// offending source.
pub trait ErrorKind: std::error::Error + Clone {
    /// Stable machine-readable id, used by the JSON output.
    fn id(&self) -> &'static str;

    /// Short headline.
    fn title(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn tip(&self) -> ErrorTip {
        ErrorTip::None
    }
}

/// A diagnostic with the source range it points at.
#[derive(Debug, Clone, PartialEq)]
pub struct Error<K> {
    kind: K,
    span: Span,
}

impl<K: ErrorKind> Error<K> {
    pub fn new(kind: K, span: Span) -> Self {
        Error { kind, span }
    }

    pub fn get_kind(&self) -> &K {
        &self.kind
    }

    pub fn get_span(&self) -> Span {
        self.span
    }

    pub fn get_error_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn get_tip(&self) -> ErrorTip {
        self.kind.tip()
    }
}

impl<K: ErrorKind> Display for Error<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.kind.title(), self.span, self.kind)
    }
}

pub type LexError = Error<LexErrorKind>;
pub type ParseError = Error<ParseErrorKind>;
pub type CfaError = Error<CfaErrorKind>;
pub type ResolveError = Error<ResolveErrorKind>;
pub type TypeCheckError = Error<TypeCheckErrorKind>;

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    #[error("invalid character {character:?}")]
    InvalidCharacter { character: char },
}

impl ErrorKind for LexErrorKind {
    fn id(&self) -> &'static str {
        match self {
            LexErrorKind::InvalidCharacter { .. } => "lex-invalid-char",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            LexErrorKind::InvalidCharacter { .. } => "Invalid character",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LexErrorKind::InvalidCharacter { .. } => "InvalidCharacter",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("unexpected end of file")]
    UnexpectedEof,
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind },
    #[error("expected a type, found {found}")]
    ExpectedType { found: TokenKind },
    #[error("expected an expression, found {found}")]
    ExpectedPrimaryExpression { found: TokenKind },
    #[error("invalid number literal")]
    InvalidNumber,
}

impl ErrorKind for ParseErrorKind {
    fn id(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedEof => "parse-unexpected-eof",
            ParseErrorKind::UnexpectedToken { .. } => "parse-unexpected-token",
            ParseErrorKind::ExpectedType { .. } => "parse-expected-type",
            ParseErrorKind::ExpectedPrimaryExpression { .. } => "parse-expected-primary-expr",
            ParseErrorKind::InvalidNumber => "parse-invalid-number",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedEof => "Unexpected end of file",
            ParseErrorKind::UnexpectedToken { .. } => "Unexpected token",
            ParseErrorKind::ExpectedType { .. } => "Expected type",
            ParseErrorKind::ExpectedPrimaryExpression { .. } => "Expected primary expression",
            ParseErrorKind::InvalidNumber => "Invalid number",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedEof => "UnexpectedEof",
            ParseErrorKind::UnexpectedToken { .. } => "UnexpectedToken",
            ParseErrorKind::ExpectedType { .. } => "ExpectedType",
            ParseErrorKind::ExpectedPrimaryExpression { .. } => "ExpectedPrimaryExpression",
            ParseErrorKind::InvalidNumber => "InvalidNumber",
        }
    }

    fn tip(&self) -> ErrorTip {
        match self {
            ParseErrorKind::UnexpectedToken {
                expected: TokenKind::Semicolon,
                ..
            } => ErrorTip::Suggestion(String::from("did you miss a semicolon?")),
            ParseErrorKind::ExpectedType { .. } => {
                ErrorTip::Suggestion(String::from("types are `void`, `number`, `&T` or `fn(..): T`"))
            }
            _ => ErrorTip::None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CfaErrorKind {
    #[error("statements after `break` are unreachable")]
    EarlyBreakStmt,
    #[error("statements after `return` are unreachable")]
    EarlyReturnStmt,
    #[error("`break` outside of a loop")]
    InvalidBreakStmt,
}

impl ErrorKind for CfaErrorKind {
    fn id(&self) -> &'static str {
        match self {
            CfaErrorKind::EarlyBreakStmt => "cfa-early-break-stmt",
            CfaErrorKind::EarlyReturnStmt => "cfa-early-return-stmt",
            CfaErrorKind::InvalidBreakStmt => "cfa-invalid-break-stmt",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            CfaErrorKind::EarlyBreakStmt => "Early break statement",
            CfaErrorKind::EarlyReturnStmt => "Early return statement",
            CfaErrorKind::InvalidBreakStmt => "Invalid break statement",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            CfaErrorKind::EarlyBreakStmt => "EarlyBreakStmt",
            CfaErrorKind::EarlyReturnStmt => "EarlyReturnStmt",
            CfaErrorKind::InvalidBreakStmt => "InvalidBreakStmt",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveErrorKind {
    #[error("cannot find `{name}` in this scope")]
    UnknownIdentifier { name: String },
    #[error("function `{name}` is already defined")]
    DuplicateFunction { name: String },
}

impl ErrorKind for ResolveErrorKind {
    fn id(&self) -> &'static str {
        match self {
            ResolveErrorKind::UnknownIdentifier { .. } => "resolve-unknown-identifier",
            ResolveErrorKind::DuplicateFunction { .. } => "resolve-duplicate-function",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ResolveErrorKind::UnknownIdentifier { .. } => "Unknown identifier",
            ResolveErrorKind::DuplicateFunction { .. } => "Duplicate function",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ResolveErrorKind::UnknownIdentifier { .. } => "UnknownIdentifier",
            ResolveErrorKind::DuplicateFunction { .. } => "DuplicateFunction",
        }
    }

    fn tip(&self) -> ErrorTip {
        match self {
            ResolveErrorKind::UnknownIdentifier { name } => ErrorTip::Suggestion(format!(
                "declare `{}` with `let` or `var` before using it",
                name
            )),
            ResolveErrorKind::DuplicateFunction { .. } => ErrorTip::None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeCheckErrorKind {
    #[error("expected {expected}, found {found}")]
    InvalidReturn { expected: String, found: String },
    #[error("expected {expected}, found {found}")]
    InvalidAssignment { expected: String, found: String },
    #[error("mismatched operands `{lhs}` and `{rhs}`")]
    InvalidBinaryOperation { lhs: String, rhs: String },
    #[error("cannot call `{callee}` with ({args})")]
    InvalidCall { callee: String, args: String },
    #[error("cannot index `{base}` with `{index}`")]
    InvalidIndex { base: String, index: String },
}

impl ErrorKind for TypeCheckErrorKind {
    fn id(&self) -> &'static str {
        match self {
            TypeCheckErrorKind::InvalidReturn { .. } => "type-check-invalid-return",
            TypeCheckErrorKind::InvalidAssignment { .. } => "type-check-invalid-assignment",
            TypeCheckErrorKind::InvalidBinaryOperation { .. } => {
                "type-check-invalid-binary-operation"
            }
            TypeCheckErrorKind::InvalidCall { .. } => "type-check-invalid-call",
            TypeCheckErrorKind::InvalidIndex { .. } => "type-check-invalid-index",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            TypeCheckErrorKind::InvalidReturn { .. } => "Invalid return",
            TypeCheckErrorKind::InvalidAssignment { .. } => "Invalid assignment",
            TypeCheckErrorKind::InvalidBinaryOperation { .. } => "Invalid binary operation",
            TypeCheckErrorKind::InvalidCall { .. } => "Invalid call",
            TypeCheckErrorKind::InvalidIndex { .. } => "Invalid index",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            TypeCheckErrorKind::InvalidReturn { .. } => "InvalidReturn",
            TypeCheckErrorKind::InvalidAssignment { .. } => "InvalidAssignment",
            TypeCheckErrorKind::InvalidBinaryOperation { .. } => "InvalidBinaryOperation",
            TypeCheckErrorKind::InvalidCall { .. } => "InvalidCall",
            TypeCheckErrorKind::InvalidIndex { .. } => "InvalidIndex",
        }
    }
}

/// Failures of the driver itself, as opposed to diagnostics about the
/// program being compiled.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("usage: {0}")]
    Usage(String),
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("{0} contains no tokens")]
    EmptyInput(String),
    #[error("{name} is {len} bytes; sources are limited to {} bytes", crate::MAX_SOURCE_LEN)]
    SourceTooLarge { name: String, len: usize },
    #[error("failed to serialize diagnostics: {0}")]
    Json(#[from] serde_json::Error),
    #[error("code generation failed: {0}")]
    Codegen(String),
    #[cfg(feature = "llvm")]
    #[error("code generation failed: {0}")]
    Builder(#[from] inkwell::builder::BuilderError),
    #[error("this build has no LLVM backend; rebuild with `--features llvm`")]
    CodegenUnavailable,
}
