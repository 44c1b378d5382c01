//! Unit tests for error handling.
//!
//! This module contains tests for error kinds and error reporting.

use std::path::PathBuf;

use pretty_assertions::assert_eq;

use super::{
    errors::{
        CfaErrorKind, CompileError, Error, ErrorKind, ErrorTip, LexErrorKind, ParseErrorKind,
        ResolveErrorKind, TypeCheckErrorKind,
    },
    report::{ErrorFormat, JsonDiagnostic, Reporter},
};
use crate::{lexer::tokens::TokenKind, source::SourceFile, Span};

const SOURCE: &str = "let a = 1;\nlet b = ;\n";

fn missing_expression() -> Error<ParseErrorKind> {
    Error::new(
        ParseErrorKind::ExpectedPrimaryExpression {
            found: TokenKind::Semicolon,
        },
        Span::new(19, 20),
    )
}

#[test]
fn test_error_accessors() {
    let error = Error::new(LexErrorKind::InvalidCharacter { character: '@' }, Span::new(4, 5));

    assert_eq!(error.get_error_name(), "InvalidCharacter");
    assert_eq!(error.get_span(), Span::new(4, 5));
    assert_eq!(
        error.get_kind(),
        &LexErrorKind::InvalidCharacter { character: '@' }
    );
    assert_eq!(
        error.to_string(),
        "Invalid character at 4..5: invalid character '@'"
    );
}

#[test]
fn test_error_ids_are_stable() {
    assert_eq!(
        LexErrorKind::InvalidCharacter { character: '$' }.id(),
        "lex-invalid-char"
    );
    assert_eq!(ParseErrorKind::UnexpectedEof.id(), "parse-unexpected-eof");
    assert_eq!(CfaErrorKind::EarlyBreakStmt.id(), "cfa-early-break-stmt");
    assert_eq!(CfaErrorKind::InvalidBreakStmt.name(), "InvalidBreakStmt");
    assert_eq!(
        ResolveErrorKind::DuplicateFunction {
            name: String::from("f")
        }
        .id(),
        "resolve-duplicate-function"
    );
    assert_eq!(
        TypeCheckErrorKind::InvalidReturn {
            expected: String::from("`number`"),
            found: String::from("nothing"),
        }
        .to_string(),
        "expected `number`, found nothing"
    );
}

#[test]
fn test_error_tips() {
    let missing_semicolon = ParseErrorKind::UnexpectedToken {
        expected: TokenKind::Semicolon,
        found: TokenKind::CloseCurly,
    };
    assert_eq!(missing_semicolon.tip().to_string(), "did you miss a semicolon?");

    let missing_paren = ParseErrorKind::UnexpectedToken {
        expected: TokenKind::CloseParen,
        found: TokenKind::CloseCurly,
    };
    assert!(matches!(missing_paren.tip(), ErrorTip::None));

    let unknown = ResolveErrorKind::UnknownIdentifier {
        name: String::from("y"),
    };
    assert_eq!(
        unknown.tip().to_string(),
        "declare `y` with `let` or `var` before using it"
    );
}

#[test]
fn test_text_report() {
    let file = SourceFile::new("test.lang", SOURCE);
    let mut out = Vec::new();

    Reporter::new(&file)
        .report_text(&[missing_expression()], &mut out)
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "  --> Error at test.lang:2:9: Expected primary expression
   |
 2 | let b = ;
   |         ^ expected an expression, found Semicolon
"
    );
}

#[test]
fn test_text_report_with_tip_and_underline() {
    let file = SourceFile::new("test.lang", "fn f(): void {\n  g()\n}\n");
    let errors = [
        Error::new(
            ParseErrorKind::UnexpectedToken {
                expected: TokenKind::Semicolon,
                found: TokenKind::CloseCurly,
            },
            Span::new(21, 22),
        ),
        Error::new(
            ParseErrorKind::ExpectedType {
                found: TokenKind::OpenCurly,
            },
            Span::new(17, 20),
        ),
    ];
    let mut out = Vec::new();

    Reporter::new(&file).report_text(&errors, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "  --> Error at test.lang:3:1: Unexpected token
   |
 3 | }
   | ^ expected Semicolon, found CloseCurly
   = help: did you miss a semicolon?
   |
  --> Error at test.lang:2:3: Expected type
   |
 2 |   g()
   |   ^~~ expected a type, found OpenCurly
   = help: types are `void`, `number`, `&T` or `fn(..): T`
"
    );
}

#[test]
fn test_json_report() {
    let file = SourceFile::new("test.lang", SOURCE);
    let mut out = Vec::new();

    Reporter::new(&file)
        .report(ErrorFormat::Json, &[missing_expression()], &mut out)
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "[{\"id\":\"parse-expected-primary-expr\",\"loc\":\"test.lang:2:9\"}]\n"
    );
}

#[test]
fn test_max_errors() {
    let file = SourceFile::new("test.lang", SOURCE);
    let errors = [
        missing_expression(),
        Error::new(ParseErrorKind::UnexpectedEof, Span::new(21, 21)),
    ];
    let reporter = Reporter::new(&file).with_max_errors(1);

    assert_eq!(
        reporter.to_json(&errors),
        vec![JsonDiagnostic {
            id: "parse-expected-primary-expr",
            loc: String::from("test.lang:2:9"),
        }]
    );

    let mut out = Vec::new();
    reporter.report_text(&errors, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().matches("-->").count(), 1);
}

#[test]
fn test_compile_error_messages() {
    let error = CompileError::Io {
        path: PathBuf::from("missing.lang"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    };
    assert_eq!(error.to_string(), "could not read missing.lang: not found");

    let error = CompileError::EmptyInput(String::from("empty.lang"));
    assert_eq!(error.to_string(), "empty.lang contains no tokens");
}
