//! Unit tests for the parser module.
//!
//! Covers declarations, precedence, statements, types and error recovery.

use pretty_assertions::assert_eq;

use super::parser::parse;
use crate::{
    alloc::Arena,
    ast::{printer::AstPrinter, ExprKind, StmtKind},
    errors::ParseErrorKind,
    lexer::{lexer::tokenize, tokens::TokenKind},
    typing::TypeTable,
    Span,
};

#[test]
fn test_parse_fn_decl() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let result = parse(
        tokenize("fn add(a: number, b: number): number { return a + b; }").tokens,
        &arena,
        &types,
        "test",
    );

    assert!(result.errors.is_empty());
    assert_eq!(result.module.name, "test");

    let function = result.module.functions().next().unwrap();
    assert_eq!(function.name, "add");
    assert_eq!(function.ret_ty, types.number_type());
    let params: Vec<_> = function.params.iter().map(|param| param.name).collect();
    assert_eq!(params, vec!["a", "b"]);
    assert!(function.params.iter().all(|param| param.is_const));
    assert_eq!(function.params.front().unwrap().declared_ty, Some(types.number_type()));
    assert_eq!(function.body.stmts.len(), 1);
}

#[test]
fn test_operator_precedence() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let source = "fn main(): void { x = 1 + 2 * 3; y = -a + b; c || d && e; }";
    let result = parse(tokenize(source).tokens, &arena, &types, "test");

    assert!(result.errors.is_empty());
    assert_eq!(
        AstPrinter::print(result.module),
        "\
Module: test
  FnDecl: main: void
    Block
      Assign
        Identifier: x
        Binary: +
          Number: 1
          Binary: *
            Number: 2
            Number: 3
      Assign
        Identifier: y
        Binary: +
          Unary: -
            Identifier: a
          Identifier: b
      ExprStmt
        Binary: ||
          Identifier: c
          Binary: &&
            Identifier: d
            Identifier: e
"
    );
}

#[test]
fn test_left_associativity_and_grouping() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let source = "fn main(): void { 8 - 4 - 2; (1 < 2) == !0; }";
    let result = parse(tokenize(source).tokens, &arena, &types, "test");

    assert!(result.errors.is_empty());
    assert_eq!(
        AstPrinter::print(result.module),
        "\
Module: test
  FnDecl: main: void
    Block
      ExprStmt
        Binary: -
          Binary: -
            Number: 8
            Number: 4
          Number: 2
      ExprStmt
        Binary: ==
          Grouped
            Binary: <
              Number: 1
              Number: 2
          Unary: !
            Number: 0
"
    );
}

#[test]
fn test_call_and_index() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let source = "fn main(): void { f(1, x)[2]; g(); }";
    let result = parse(tokenize(source).tokens, &arena, &types, "test");

    assert!(result.errors.is_empty());
    let body = result.module.functions().next().unwrap().body;
    let stmts: Vec<_> = body.stmts.iter().collect();

    let StmtKind::Expr(first) = &stmts[0].kind else {
        panic!("expected an expression statement");
    };
    let ExprKind::Index(index) = &first.expr.kind else {
        panic!("expected an index expression");
    };
    let ExprKind::Call(call) = &index.base.kind else {
        panic!("expected a call expression");
    };
    assert_eq!(call.args.len(), 2);
    assert_eq!(first.expr.span, Span::new(18, 28));

    let StmtKind::Expr(second) = &stmts[1].kind else {
        panic!("expected an expression statement");
    };
    let ExprKind::Call(call) = &second.expr.kind else {
        panic!("expected a call expression");
    };
    assert!(call.args.is_empty());
}

#[test]
fn test_locals_and_types() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let source = "fn main(): void { let a = 1; var b: &&number; var f: fn(number, &number): void; }";
    let result = parse(tokenize(source).tokens, &arena, &types, "test");

    assert!(result.errors.is_empty());
    let body = result.module.functions().next().unwrap().body;
    let locals: Vec<_> = body
        .stmts
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::Local(local) => local,
            _ => panic!("expected a local"),
        })
        .collect();

    let number = types.number_type();
    assert!(locals[0].is_const);
    assert!(locals[0].init.is_some());
    assert_eq!(locals[0].declared_ty, None);
    assert!(!locals[1].is_const);
    assert_eq!(locals[1].declared_ty, Some(types.pointer(types.pointer(number))));
    assert_eq!(
        locals[2].declared_ty,
        Some(types.function(&[number, types.pointer(number)], types.void_type()))
    );
}

#[test]
fn test_control_flow_statements() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let source = "\
fn main(): void {
    while 1 { if a { break; } else if b { return; } else { c; } }
}";
    let result = parse(tokenize(source).tokens, &arena, &types, "test");

    assert!(result.errors.is_empty());
    assert_eq!(
        AstPrinter::print(result.module),
        "\
Module: test
  FnDecl: main: void
    Block
      While
        Number: 1
        Block
          If
            Identifier: a
            Block
              Break: (unresolved)
            If
              Identifier: b
              Block
                Return
              Block
                ExprStmt
                  Identifier: c
"
    );
}

#[test]
fn test_statement_recovery() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let source = "fn main(): void { let = 1; x; y = ; z; }";
    let result = parse(tokenize(source).tokens, &arena, &types, "test");

    assert_eq!(result.errors.len(), 2);
    assert_eq!(
        result.errors[0].get_kind(),
        &ParseErrorKind::UnexpectedToken {
            expected: TokenKind::Identifier,
            found: TokenKind::Assignment,
        }
    );
    assert_eq!(
        result.errors[1].get_kind(),
        &ParseErrorKind::ExpectedPrimaryExpression {
            found: TokenKind::Semicolon,
        }
    );

    // `x;` and `z;` survive.
    let function = result.module.functions().next().unwrap();
    assert_eq!(function.body.stmts.len(), 2);
}

#[test]
fn test_declaration_recovery() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let source = "let x = 1; fn a(: void {} fn b(): void {}";
    let result = parse(tokenize(source).tokens, &arena, &types, "test");

    assert_eq!(result.errors.len(), 2);
    assert_eq!(
        result.errors[0].get_kind(),
        &ParseErrorKind::UnexpectedToken {
            expected: TokenKind::Fn,
            found: TokenKind::Let,
        }
    );
    let names: Vec<_> = result.module.functions().map(|function| function.name).collect();
    assert_eq!(names, vec!["b"]);
}

#[test]
fn test_single_eof_error() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let source = "fn main(): void { let x = (1 +";
    let result = parse(tokenize(source).tokens, &arena, &types, "test");

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].get_kind(), &ParseErrorKind::UnexpectedEof);
    assert_eq!(result.errors[0].get_span(), Span::new(30, 30));
    assert!(result.module.decls.is_empty());
}

#[test]
fn test_expected_type() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let result = parse(tokenize("fn main(): x {}").tokens, &arena, &types, "test");

    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].get_kind(),
        &ParseErrorKind::ExpectedType {
            found: TokenKind::Identifier,
        }
    );
}

#[test]
fn test_empty_input() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let result = parse(vec![], &arena, &types, "empty");

    assert!(result.errors.is_empty());
    assert!(result.module.decls.is_empty());
}
