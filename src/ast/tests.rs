//! Unit tests for the AST module.
//!
//! Covers the visitor's dispatch and default traversal, node helpers and
//! the printer.

use pretty_assertions::assert_eq;

use super::{
    printer::AstPrinter,
    visitor::{self, Visitor},
    BinOpKind, BlockStmt, BreakStmt, Expr, IdentifierExpr, Module, NumberExpr, Stmt, WhileStmt,
};
use crate::{alloc::Arena, lexer::lexer::tokenize, parser::parse, typing::TypeTable};

fn parse_ok<'a>(source: &'a str, arena: &'a Arena, types: &'a TypeTable<'a>) -> &'a Module<'a> {
    let result = parse(tokenize(source).tokens, arena, types, "test");
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    result.module
}

/// Records the kinds of the nodes it is dispatched to, in visiting order.
#[derive(Default)]
struct Trace(Vec<String>);

impl<'a> Visitor<'a> for Trace {
    fn visit_block(&mut self, block: &'a BlockStmt<'a>) {
        self.0.push(format!("block({})", block.stmts.len()));
        visitor::walk_block(self, block);
    }

    fn visit_break(&mut self, _stmt: &'a Stmt<'a>, _break_stmt: &'a BreakStmt<'a>) {
        self.0.push(String::from("break"));
    }

    fn visit_number(&mut self, _expr: &'a Expr<'a>, number: &'a NumberExpr) {
        self.0.push(format!("number({})", number.value));
    }

    fn visit_identifier(&mut self, _expr: &'a Expr<'a>, identifier: &'a IdentifierExpr<'a>) {
        self.0.push(format!("ident({})", identifier.name));
    }
}

#[test]
fn test_visitor_default_traversal_reaches_leaves() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let module = parse_ok(
        "fn f(a: number): void { while a < 3 { g(a)[1] = -(2); break; } }",
        &arena,
        &types,
    );

    let mut trace = Trace::default();
    trace.visit_module(module);

    assert_eq!(
        trace.0,
        vec![
            "block(1)", "ident(a)", "number(3)", "block(2)", "ident(g)", "ident(a)",
            "number(1)", "number(2)", "break",
        ]
    );
}

/// Counts loops without descending into them.
#[derive(Default)]
struct ShallowLoops {
    loops: usize,
    identifiers: usize,
}

impl<'a> Visitor<'a> for ShallowLoops {
    fn visit_while(&mut self, _stmt: &'a Stmt<'a>, _while_stmt: &'a WhileStmt<'a>) {
        self.loops += 1;
    }

    fn visit_identifier(&mut self, _expr: &'a Expr<'a>, _identifier: &'a IdentifierExpr<'a>) {
        self.identifiers += 1;
    }
}

#[test]
fn test_visitor_override_controls_descent() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let module = parse_ok(
        "fn f(): void { x; while a { while b { y; } } if c { while d { } } }",
        &arena,
        &types,
    );

    let mut counter = ShallowLoops::default();
    counter.visit_module(module);

    assert_eq!(counter.loops, 2);
    // `x` and `c`; loop conditions and bodies are skipped.
    assert_eq!(counter.identifiers, 2);
}

#[test]
fn test_module_functions_in_source_order() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let module = parse_ok("fn b(): void {} fn a(): void {} fn c(): void {}", &arena, &types);

    let names: Vec<_> = module.functions().map(|f| f.name).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
}

#[test]
fn test_terminators() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let module = parse_ok(
        "fn f(): void { while 1 { x; break; } return; }",
        &arena,
        &types,
    );

    let body = module.functions().next().unwrap().body;
    let flags: Vec<_> = body.stmts.iter().map(|stmt| stmt.is_terminator()).collect();
    assert_eq!(flags, vec![false, true]);
}

#[test]
fn test_binary_operator_classes() {
    assert!(BinOpKind::Le.is_comparison());
    assert!(BinOpKind::Ne.is_comparison());
    assert!(!BinOpKind::Add.is_comparison());
    assert!(BinOpKind::Or.is_logical());
    assert!(!BinOpKind::Eq.is_logical());
    assert_eq!(BinOpKind::Ge.to_string(), ">=");
}

#[test]
fn test_printer_locals_and_calls() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let module = parse_ok(
        "fn f(p: &number): number { var n: number = p[0]; return f(p) == (n); }",
        &arena,
        &types,
    );

    assert_eq!(
        AstPrinter::print(module),
        "\
Module: test
  FnDecl: f: number
    Local: let p : &number
    Block
      Local: var n : number
        Index
          Identifier: p
          Number: 0
      Return
        Binary: ==
          Call
            Identifier: f
            Identifier: p
          Grouped
            Identifier: n
"
    );
}
