//! Unit tests for code generation.

use super::generate;
use crate::{
    alloc::Arena, analysis, errors::CompileError, lexer::lexer::tokenize, parser::parse,
    typing::TypeTable,
};

fn compile(source: &str) -> Result<String, CompileError> {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);
    let result = parse(tokenize(source).tokens, &arena, &types, "test");

    assert!(result.errors.is_empty());
    assert!(analysis::analyze(result.module).is_empty());
    assert!(analysis::resolve(result.module).is_empty());
    assert!(analysis::check(result.module, &types).is_empty());

    generate(result.module)
}

#[test]
fn test_functions_and_calls() {
    let ir = compile(
        "fn main(): number { return add(1, 2); } \
         fn add(a: number, b: number): number { let sum = a + b; return sum; }",
    )
    .unwrap();

    assert!(ir.contains("define double @main()"));
    assert!(ir.contains("define double @add(double"));
    assert!(ir.contains("call double @add(double 1.000000e+00, double 2.000000e+00)"));
    assert!(ir.contains("fadd double"));
}

#[test]
fn test_loops_and_conditions() {
    let ir = compile(
        "fn count(n: number): number { \
            var i = 0; \
            while 1 { if i >= n { break; } i = i + 1; } \
            return i; \
         }",
    )
    .unwrap();

    assert!(ir.contains("fcmp oge double"));
    assert!(ir.contains("br label %cond"));
    assert!(ir.contains("br label %after"));
}

#[test]
fn test_void_function_falls_through() {
    let ir = compile("fn f(p: &number): void { p[0] = 1; }").unwrap();

    assert!(ir.contains("define void @f(double*"));
    assert!(ir.contains("getelementptr double, double*"));
    assert!(ir.contains("ret void"));
}

#[test]
fn test_function_values() {
    let ir = compile(
        "fn twice(f: fn(number): number, x: number): number { return f(f(x)); } \
         fn inc(x: number): number { return x + 1; } \
         fn main(): number { return twice(inc, 1); }",
    )
    .unwrap();

    assert!(ir.contains("double (double)*"));
    assert!(ir.contains("@inc"));
}
