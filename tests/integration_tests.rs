//! Integration tests for end-to-end compilation.
//!
//! These tests drive the public pipeline on in-memory sources: lexing,
//! parsing, control-flow analysis, name resolution and type checking, and
//! the driver that reports their diagnostics.

use std::path::PathBuf;

use langc::{
    alloc::Arena,
    analysis,
    driver::{compile, compile_source, EmitAction, Options, UntilStage},
    errors::{report::ErrorFormat, CompileError},
    lexer::lexer::tokenize,
    parser::parse,
    source::SourceFile,
    typing::TypeTable,
};
use pretty_assertions::assert_eq;

const TWO_FUNCTIONS: &str = "\
fn square(x: number): number {
    let result = x * x;
    return result;
}

fn main(): number {
    let value = square(4);
    return value;
}
";

/// Output of one driver run: success flag, stdout and stderr.
fn run(options: &Options, source: &str) -> (Result<bool, CompileError>, String, String) {
    let file = SourceFile::new("t.lang", source);
    let mut out = Vec::new();
    let mut err = Vec::new();

    let result = compile_source(options, "t", &file, &mut out, &mut err);
    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn test_two_function_module_has_no_diagnostics() {
    let arena = Arena::default();
    let types = TypeTable::new(&arena);

    let lexed = tokenize(TWO_FUNCTIONS);
    assert!(lexed.errors.is_empty());

    let parsed = parse(lexed.tokens, &arena, &types, "two");
    assert!(parsed.errors.is_empty());
    assert_eq!(parsed.module.functions().count(), 2);

    assert!(analysis::analyze(parsed.module).is_empty());
    assert!(analysis::resolve(parsed.module).is_empty());
    assert!(analysis::check(parsed.module, &types).is_empty());

    let number = types.number_type();
    let square = parsed.module.functions().next().unwrap();
    assert_eq!(square.ty.get(), Some(types.function(&[number], number)));
}

#[test]
fn test_arena_reuse_after_reset() {
    let mut arena = Arena::default();

    for _ in 0..2 {
        {
            let types = TypeTable::new(&arena);
            let parsed = parse(tokenize(TWO_FUNCTIONS).tokens, &arena, &types, "two");
            assert!(parsed.errors.is_empty());
            assert!(analysis::resolve(parsed.module).is_empty());
        }
        assert!(arena.total_allocated() > 0);
        arena.reset();
        assert_eq!(arena.total_allocated(), 0);
        assert_eq!(arena.block_count(), 1);
    }
}

#[test]
fn test_driver_success_with_ast_output() {
    let mut options = Options::new("t.lang");
    options.emit = Some(EmitAction::Ast);

    let (result, out, err) = run(&options, TWO_FUNCTIONS);

    assert!(result.unwrap());
    assert_eq!(err, "");
    assert!(out.starts_with("Module: t\n  FnDecl: square: number\n"));
    assert!(out.contains("Identifier: square => Function(square) : fn(number): number"));
    assert!(out.contains("Call : number"));
}

#[test]
fn test_driver_reports_first_failing_stage_only() {
    let source = "fn main(): void {\n    y = 1;\n}\n";
    let (result, out, err) = run(&Options::new("t.lang"), source);

    assert!(!result.unwrap());
    assert_eq!(out, "");
    assert_eq!(
        err,
        "  --> Error at t.lang:2:5: Unknown identifier
   |
 2 |     y = 1;
   |     ^ cannot find `y` in this scope
   = help: declare `y` with `let` or `var` before using it
"
    );
}

#[test]
fn test_driver_type_errors() {
    let source = "fn f(): number { return; }\nfn g(): void { return 1; }\n";
    let mut options = Options::new("t.lang");
    options.error_format = ErrorFormat::Json;

    let (result, _, err) = run(&options, source);

    assert!(!result.unwrap());
    assert_eq!(
        err,
        "[{\"id\":\"type-check-invalid-return\",\"loc\":\"t.lang:1:18\"},\
         {\"id\":\"type-check-invalid-return\",\"loc\":\"t.lang:2:16\"}]\n"
    );
}

#[test]
fn test_driver_json_lex_errors() {
    let mut options = Options::new("t.lang");
    options.error_format = ErrorFormat::Json;

    let (result, _, err) = run(&options, "fn f(): void { @ }");

    assert!(!result.unwrap());
    assert_eq!(err, "[{\"id\":\"lex-invalid-char\",\"loc\":\"t.lang:1:16\"}]\n");
}

#[test]
fn test_driver_max_errors() {
    let mut options = Options::new("t.lang");
    options.error_format = ErrorFormat::Json;
    options.max_errors = 1;

    let (result, _, err) = run(&options, "fn f(): void { a; b; c; }");

    assert!(!result.unwrap());
    assert_eq!(
        err,
        "[{\"id\":\"resolve-unknown-identifier\",\"loc\":\"t.lang:1:16\"}]\n"
    );
}

#[test]
fn test_driver_until_lex_skips_parsing() {
    let mut options = Options::new("t.lang");
    options.until = Some(UntilStage::Lex);
    options.emit = Some(EmitAction::Lex);

    let (result, out, err) = run(&options, "fn f(): void {");

    assert!(result.unwrap());
    assert_eq!(err, "");
    assert_eq!(
        out,
        "\
Fn @ 0..2
Identifier (f) @ 3..4
OpenParen @ 4..5
CloseParen @ 5..6
Colon @ 6..7
Void @ 8..12
OpenCurly @ 13..14
EOF @ 14..14
"
    );
}

#[test]
fn test_driver_until_ast_skips_analysis() {
    let mut options = Options::new("t.lang");
    options.until = Some(UntilStage::Ast);

    let (result, _, err) = run(&options, "fn f(): void { break; undefined; }");

    assert!(result.unwrap());
    assert_eq!(err, "");
}

#[test]
fn test_driver_emit_src() {
    let mut options = Options::new("t.lang");
    options.emit = Some(EmitAction::Src);
    options.until = Some(UntilStage::Lex);

    let (result, out, _) = run(&options, TWO_FUNCTIONS);

    assert!(result.unwrap());
    assert_eq!(out, TWO_FUNCTIONS);
}

#[test]
fn test_driver_empty_input() {
    let (result, _, _) = run(&Options::new("t.lang"), "// nothing here\n");

    assert!(matches!(result, Err(CompileError::EmptyInput(name)) if name == "t.lang"));
}

#[test]
fn test_driver_missing_file() {
    let options = Options::new(PathBuf::from("does/not/exist.lang"));
    let result = compile(&options, &mut Vec::<u8>::new(), &mut Vec::<u8>::new());

    assert!(matches!(result, Err(CompileError::Io { .. })));
}

#[cfg(not(feature = "llvm"))]
#[test]
fn test_driver_llvm_output_needs_backend() {
    let mut options = Options::new("t.lang");
    options.emit = Some(EmitAction::Llvm);

    let (result, _, _) = run(&options, TWO_FUNCTIONS);

    assert!(matches!(result, Err(CompileError::CodegenUnavailable)));
}

#[cfg(feature = "llvm")]
#[test]
fn test_driver_llvm_output() {
    let mut options = Options::new("t.lang");
    options.emit = Some(EmitAction::Llvm);

    let (result, out, _) = run(&options, TWO_FUNCTIONS);

    assert!(result.unwrap());
    assert!(out.contains("define double @square(double"));
}
