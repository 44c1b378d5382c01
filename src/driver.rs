//! Command line options and the compilation pipeline.
//!
//! `langc [--error-format=text|json] [--until=lex|ast] [--emit=lex|src|ast|llvm]
//! [--max-errors=N] FILE`

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Once,
};

use crate::{
    alloc::{kilo_bytes, Arena},
    analysis,
    ast::{printer::AstPrinter, Module},
    errors::{
        report::{ErrorFormat, Reporter},
        CompileError, Error, ErrorKind,
    },
    lexer::lexer::tokenize,
    parser::parse,
    source::SourceFile,
    typing::TypeTable,
};

const USAGE: &str =
    "langc [--error-format=text|json] [--until=lex|ast] [--emit=lex|src|ast|llvm] [--max-errors=N] FILE";

/// Stage after which compilation stops successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UntilStage {
    Lex,
    Ast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitAction {
    Lex,
    Src,
    Ast,
    Llvm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub error_format: ErrorFormat,
    pub until: Option<UntilStage>,
    pub emit: Option<EmitAction>,
    pub max_errors: usize,
    pub path: PathBuf,
}

impl Options {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Options {
            error_format: ErrorFormat::Text,
            until: None,
            emit: None,
            max_errors: usize::MAX,
            path: path.into(),
        }
    }

    /// Parses the arguments following the program name.
    pub fn parse_args<I, S>(args: I) -> Result<Options, CompileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut error_format = ErrorFormat::Text;
        let mut until = None;
        let mut emit = None;
        let mut max_errors = usize::MAX;
        let mut path = None;

        for arg in args {
            let arg = arg.as_ref();

            if let Some(value) = arg.strip_prefix("--error-format=") {
                error_format = match value {
                    "text" => ErrorFormat::Text,
                    "json" => ErrorFormat::Json,
                    _ => return Err(invalid_value("--error-format", value)),
                };
            } else if let Some(value) = arg.strip_prefix("--until=") {
                until = Some(match value {
                    "lex" => UntilStage::Lex,
                    "ast" => UntilStage::Ast,
                    _ => return Err(invalid_value("--until", value)),
                });
            } else if let Some(value) = arg.strip_prefix("--emit=") {
                emit = Some(match value {
                    "lex" => EmitAction::Lex,
                    "src" => EmitAction::Src,
                    "ast" => EmitAction::Ast,
                    "llvm" => EmitAction::Llvm,
                    _ => return Err(invalid_value("--emit", value)),
                });
            } else if let Some(value) = arg.strip_prefix("--max-errors=") {
                max_errors = value
                    .parse()
                    .map_err(|_| invalid_value("--max-errors", value))?;
            } else if arg.starts_with("--") {
                return Err(CompileError::Usage(format!("unknown option `{}`\n{}", arg, USAGE)));
            } else if path.replace(PathBuf::from(arg)).is_some() {
                return Err(CompileError::Usage(format!("more than one input file\n{}", USAGE)));
            }
        }

        let path = path.ok_or_else(|| CompileError::Usage(String::from(USAGE)))?;

        Ok(Options {
            error_format,
            until,
            emit,
            max_errors,
            path,
        })
    }
}

fn invalid_value(option: &str, value: &str) -> CompileError {
    CompileError::Usage(format!("invalid value `{}` for `{}`\n{}", value, option, USAGE))
}

/// Module name used for a file: its stem, or `main` when there is none.
fn module_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("main"))
}

static TRACING_INIT: Once = Once::new();

/// Installs a tracing subscriber if `RUST_LOG` is set, e.g.
/// `RUST_LOG=langc=debug`. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Reads the input file and compiles it.
///
/// Returns `Ok(false)` when diagnostics were reported to `err`.
pub fn compile(
    options: &Options,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool, CompileError> {
    let text = fs::read_to_string(&options.path).map_err(|source| CompileError::Io {
        path: options.path.clone(),
        source,
    })?;
    let file = SourceFile::new(options.path.display().to_string(), text);

    compile_source(options, &module_name(&options.path), &file, out, err)
}

/// Runs the pipeline over an in-memory source file, stopping after the first
/// stage that reports diagnostics.
pub fn compile_source(
    options: &Options,
    name: &str,
    file: &SourceFile,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool, CompileError> {
    check_source_len(file.name(), file.text().len())?;

    let pipeline = Pipeline {
        options,
        reporter: Reporter::new(file).with_max_errors(options.max_errors),
        file,
    };
    pipeline.run(name, out, err)
}

fn check_source_len(name: &str, len: usize) -> Result<(), CompileError> {
    if len > crate::MAX_SOURCE_LEN {
        return Err(CompileError::SourceTooLarge {
            name: name.to_string(),
            len,
        });
    }
    Ok(())
}

struct Pipeline<'o> {
    options: &'o Options,
    reporter: Reporter<'o>,
    file: &'o SourceFile,
}

impl Pipeline<'_> {
    fn emits(&self, action: EmitAction) -> bool {
        self.options.emit == Some(action)
    }

    /// Reports `errors` if there are any. Returns whether the stage passed.
    fn stage<K: ErrorKind>(
        &self,
        errors: &[Error<K>],
        err: &mut impl Write,
    ) -> Result<bool, CompileError> {
        if errors.is_empty() {
            return Ok(true);
        }
        self.reporter.report(self.options.error_format, errors, err)?;
        Ok(false)
    }

    fn run(
        &self,
        name: &str,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<bool, CompileError> {
        if self.emits(EmitAction::Src) {
            write!(out, "{}", self.file.text())?;
        }

        let lexed = tokenize(self.file.text());

        if self.emits(EmitAction::Lex) {
            for token in &lexed.tokens {
                writeln!(out, "{}", token)?;
            }
        }

        if !self.stage(&lexed.errors, err)? {
            return Ok(false);
        }
        if lexed.tokens.len() <= 1 {
            return Err(CompileError::EmptyInput(self.file.name().to_string()));
        }
        if self.options.until == Some(UntilStage::Lex) {
            return Ok(true);
        }

        let arena = Arena::new(kilo_bytes(32));
        let types = TypeTable::new(&arena);

        let parsed = parse(lexed.tokens, &arena, &types, name);
        tracing::debug!(
            allocations = arena.total_allocations(),
            bytes = arena.total_allocated(),
            blocks = arena.block_count(),
            "parsed module"
        );

        if self.options.until == Some(UntilStage::Ast) || !parsed.errors.is_empty() {
            self.emit_ast(parsed.module, out)?;
            return self.stage(&parsed.errors, err);
        }

        let passed = self.analyze(parsed.module, &types, err)?;
        self.emit_ast(parsed.module, out)?;

        if !passed {
            return Ok(false);
        }

        self.codegen(parsed.module, out)?;
        Ok(true)
    }

    fn analyze<'a>(
        &self,
        module: &'a Module<'a>,
        types: &'a TypeTable<'a>,
        err: &mut impl Write,
    ) -> Result<bool, CompileError> {
        if !self.stage(&analysis::analyze(module), err)? {
            return Ok(false);
        }
        if !self.stage(&analysis::resolve(module), err)? {
            return Ok(false);
        }

        let errors = analysis::check(module, types);
        tracing::debug!(types = types.num_types(), "interned types");
        self.stage(&errors, err)
    }

    fn emit_ast<'a>(&self, module: &'a Module<'a>, out: &mut impl Write) -> Result<(), CompileError> {
        if self.emits(EmitAction::Ast) {
            write!(out, "{}", AstPrinter::print(module))?;
        }
        Ok(())
    }

    #[cfg(feature = "llvm")]
    fn codegen<'a>(&self, module: &'a Module<'a>, out: &mut impl Write) -> Result<(), CompileError> {
        let ir = crate::compiler::generate(module)?;
        if self.emits(EmitAction::Llvm) {
            write!(out, "{}", ir)?;
        }
        Ok(())
    }

    #[cfg(not(feature = "llvm"))]
    fn codegen<'a>(&self, _module: &'a Module<'a>, _out: &mut impl Write) -> Result<(), CompileError> {
        if self.emits(EmitAction::Llvm) {
            return Err(CompileError::CodegenUnavailable);
        }
        Ok(())
    }
}
