//! Rendering of diagnostics as annotated source or as JSON.

use std::io::Write;

use serde::Serialize;

use super::errors::{CompileError, Error, ErrorKind, ErrorTip};
use crate::source::SourceFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct JsonDiagnostic {
    pub id: &'static str,
    pub loc: String,
}

pub struct Reporter<'s> {
    file: &'s SourceFile,
    max_errors: usize,
}

fn num_digits(n: usize) -> usize {
    n.to_string().len()
}

impl<'s> Reporter<'s> {
    pub fn new(file: &'s SourceFile) -> Self {
        Reporter {
            file,
            max_errors: usize::MAX,
        }
    }

    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    pub fn report<K: ErrorKind>(
        &self,
        format: ErrorFormat,
        errors: &[Error<K>],
        out: &mut impl Write,
    ) -> Result<(), CompileError> {
        match format {
            ErrorFormat::Text => self.report_text(errors, out)?,
            ErrorFormat::Json => self.report_json(errors, out)?,
        }
        Ok(())
    }

    /// Writes every error as a header line followed by the offending source
    /// line with the span underlined.
    pub fn report_text<K: ErrorKind>(
        &self,
        errors: &[Error<K>],
        out: &mut impl Write,
    ) -> std::io::Result<()> {
        let errors = &errors[..errors.len().min(self.max_errors)];
        let width = errors
            .iter()
            .map(|error| num_digits(self.file.location(error.get_span()).line))
            .max()
            .unwrap_or(1);
        let gutter = " ".repeat(width + 2);

        for (i, error) in errors.iter().enumerate() {
            if i > 0 {
                writeln!(out, "{}|", gutter)?;
            }

            let kind = error.get_kind();
            let loc = self.file.location(error.get_span());
            let underline = error.get_span().len().max(1);

            writeln!(
                out,
                "{} --> Error at {}:{}:{}: {}",
                " ".repeat(width),
                loc.file,
                loc.line,
                loc.column,
                kind.title()
            )?;
            writeln!(out, "{}|", gutter)?;
            writeln!(out, " {:>width$} | {}", loc.line, loc.line_text, width = width)?;
            writeln!(
                out,
                "{}| {}^{} {}",
                gutter,
                " ".repeat(loc.column - 1),
                "~".repeat(underline - 1),
                kind
            )?;

            if let tip @ ErrorTip::Suggestion(_) = error.get_tip() {
                writeln!(out, "{}= help: {}", gutter, tip)?;
            }
        }

        Ok(())
    }

    pub fn to_json<K: ErrorKind>(&self, errors: &[Error<K>]) -> Vec<JsonDiagnostic> {
        errors
            .iter()
            .take(self.max_errors)
            .map(|error| {
                let loc = self.file.location(error.get_span());
                JsonDiagnostic {
                    id: error.get_kind().id(),
                    loc: format!("{}:{}:{}", loc.file, loc.line, loc.column),
                }
            })
            .collect()
    }

    pub fn report_json<K: ErrorKind>(
        &self,
        errors: &[Error<K>],
        out: &mut impl Write,
    ) -> Result<(), CompileError> {
        serde_json::to_writer(&mut *out, &self.to_json(errors))?;
        writeln!(out)?;
        Ok(())
    }
}
