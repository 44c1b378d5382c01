//! Source buffers and line/column lookup for diagnostics.

use crate::Span;

#[derive(Debug)]
pub struct SourceFile {
    name: String,
    text: String,
    line_starts: Vec<usize>,
}

/// 1-based line and byte column of a span's start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation<'s> {
    pub file: &'s str,
    pub line: usize,
    pub column: usize,
    pub line_text: &'s str,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        SourceFile {
            name: name.into(),
            text,
            line_starts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn location(&self, span: Span) -> SourceLocation<'_> {
        let offset = (span.start as usize).min(self.text.len());
        let mut line = self.line_starts.partition_point(|&start| start <= offset) - 1;

        // End of input after a trailing newline belongs to the last real line.
        if offset == self.text.len() && self.line_starts[line] == offset && line > 0 {
            line -= 1;
        }

        let start = self.line_starts[line];
        let line_text = self.line_text(line);

        SourceLocation {
            file: &self.name,
            line: line + 1,
            column: (offset - start).min(line_text.len()) + 1,
            line_text,
        }
    }

    fn line_text(&self, line: usize) -> &str {
        let start = self.line_starts[line];
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len());

        self.text[start..end].trim_end_matches(['\n', '\r'])
    }
}

#[cfg(test)]
mod tests {
    use super::SourceFile;
    use crate::Span;

    #[test]
    fn test_location() {
        let file = SourceFile::new("test.lang", "fn main(): void {\n  return;\n}\n");
        let loc = file.location(Span::new(20, 26));

        assert_eq!(loc.line, 2);
        assert_eq!(loc.column, 3);
        assert_eq!(loc.line_text, "  return;");
        assert_eq!(loc.file, "test.lang");
    }

    #[test]
    fn test_end_of_input() {
        let file = SourceFile::new("test.lang", "fn a\n");
        let loc = file.location(Span::new(5, 5));

        assert_eq!(loc.line, 1);
        assert_eq!(loc.column, 5);

        let file = SourceFile::new("test.lang", "");
        assert_eq!(file.location(Span::default()).line, 1);
    }
}
