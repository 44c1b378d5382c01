#![allow(clippy::module_inception)]

use std::fmt::Display;

pub mod adt;
pub mod alloc;
pub mod analysis;
pub mod ast;
#[cfg(feature = "llvm")]
pub mod compiler;
pub mod driver;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod source;
pub mod typing;

extern crate regex;

/// Half-open byte range into the source buffer.
///
/// Spans are only used to locate diagnostics. They are plain data so that
/// arena-allocated nodes can carry them without owning anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

/// Largest source buffer whose offsets fit in a [`Span`].
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

impl Span {
    /// Offsets must not exceed [`MAX_SOURCE_LEN`]; the driver rejects larger
    /// sources before lexing.
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start: start as u32,
            end: end as u32,
        }
    }

    /// Span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The text this span covers in `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start as usize..self.end as usize]
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::Span;

    #[test]
    fn test_span_join() {
        let a = Span::new(4, 7);
        let b = Span::new(10, 12);
        assert_eq!(a.to(b), Span::new(4, 12));
        assert_eq!(b.to(a), Span::new(4, 12));
        assert_eq!(a.to(b).len(), 8);
    }

    #[test]
    fn test_span_text() {
        let source = "let answer = 42;";
        assert_eq!(Span::new(4, 10).text(source), "answer");
        assert!(Span::new(3, 3).is_empty());
    }
}
