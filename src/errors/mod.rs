//! Error types and error handling for the compiler.
//!
//! Every phase reports `Error<K>` records where `K` is the phase's own kind
//! enumeration. Records carry only a kind and a span; `report` turns them
//! into annotated source text or JSON. `CompileError` covers failures of
//! the driver itself.

pub mod errors;
pub mod report;

pub use errors::{
    CfaError, CfaErrorKind, CompileError, Error, ErrorKind, ErrorTip, LexError, LexErrorKind,
    ParseError, ParseErrorKind, ResolveError, ResolveErrorKind, TypeCheckError,
    TypeCheckErrorKind,
};

#[cfg(test)]
mod tests;
