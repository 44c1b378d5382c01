//! Semantic analysis passes.
//!
//! The driver runs them in order over the same arena-allocated module:
//! control-flow analysis, name resolution, then type checking. Each pass
//! only writes its own annotation cells (break targets, identifier
//! bindings, types) and returns the diagnostics it collected.

pub mod cfa;
pub mod resolver;
pub mod type_checker;

pub use cfa::{analyze, ControlFlowAnalyzer};
pub use resolver::{resolve, Resolver};
pub use type_checker::{check, TypeChecker};
