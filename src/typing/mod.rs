//! Language types and the table that interns them.

pub mod type_table;
pub mod types;

pub use type_table::TypeTable;
pub use types::{FunctionType, Type, TypeRef};
