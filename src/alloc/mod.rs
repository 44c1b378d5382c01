//! Memory management for the compiler.
//!
//! Every AST node, list node and type is allocated from a single [`Arena`]
//! and referenced through plain shared references afterwards. Nothing
//! allocated here is ever dropped: memory is reclaimed in bulk by
//! [`Arena::reset`] or when the arena itself is dropped.

pub mod arena;

pub use arena::{kilo_bytes, Arena, MAX_ALIGN};

#[cfg(test)]
mod tests;
