//! Data structures used to build the arena-allocated AST.

pub mod list;

pub use list::{IntrusiveList, ListNode};
