/// AST (Abstract Syntax Tree) module
/// Every node is allocated in an `Arena` and refers to its children through
/// plain references. Later passes only write the annotation cells.
///
/// Submodules:
/// - ast: Modules and declarations
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes
/// - visitor: Kind-dispatching tree walk
/// - printer: Indented dump used by `--emit=ast`
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod visitor;

pub use ast::{Decl, DeclKind, FnDecl, Module};
pub use expressions::{
    BinOpKind, BinaryExpr, CallExpr, Expr, ExprKind, GroupedExpr, IdentifierExpr, IndexExpr,
    NumberExpr, Resolution, UnOpKind, UnaryExpr,
};
pub use statements::{
    AssignStmt, BlockStmt, BreakStmt, ExpressionStmt, IfStmt, LocalStmt, ReturnStmt, Stmt,
    StmtKind, WhileStmt,
};
pub use visitor::Visitor;

#[cfg(test)]
mod tests;
