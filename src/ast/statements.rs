use std::{cell::Cell, fmt::Debug};

use crate::{adt::IntrusiveList, typing::TypeRef, Span};

use super::expressions::Expr;

#[derive(Debug)]
pub struct Stmt<'a> {
    pub kind: StmtKind<'a>,
    pub span: Span,
}

impl<'a> Stmt<'a> {
    pub fn new(kind: StmtKind<'a>, span: Span) -> Self {
        Stmt { kind, span }
    }

    /// `break` and `return` end the enclosing block.
    pub fn is_terminator(&self) -> bool {
        matches!(self.kind, StmtKind::Break(_) | StmtKind::Return(_))
    }
}

#[derive(Debug)]
pub enum StmtKind<'a> {
    Expr(ExpressionStmt<'a>),
    Break(BreakStmt<'a>),
    Return(ReturnStmt<'a>),
    Local(LocalStmt<'a>),
    Assign(AssignStmt<'a>),
    Block(BlockStmt<'a>),
    If(IfStmt<'a>),
    While(WhileStmt<'a>),
}

#[derive(Debug)]
pub struct ExpressionStmt<'a> {
    pub expr: &'a Expr<'a>,
}

/// `target` is written once by control-flow analysis.
#[derive(Default)]
pub struct BreakStmt<'a> {
    pub target: Cell<Option<&'a WhileStmt<'a>>>,
}

// The target loop contains this statement, so it is not printed.
impl Debug for BreakStmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreakStmt")
            .field("resolved", &self.target.get().is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct ReturnStmt<'a> {
    pub expr: Option<&'a Expr<'a>>,
}

/// Local variable or function parameter.
///
/// `declared_ty` comes from the source. `ty` is the type the checker settled
/// on, which is the declared type if present and the initializer's otherwise.
#[derive(Debug)]
pub struct LocalStmt<'a> {
    pub is_const: bool,
    pub name: &'a str,
    pub span: Span,
    pub declared_ty: Option<TypeRef<'a>>,
    pub ty: Cell<Option<TypeRef<'a>>>,
    pub init: Option<&'a Expr<'a>>,
}

impl<'a> LocalStmt<'a> {
    pub fn new(
        is_const: bool,
        name: &'a str,
        span: Span,
        declared_ty: Option<TypeRef<'a>>,
        init: Option<&'a Expr<'a>>,
    ) -> Self {
        LocalStmt {
            is_const,
            name,
            span,
            declared_ty,
            ty: Cell::new(declared_ty),
            init,
        }
    }

    pub fn get_type(&self) -> Option<TypeRef<'a>> {
        self.ty.get()
    }
}

#[derive(Debug)]
pub struct AssignStmt<'a> {
    pub lhs: &'a Expr<'a>,
    pub rhs: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct BlockStmt<'a> {
    pub stmts: IntrusiveList<'a, &'a Stmt<'a>>,
    pub span: Span,
}

#[derive(Debug)]
pub struct IfStmt<'a> {
    pub cond: &'a Expr<'a>,
    pub then_branch: &'a BlockStmt<'a>,
    /// Either a block or another `if`.
    pub else_branch: Option<&'a Stmt<'a>>,
}

#[derive(Debug)]
pub struct WhileStmt<'a> {
    pub cond: &'a Expr<'a>,
    pub body: &'a BlockStmt<'a>,
}
