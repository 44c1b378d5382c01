use std::{
    cell::Cell,
    fmt::{Debug, Display},
};

use crate::{adt::IntrusiveList, typing::TypeRef, Span};

use super::ast::FnDecl;
use super::statements::LocalStmt;

/// Expression node.
///
/// `ty` starts out empty and is written once by the type checker.
#[derive(Debug)]
pub struct Expr<'a> {
    pub kind: ExprKind<'a>,
    pub span: Span,
    pub ty: Cell<Option<TypeRef<'a>>>,
}

impl<'a> Expr<'a> {
    pub fn new(kind: ExprKind<'a>, span: Span) -> Self {
        Expr {
            kind,
            span,
            ty: Cell::new(None),
        }
    }

    pub fn get_type(&self) -> Option<TypeRef<'a>> {
        self.ty.get()
    }
}

#[derive(Debug)]
pub enum ExprKind<'a> {
    Number(NumberExpr),
    Identifier(IdentifierExpr<'a>),
    Unary(UnaryExpr<'a>),
    Binary(BinaryExpr<'a>),
    Call(CallExpr<'a>),
    Index(IndexExpr<'a>),
    Grouped(GroupedExpr<'a>),
}

#[derive(Debug)]
pub struct NumberExpr {
    pub value: f64,
}

/// What an identifier refers to once the resolver has run.
#[derive(Clone, Copy, Default)]
pub enum Resolution<'a> {
    #[default]
    Unresolved,
    Local(&'a LocalStmt<'a>),
    Function(&'a FnDecl<'a>),
}

impl Resolution<'_> {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

// Only names are printed: a local's initializer may refer back to it.
impl Debug for Resolution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Unresolved => write!(f, "Unresolved"),
            Resolution::Local(local) => write!(f, "Local({})", local.name),
            Resolution::Function(function) => write!(f, "Function({})", function.name),
        }
    }
}

/// Written once by the resolver.
#[derive(Debug)]
pub struct IdentifierExpr<'a> {
    pub name: &'a str,
    pub decl: Cell<Resolution<'a>>,
}

impl<'a> IdentifierExpr<'a> {
    pub fn new(name: &'a str) -> Self {
        IdentifierExpr {
            name,
            decl: Cell::new(Resolution::Unresolved),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOpKind {
    Neg,
    Not,
}

impl Display for UnOpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnOpKind::Neg => write!(f, "-"),
            UnOpKind::Not => write!(f, "!"),
        }
    }
}

#[derive(Debug)]
pub struct UnaryExpr<'a> {
    pub op: UnOpKind,
    pub expr: &'a Expr<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Mul,
    Div,
    Add,
    Sub,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinOpKind {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOpKind::Lt | BinOpKind::Le | BinOpKind::Gt | BinOpKind::Ge | BinOpKind::Eq | BinOpKind::Ne
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinOpKind::And | BinOpKind::Or)
    }
}

impl Display for BinOpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Lt => "<",
            BinOpKind::Le => "<=",
            BinOpKind::Gt => ">",
            BinOpKind::Ge => ">=",
            BinOpKind::Eq => "==",
            BinOpKind::Ne => "!=",
            BinOpKind::And => "&&",
            BinOpKind::Or => "||",
        };
        write!(f, "{}", op)
    }
}

#[derive(Debug)]
pub struct BinaryExpr<'a> {
    pub op: BinOpKind,
    pub lhs: &'a Expr<'a>,
    pub rhs: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct CallExpr<'a> {
    pub callee: &'a Expr<'a>,
    pub args: IntrusiveList<'a, &'a Expr<'a>>,
}

#[derive(Debug)]
pub struct IndexExpr<'a> {
    pub base: &'a Expr<'a>,
    pub index: &'a Expr<'a>,
}

#[derive(Debug)]
pub struct GroupedExpr<'a> {
    pub expr: &'a Expr<'a>,
}
