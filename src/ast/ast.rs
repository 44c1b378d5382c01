use std::cell::Cell;

use crate::{adt::IntrusiveList, typing::TypeRef, Span};

use super::statements::{BlockStmt, LocalStmt};

/// Root of a parsed file.
#[derive(Debug)]
pub struct Module<'a> {
    pub name: &'a str,
    pub decls: IntrusiveList<'a, &'a Decl<'a>>,
}

impl<'a> Module<'a> {
    pub fn functions(&self) -> impl Iterator<Item = &'a FnDecl<'a>> {
        self.decls.iter().map(|decl| match &decl.kind {
            DeclKind::Function(function) => function,
        })
    }
}

#[derive(Debug)]
pub struct Decl<'a> {
    pub kind: DeclKind<'a>,
    pub span: Span,
}

#[derive(Debug)]
pub enum DeclKind<'a> {
    Function(FnDecl<'a>),
}

/// Function declaration. Parameters are constant locals.
#[derive(Debug)]
pub struct FnDecl<'a> {
    pub name: &'a str,
    pub params: IntrusiveList<'a, &'a LocalStmt<'a>>,
    pub ret_ty: TypeRef<'a>,
    pub body: &'a BlockStmt<'a>,
    /// Interned signature, written by the type checker.
    pub ty: Cell<Option<TypeRef<'a>>>,
}

impl<'a> FnDecl<'a> {
    pub fn new(
        name: &'a str,
        params: IntrusiveList<'a, &'a LocalStmt<'a>>,
        ret_ty: TypeRef<'a>,
        body: &'a BlockStmt<'a>,
    ) -> Self {
        FnDecl {
            name,
            params,
            ret_ty,
            body,
            ty: Cell::new(None),
        }
    }
}
