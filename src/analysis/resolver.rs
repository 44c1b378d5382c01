//! Name resolution.
//!
//! Runs in two phases over the same module. [`Resolver::collect_declarations`]
//! registers every function name so that bodies can call functions defined
//! later in the file. [`Resolver::resolve_bodies`] then walks every body with
//! a stack of lexical scopes and binds each identifier to a local or a
//! function.

use rustc_hash::FxHashMap;

use crate::{
    ast::{
        visitor::{self, Visitor},
        BlockStmt, DeclKind, Expr, FnDecl, IdentifierExpr, LocalStmt, Module, Resolution,
    },
    errors::{ResolveError, ResolveErrorKind},
};

type Scope<'a> = FxHashMap<&'a str, &'a LocalStmt<'a>>;

#[derive(Default)]
pub struct Resolver<'a> {
    /// Innermost scope last. Empty outside of a function body.
    scopes: Vec<Scope<'a>>,
    functions: FxHashMap<&'a str, &'a FnDecl<'a>>,
    errors: Vec<ResolveError>,
}

impl<'a> Resolver<'a> {
    pub fn new() -> Self {
        Resolver::default()
    }

    /// Registers every top-level function. A repeated name is reported and
    /// the first definition wins.
    pub fn collect_declarations(&mut self, module: &'a Module<'a>) {
        for decl in module.decls {
            let DeclKind::Function(function) = &decl.kind;

            if self.functions.contains_key(function.name) {
                self.errors.push(ResolveError::new(
                    ResolveErrorKind::DuplicateFunction {
                        name: function.name.to_string(),
                    },
                    decl.span,
                ));
            } else {
                self.functions.insert(function.name, function);
            }
        }
    }

    /// Binds every identifier in every function body.
    pub fn resolve_bodies(&mut self, module: &'a Module<'a>) {
        self.visit_module(module);
    }

    pub fn finish(self) -> Vec<ResolveError> {
        tracing::debug!(
            functions = self.functions.len(),
            errors = self.errors.len(),
            "name resolution finished"
        );
        self.errors
    }

    fn lookup(&self, name: &str) -> Resolution<'a> {
        if let Some(local) = self.scopes.iter().rev().find_map(|scope| scope.get(name)) {
            return Resolution::Local(*local);
        }

        match self.functions.get(name) {
            Some(function) => Resolution::Function(*function),
            None => Resolution::Unresolved,
        }
    }
}

impl<'a> Visitor<'a> for Resolver<'a> {
    fn visit_fn(&mut self, function: &'a FnDecl<'a>) {
        self.scopes = vec![Scope::default()];
        visitor::walk_fn(self, function);
        self.scopes.clear();
    }

    fn visit_block(&mut self, block: &'a BlockStmt<'a>) {
        self.scopes.push(Scope::default());
        visitor::walk_block(self, block);
        self.scopes.pop();
    }

    /// The initializer is resolved before the name is declared, so it still
    /// sees any outer binding of the same name.
    fn visit_local(&mut self, local: &'a LocalStmt<'a>) {
        if let Some(init) = local.init {
            self.visit_expr(init);
        }

        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(local.name, local);
        }
    }

    fn visit_identifier(&mut self, expr: &'a Expr<'a>, identifier: &'a IdentifierExpr<'a>) {
        match self.lookup(identifier.name) {
            Resolution::Unresolved => self.errors.push(ResolveError::new(
                ResolveErrorKind::UnknownIdentifier {
                    name: identifier.name.to_string(),
                },
                expr.span,
            )),
            resolution => identifier.decl.set(resolution),
        }
    }
}

/// Runs both resolution phases over `module`.
pub fn resolve<'a>(module: &'a Module<'a>) -> Vec<ResolveError> {
    let mut resolver = Resolver::new();
    resolver.collect_declarations(module);
    resolver.resolve_bodies(module);
    resolver.finish()
}
