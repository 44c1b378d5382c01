//! Indented dump of a module, used by `--emit=ast`.
//!
//! Annotations are printed when present: identifier bindings after `=>`,
//! break targets as the span of the loop, and inferred types after `:`.

use std::fmt::Display;

use super::{
    ast::{FnDecl, Module},
    expressions::{
        BinaryExpr, CallExpr, Expr, GroupedExpr, IdentifierExpr, IndexExpr, NumberExpr,
        Resolution, UnaryExpr,
    },
    statements::{
        AssignStmt, BlockStmt, BreakStmt, ExpressionStmt, IfStmt, LocalStmt, ReturnStmt, Stmt,
        WhileStmt,
    },
    visitor::{self, Visitor},
};
use crate::typing::TypeRef;

#[derive(Default)]
pub struct AstPrinter {
    out: String,
    level: usize,
}

impl AstPrinter {
    pub fn print<'a>(module: &'a Module<'a>) -> String {
        let mut printer = AstPrinter::default();
        printer.visit_module(module);
        printer.out
    }

    fn line(&mut self, text: impl Display) {
        for _ in 0..self.level {
            self.out.push_str("  ");
        }
        self.out.push_str(&text.to_string());
        self.out.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.level += 1;
        f(self);
        self.level -= 1;
    }
}

fn annotation(ty: Option<TypeRef<'_>>) -> String {
    match ty {
        Some(ty) => format!(" : {}", ty),
        None => String::new(),
    }
}

impl<'a> Visitor<'a> for AstPrinter {
    fn visit_module(&mut self, module: &'a Module<'a>) {
        self.line(format_args!("Module: {}", module.name));
        self.nested(|p| visitor::walk_module(p, module));
    }

    fn visit_fn(&mut self, function: &'a FnDecl<'a>) {
        self.line(format_args!("FnDecl: {}: {}", function.name, function.ret_ty));
        self.nested(|p| visitor::walk_fn(p, function));
    }

    fn visit_expr_stmt(&mut self, _stmt: &'a Stmt<'a>, expr_stmt: &'a ExpressionStmt<'a>) {
        self.line("ExprStmt");
        self.nested(|p| p.visit_expr(expr_stmt.expr));
    }

    fn visit_break(&mut self, _stmt: &'a Stmt<'a>, break_stmt: &'a BreakStmt<'a>) {
        match break_stmt.target.get() {
            Some(target) => self.line(format_args!("Break => While({})", target.cond.span)),
            None => self.line("Break: (unresolved)"),
        }
    }

    fn visit_return(&mut self, _stmt: &'a Stmt<'a>, return_stmt: &'a ReturnStmt<'a>) {
        self.line("Return");
        if let Some(expr) = return_stmt.expr {
            self.nested(|p| p.visit_expr(expr));
        }
    }

    fn visit_local(&mut self, local: &'a LocalStmt<'a>) {
        let keyword = if local.is_const { "let" } else { "var" };
        self.line(format_args!(
            "Local: {} {}{}",
            keyword,
            local.name,
            annotation(local.get_type())
        ));
        if let Some(init) = local.init {
            self.nested(|p| p.visit_expr(init));
        }
    }

    fn visit_assign(&mut self, _stmt: &'a Stmt<'a>, assign: &'a AssignStmt<'a>) {
        self.line("Assign");
        self.nested(|p| {
            p.visit_expr(assign.lhs);
            p.visit_expr(assign.rhs);
        });
    }

    fn visit_block(&mut self, block: &'a BlockStmt<'a>) {
        self.line("Block");
        self.nested(|p| visitor::walk_block(p, block));
    }

    fn visit_if(&mut self, _stmt: &'a Stmt<'a>, if_stmt: &'a IfStmt<'a>) {
        self.line("If");
        self.nested(|p| visitor::walk_if(p, if_stmt));
    }

    fn visit_while(&mut self, _stmt: &'a Stmt<'a>, while_stmt: &'a WhileStmt<'a>) {
        self.line("While");
        self.nested(|p| visitor::walk_while(p, while_stmt));
    }

    fn visit_number(&mut self, expr: &'a Expr<'a>, number: &'a NumberExpr) {
        self.line(format_args!("Number: {}{}", number.value, annotation(expr.get_type())));
    }

    fn visit_identifier(&mut self, expr: &'a Expr<'a>, identifier: &'a IdentifierExpr<'a>) {
        let binding = match identifier.decl.get() {
            Resolution::Unresolved => String::new(),
            resolved => format!(" => {:?}", resolved),
        };
        self.line(format_args!(
            "Identifier: {}{}{}",
            identifier.name,
            binding,
            annotation(expr.get_type())
        ));
    }

    fn visit_unary(&mut self, expr: &'a Expr<'a>, unary: &'a UnaryExpr<'a>) {
        self.line(format_args!("Unary: {}{}", unary.op, annotation(expr.get_type())));
        self.nested(|p| p.visit_expr(unary.expr));
    }

    fn visit_binary(&mut self, expr: &'a Expr<'a>, binary: &'a BinaryExpr<'a>) {
        self.line(format_args!("Binary: {}{}", binary.op, annotation(expr.get_type())));
        self.nested(|p| {
            p.visit_expr(binary.lhs);
            p.visit_expr(binary.rhs);
        });
    }

    fn visit_call(&mut self, expr: &'a Expr<'a>, call: &'a CallExpr<'a>) {
        self.line(format_args!("Call{}", annotation(expr.get_type())));
        self.nested(|p| visitor::walk_call(p, call));
    }

    fn visit_index(&mut self, expr: &'a Expr<'a>, index: &'a IndexExpr<'a>) {
        self.line(format_args!("Index{}", annotation(expr.get_type())));
        self.nested(|p| {
            p.visit_expr(index.base);
            p.visit_expr(index.index);
        });
    }

    fn visit_grouped(&mut self, expr: &'a Expr<'a>, grouped: &'a GroupedExpr<'a>) {
        self.line(format_args!("Grouped{}", annotation(expr.get_type())));
        self.nested(|p| p.visit_expr(grouped.expr));
    }
}
