//! Tree walk shared by every pass.
//!
//! [`Visitor::visit_stmt`] and [`Visitor::visit_expr`] switch on the node's
//! kind and call the matching handler. Every handler defaults to the
//! corresponding `walk_*` function, which only visits the children, so a pass
//! overrides the node kinds it cares about and gets the traversal of the
//! rest for free. An override that still wants the children visited calls
//! the `walk_*` function itself, before or after its own work.

use super::{
    ast::{Decl, DeclKind, FnDecl, Module},
    expressions::{
        BinaryExpr, CallExpr, Expr, ExprKind, GroupedExpr, IdentifierExpr, IndexExpr, NumberExpr,
        UnaryExpr,
    },
    statements::{
        AssignStmt, BlockStmt, BreakStmt, ExpressionStmt, IfStmt, LocalStmt, ReturnStmt, Stmt,
        StmtKind, WhileStmt,
    },
};

pub trait Visitor<'a>: Sized {
    fn visit_module(&mut self, module: &'a Module<'a>) {
        walk_module(self, module);
    }

    fn visit_decl(&mut self, decl: &'a Decl<'a>) {
        walk_decl(self, decl);
    }

    fn visit_fn(&mut self, function: &'a FnDecl<'a>) {
        walk_fn(self, function);
    }

    // Statements

    fn visit_stmt(&mut self, stmt: &'a Stmt<'a>) {
        walk_stmt(self, stmt);
    }

    fn visit_expr_stmt(&mut self, _stmt: &'a Stmt<'a>, expr_stmt: &'a ExpressionStmt<'a>) {
        self.visit_expr(expr_stmt.expr);
    }

    fn visit_break(&mut self, _stmt: &'a Stmt<'a>, _break_stmt: &'a BreakStmt<'a>) {}

    fn visit_return(&mut self, _stmt: &'a Stmt<'a>, return_stmt: &'a ReturnStmt<'a>) {
        if let Some(expr) = return_stmt.expr {
            self.visit_expr(expr);
        }
    }

    fn visit_local(&mut self, local: &'a LocalStmt<'a>) {
        if let Some(init) = local.init {
            self.visit_expr(init);
        }
    }

    fn visit_assign(&mut self, _stmt: &'a Stmt<'a>, assign: &'a AssignStmt<'a>) {
        self.visit_expr(assign.lhs);
        self.visit_expr(assign.rhs);
    }

    fn visit_block(&mut self, block: &'a BlockStmt<'a>) {
        walk_block(self, block);
    }

    fn visit_if(&mut self, _stmt: &'a Stmt<'a>, if_stmt: &'a IfStmt<'a>) {
        walk_if(self, if_stmt);
    }

    fn visit_while(&mut self, _stmt: &'a Stmt<'a>, while_stmt: &'a WhileStmt<'a>) {
        walk_while(self, while_stmt);
    }

    // Expressions

    fn visit_expr(&mut self, expr: &'a Expr<'a>) {
        walk_expr(self, expr);
    }

    fn visit_number(&mut self, _expr: &'a Expr<'a>, _number: &'a NumberExpr) {}

    fn visit_identifier(&mut self, _expr: &'a Expr<'a>, _identifier: &'a IdentifierExpr<'a>) {}

    fn visit_unary(&mut self, _expr: &'a Expr<'a>, unary: &'a UnaryExpr<'a>) {
        self.visit_expr(unary.expr);
    }

    fn visit_binary(&mut self, _expr: &'a Expr<'a>, binary: &'a BinaryExpr<'a>) {
        self.visit_expr(binary.lhs);
        self.visit_expr(binary.rhs);
    }

    fn visit_call(&mut self, _expr: &'a Expr<'a>, call: &'a CallExpr<'a>) {
        walk_call(self, call);
    }

    fn visit_index(&mut self, _expr: &'a Expr<'a>, index: &'a IndexExpr<'a>) {
        self.visit_expr(index.base);
        self.visit_expr(index.index);
    }

    fn visit_grouped(&mut self, _expr: &'a Expr<'a>, grouped: &'a GroupedExpr<'a>) {
        self.visit_expr(grouped.expr);
    }
}

pub fn walk_module<'a, V: Visitor<'a>>(visitor: &mut V, module: &'a Module<'a>) {
    for decl in module.decls {
        visitor.visit_decl(decl);
    }
}

pub fn walk_decl<'a, V: Visitor<'a>>(visitor: &mut V, decl: &'a Decl<'a>) {
    match &decl.kind {
        DeclKind::Function(function) => visitor.visit_fn(function),
    }
}

pub fn walk_fn<'a, V: Visitor<'a>>(visitor: &mut V, function: &'a FnDecl<'a>) {
    for param in function.params {
        visitor.visit_local(param);
    }
    visitor.visit_block(function.body);
}

pub fn walk_stmt<'a, V: Visitor<'a>>(visitor: &mut V, stmt: &'a Stmt<'a>) {
    match &stmt.kind {
        StmtKind::Expr(expr_stmt) => visitor.visit_expr_stmt(stmt, expr_stmt),
        StmtKind::Break(break_stmt) => visitor.visit_break(stmt, break_stmt),
        StmtKind::Return(return_stmt) => visitor.visit_return(stmt, return_stmt),
        StmtKind::Local(local) => visitor.visit_local(local),
        StmtKind::Assign(assign) => visitor.visit_assign(stmt, assign),
        StmtKind::Block(block) => visitor.visit_block(block),
        StmtKind::If(if_stmt) => visitor.visit_if(stmt, if_stmt),
        StmtKind::While(while_stmt) => visitor.visit_while(stmt, while_stmt),
    }
}

pub fn walk_block<'a, V: Visitor<'a>>(visitor: &mut V, block: &'a BlockStmt<'a>) {
    for stmt in block.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_if<'a, V: Visitor<'a>>(visitor: &mut V, if_stmt: &'a IfStmt<'a>) {
    visitor.visit_expr(if_stmt.cond);
    visitor.visit_block(if_stmt.then_branch);
    if let Some(else_branch) = if_stmt.else_branch {
        visitor.visit_stmt(else_branch);
    }
}

pub fn walk_while<'a, V: Visitor<'a>>(visitor: &mut V, while_stmt: &'a WhileStmt<'a>) {
    visitor.visit_expr(while_stmt.cond);
    visitor.visit_block(while_stmt.body);
}

pub fn walk_expr<'a, V: Visitor<'a>>(visitor: &mut V, expr: &'a Expr<'a>) {
    match &expr.kind {
        ExprKind::Number(number) => visitor.visit_number(expr, number),
        ExprKind::Identifier(identifier) => visitor.visit_identifier(expr, identifier),
        ExprKind::Unary(unary) => visitor.visit_unary(expr, unary),
        ExprKind::Binary(binary) => visitor.visit_binary(expr, binary),
        ExprKind::Call(call) => visitor.visit_call(expr, call),
        ExprKind::Index(index) => visitor.visit_index(expr, index),
        ExprKind::Grouped(grouped) => visitor.visit_grouped(expr, grouped),
    }
}

pub fn walk_call<'a, V: Visitor<'a>>(visitor: &mut V, call: &'a CallExpr<'a>) {
    visitor.visit_expr(call.callee);
    for arg in call.args {
        visitor.visit_expr(arg);
    }
}
