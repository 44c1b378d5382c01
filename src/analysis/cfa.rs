//! Control-flow analysis.
//!
//! Checks that `break` only appears inside a loop and that `break` and
//! `return` are the last statement of their block. Every valid `break` gets
//! its target loop recorded.

use crate::{
    ast::{
        visitor::{self, Visitor},
        BlockStmt, BreakStmt, FnDecl, Module, Stmt, StmtKind, WhileStmt,
    },
    errors::{CfaError, CfaErrorKind},
};

#[derive(Default)]
pub struct ControlFlowAnalyzer<'a> {
    /// Enclosing loops, innermost last.
    breakables: Vec<&'a WhileStmt<'a>>,
    errors: Vec<CfaError>,
}

impl<'a> ControlFlowAnalyzer<'a> {
    pub fn new() -> Self {
        ControlFlowAnalyzer::default()
    }

    pub fn analyze(mut self, module: &'a Module<'a>) -> Vec<CfaError> {
        self.visit_module(module);
        tracing::debug!(errors = self.errors.len(), "control-flow analysis finished");
        self.errors
    }
}

impl<'a> Visitor<'a> for ControlFlowAnalyzer<'a> {
    fn visit_fn(&mut self, function: &'a FnDecl<'a>) {
        self.breakables.clear();
        visitor::walk_fn(self, function);
    }

    fn visit_break(&mut self, stmt: &'a Stmt<'a>, break_stmt: &'a BreakStmt<'a>) {
        match self.breakables.last() {
            Some(target) => break_stmt.target.set(Some(*target)),
            None => self
                .errors
                .push(CfaError::new(CfaErrorKind::InvalidBreakStmt, stmt.span)),
        }
    }

    fn visit_while(&mut self, _stmt: &'a Stmt<'a>, while_stmt: &'a WhileStmt<'a>) {
        self.visit_expr(while_stmt.cond);
        self.breakables.push(while_stmt);
        self.visit_block(while_stmt.body);
        self.breakables.pop();
    }

    fn visit_block(&mut self, block: &'a BlockStmt<'a>) {
        let last = block.stmts.len().saturating_sub(1);

        for (i, stmt) in block.stmts.iter().enumerate() {
            self.visit_stmt(stmt);

            if i != last && stmt.is_terminator() {
                let kind = match stmt.kind {
                    StmtKind::Break(_) => CfaErrorKind::EarlyBreakStmt,
                    _ => CfaErrorKind::EarlyReturnStmt,
                };
                self.errors.push(CfaError::new(kind, stmt.span));
                break;
            }
        }
    }
}

/// Runs control-flow analysis over every function of `module`.
pub fn analyze<'a>(module: &'a Module<'a>) -> Vec<CfaError> {
    ControlFlowAnalyzer::new().analyze(module)
}
