use crate::{
    ast::{BlockStmt, IfStmt, Stmt, StmtKind, WhileStmt},
    errors::CompileError,
};

use super::{
    compiler::Compiler,
    expr::{gen_address, gen_condition, gen_expression, gen_value},
};

/// Generates every statement of `block`. CFA guarantees nothing follows a
/// `break` or `return`.
pub fn gen_block<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    block: &'a BlockStmt<'a>,
) -> Result<(), CompileError> {
    for statement in block.stmts {
        if compiler.is_terminated() {
            break;
        }
        gen_statement(compiler, statement)?;
    }
    Ok(())
}

pub fn gen_statement<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    statement: &'a Stmt<'a>,
) -> Result<(), CompileError> {
    match &statement.kind {
        StmtKind::Expr(expr_stmt) => {
            gen_expression(compiler, expr_stmt.expr)?;
        }
        StmtKind::Break(break_stmt) => {
            let exit = break_stmt
                .target
                .get()
                .and_then(|target| compiler.loop_exits.get(&(target as *const _)).copied())
                .ok_or_else(|| CompileError::Codegen(String::from("`break` has no target loop")))?;
            compiler.builder.build_unconditional_branch(exit)?;
        }
        StmtKind::Return(return_stmt) => {
            let value = match return_stmt.expr {
                Some(expr) => gen_expression(compiler, expr)?,
                None => None,
            };
            match value {
                Some(value) => compiler.builder.build_return(Some(&value))?,
                None => compiler.builder.build_return(None)?,
            };
        }
        StmtKind::Local(local) => {
            let init = match local.init {
                Some(init) => Some(gen_value(compiler, init)?),
                None => None,
            };
            let slot = compiler.create_slot(local)?;
            if let Some(init) = init {
                compiler.builder.build_store(slot, init)?;
            }
        }
        StmtKind::Assign(assign) => {
            let address = gen_address(compiler, assign.lhs)?;
            let value = gen_value(compiler, assign.rhs)?;
            compiler.builder.build_store(address, value)?;
        }
        StmtKind::Block(block) => gen_block(compiler, block)?,
        StmtKind::If(if_stmt) => gen_if(compiler, if_stmt)?,
        StmtKind::While(while_stmt) => gen_while(compiler, while_stmt)?,
    }
    Ok(())
}

fn gen_if<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    if_stmt: &'a IfStmt<'a>,
) -> Result<(), CompileError> {
    let condition = gen_condition(compiler, if_stmt.cond)?;

    let then_block = compiler.append_block("then")?;
    let else_block = match if_stmt.else_branch {
        Some(_) => Some(compiler.append_block("else")?),
        None => None,
    };
    let end_block = compiler.append_block("end")?;

    compiler.builder.build_conditional_branch(
        condition,
        then_block,
        else_block.unwrap_or(end_block),
    )?;

    compiler.builder.position_at_end(then_block);
    gen_block(compiler, if_stmt.then_branch)?;
    if !compiler.is_terminated() {
        compiler.builder.build_unconditional_branch(end_block)?;
    }

    if let (Some(else_block), Some(else_branch)) = (else_block, if_stmt.else_branch) {
        compiler.builder.position_at_end(else_block);
        gen_statement(compiler, else_branch)?;
        if !compiler.is_terminated() {
            compiler.builder.build_unconditional_branch(end_block)?;
        }
    }

    compiler.builder.position_at_end(end_block);
    Ok(())
}

fn gen_while<'ctx, 'a>(
    compiler: &mut Compiler<'ctx, 'a>,
    while_stmt: &'a WhileStmt<'a>,
) -> Result<(), CompileError> {
    let cond_block = compiler.append_block("cond")?;
    let body_block = compiler.append_block("body")?;
    let after_block = compiler.append_block("after")?;

    compiler.builder.build_unconditional_branch(cond_block)?;

    compiler.builder.position_at_end(cond_block);
    let condition = gen_condition(compiler, while_stmt.cond)?;
    compiler
        .builder
        .build_conditional_branch(condition, body_block, after_block)?;

    compiler.loop_exits.insert(while_stmt, after_block);

    compiler.builder.position_at_end(body_block);
    gen_block(compiler, while_stmt.body)?;
    if !compiler.is_terminated() {
        compiler.builder.build_unconditional_branch(cond_block)?;
    }

    compiler.builder.position_at_end(after_block);
    Ok(())
}
