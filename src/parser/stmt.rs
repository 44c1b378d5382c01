use crate::{
    adt::IntrusiveList,
    ast::{
        AssignStmt, BlockStmt, BreakStmt, Decl, DeclKind, ExpressionStmt, FnDecl, IfStmt,
        LocalStmt, ReturnStmt, Stmt, StmtKind, WhileStmt,
    },
    errors::ParseError,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt<'a>(parser: &mut Parser<'a>) -> Result<&'a Stmt<'a>, ParseError> {
    if let Some(handler) = parser.get_stmt_handler() {
        return handler(parser);
    }

    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        let rhs = parse_expr(parser, BindingPower::Default)?;
        parser.expect(TokenKind::Semicolon)?;

        return Ok(parser.new_stmt(
            StmtKind::Assign(AssignStmt { lhs: expr, rhs }),
            expr.span.to(rhs.span),
        ));
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.new_stmt(StmtKind::Expr(ExpressionStmt { expr }), expr.span))
}

/// `IDENT (':' type)? ('=' expr)?`, shared by locals and parameters.
pub fn parse_local<'a>(
    parser: &mut Parser<'a>,
    is_const: bool,
) -> Result<LocalStmt<'a>, ParseError> {
    let ident = parser.expect(TokenKind::Identifier)?;

    let declared_ty = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser)?)
    } else {
        None
    };

    let init = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(LocalStmt::new(is_const, ident.value, ident.span, declared_ty, init))
}

pub fn parse_local_stmt<'a>(parser: &mut Parser<'a>) -> Result<&'a Stmt<'a>, ParseError> {
    let keyword = parser.advance();
    let local = parse_local(parser, keyword.kind == TokenKind::Let)?;
    parser.expect(TokenKind::Semicolon)?;

    let span = local.span;
    Ok(parser.new_stmt(StmtKind::Local(local), span))
}

/// Parses `{ stmt* }`, recovering from errors in individual statements.
fn parse_block_contents<'a>(parser: &mut Parser<'a>) -> Result<BlockStmt<'a>, ParseError> {
    let open = parser.expect(TokenKind::OpenCurly)?;
    let mut stmts = IntrusiveList::new();

    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        match parse_stmt(parser) {
            Ok(stmt) => stmts.emplace_back(parser.arena(), stmt),
            Err(error) => {
                parser.report(error);
                parser.synchronize_stmt();
            }
        }
    }

    let close = parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        stmts,
        span: open.span.to(close.span),
    })
}

pub fn parse_block<'a>(parser: &mut Parser<'a>) -> Result<&'a BlockStmt<'a>, ParseError> {
    let block = parse_block_contents(parser)?;
    Ok(parser.arena().alloc(block))
}

pub fn parse_block_stmt<'a>(parser: &mut Parser<'a>) -> Result<&'a Stmt<'a>, ParseError> {
    let block = parse_block_contents(parser)?;
    let span = block.span;
    Ok(parser.new_stmt(StmtKind::Block(block), span))
}

pub fn parse_if_stmt<'a>(parser: &mut Parser<'a>) -> Result<&'a Stmt<'a>, ParseError> {
    let keyword = parser.expect(TokenKind::If)?;

    let cond = parse_expr(parser, BindingPower::Default)?;
    let then_branch = parse_block(parser)?;

    let else_branch = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        if parser.current_token_kind() == TokenKind::If {
            Some(parse_if_stmt(parser)?)
        } else {
            Some(parse_block_stmt(parser)?)
        }
    } else {
        None
    };

    Ok(parser.new_stmt(
        StmtKind::If(IfStmt {
            cond,
            then_branch,
            else_branch,
        }),
        keyword.span,
    ))
}

pub fn parse_while_stmt<'a>(parser: &mut Parser<'a>) -> Result<&'a Stmt<'a>, ParseError> {
    let keyword = parser.expect(TokenKind::While)?;
    let cond = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(parser.new_stmt(StmtKind::While(WhileStmt { cond, body }), keyword.span))
}

pub fn parse_break_stmt<'a>(parser: &mut Parser<'a>) -> Result<&'a Stmt<'a>, ParseError> {
    let keyword = parser.expect(TokenKind::Break)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.new_stmt(StmtKind::Break(BreakStmt::default()), keyword.span))
}

pub fn parse_return_stmt<'a>(parser: &mut Parser<'a>) -> Result<&'a Stmt<'a>, ParseError> {
    let keyword = parser.expect(TokenKind::Return)?;

    let expr = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    Ok(parser.new_stmt(StmtKind::Return(ReturnStmt { expr }), keyword.span))
}

/// `fn IDENT '(' params ')' ':' type block`
pub fn parse_fn_decl<'a>(parser: &mut Parser<'a>) -> Result<&'a Decl<'a>, ParseError> {
    parser.expect(TokenKind::Fn)?;
    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut params = IntrusiveList::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let param: &'a LocalStmt<'a> = parser.arena().alloc(parse_local(parser, true)?);
            params.emplace_back(parser.arena(), param);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Colon)?;
    let ret_ty = parse_type(parser)?;
    let body = parse_block(parser)?;

    Ok(parser.arena().alloc(Decl {
        kind: DeclKind::Function(FnDecl::new(name.value, params, ret_ty, body)),
        span: name.span,
    }))
}
