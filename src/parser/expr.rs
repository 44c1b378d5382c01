use crate::{
    adt::IntrusiveList,
    ast::{
        BinOpKind, BinaryExpr, CallExpr, Expr, ExprKind, GroupedExpr, IdentifierExpr, IndexExpr,
        NumberExpr, UnOpKind, UnaryExpr,
    },
    errors::{ParseError, ParseErrorKind},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr<'a>(parser: &mut Parser<'a>, bp: BindingPower) -> Result<&'a Expr<'a>, ParseError> {
    // First parse NUD
    let nud = parser.get_nud_handler().ok_or_else(|| {
        parser.error_here(ParseErrorKind::ExpectedPrimaryExpression {
            found: parser.current_token_kind(),
        })
    })?;

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, keep extending the lhs
    while parser.current_binding_power() > bp {
        let Some(led) = parser.get_led_handler() else {
            break;
        };
        let bp = parser.current_binding_power();
        left = led(parser, left, bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr<'a>(parser: &mut Parser<'a>) -> Result<&'a Expr<'a>, ParseError> {
    let token = parser.current_token();
    match token.kind {
        TokenKind::Number => {
            let value = token
                .value
                .parse()
                .map_err(|_| parser.error_here(ParseErrorKind::InvalidNumber))?;
            parser.advance();
            Ok(parser.new_expr(ExprKind::Number(NumberExpr { value }), token.span))
        }
        TokenKind::Identifier => {
            parser.advance();
            Ok(parser.new_expr(
                ExprKind::Identifier(IdentifierExpr::new(token.value)),
                token.span,
            ))
        }
        kind => Err(parser.error_here(ParseErrorKind::ExpectedPrimaryExpression { found: kind })),
    }
}

fn binary_op(kind: TokenKind) -> Option<BinOpKind> {
    let op = match kind {
        TokenKind::Star => BinOpKind::Mul,
        TokenKind::Slash => BinOpKind::Div,
        TokenKind::Plus => BinOpKind::Add,
        TokenKind::Dash => BinOpKind::Sub,
        TokenKind::Less => BinOpKind::Lt,
        TokenKind::LessEquals => BinOpKind::Le,
        TokenKind::Greater => BinOpKind::Gt,
        TokenKind::GreaterEquals => BinOpKind::Ge,
        TokenKind::Equals => BinOpKind::Eq,
        TokenKind::NotEquals => BinOpKind::Ne,
        TokenKind::And => BinOpKind::And,
        TokenKind::Or => BinOpKind::Or,
        _ => return None,
    };
    Some(op)
}

pub fn parse_binary_expr<'a>(
    parser: &mut Parser<'a>,
    left: &'a Expr<'a>,
    bp: BindingPower,
) -> Result<&'a Expr<'a>, ParseError> {
    let operator_token = parser.current_token();
    let op = binary_op(operator_token.kind).ok_or_else(|| {
        parser.error_here(ParseErrorKind::ExpectedPrimaryExpression {
            found: operator_token.kind,
        })
    })?;
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Ok(parser.new_expr(
        ExprKind::Binary(BinaryExpr {
            op,
            lhs: left,
            rhs: right,
        }),
        left.span.to(right.span),
    ))
}

pub fn parse_prefix_expr<'a>(parser: &mut Parser<'a>) -> Result<&'a Expr<'a>, ParseError> {
    let operator_token = parser.advance();
    let op = match operator_token.kind {
        TokenKind::Not => UnOpKind::Not,
        _ => UnOpKind::Neg,
    };
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(parser.new_expr(
        ExprKind::Unary(UnaryExpr { op, expr: rhs }),
        operator_token.span.to(rhs.span),
    ))
}

pub fn parse_grouping_expr<'a>(parser: &mut Parser<'a>) -> Result<&'a Expr<'a>, ParseError> {
    let open = parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(parser.new_expr(
        ExprKind::Grouped(GroupedExpr { expr }),
        open.span.to(close.span),
    ))
}

pub fn parse_call_expr<'a>(
    parser: &mut Parser<'a>,
    left: &'a Expr<'a>,
    _bp: BindingPower,
) -> Result<&'a Expr<'a>, ParseError> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = IntrusiveList::new();

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let arg = parse_expr(parser, BindingPower::Default)?;
            args.emplace_back(parser.arena(), arg);

            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;

    Ok(parser.new_expr(
        ExprKind::Call(CallExpr { callee: left, args }),
        left.span.to(close.span),
    ))
}

pub fn parse_index_expr<'a>(
    parser: &mut Parser<'a>,
    left: &'a Expr<'a>,
    _bp: BindingPower,
) -> Result<&'a Expr<'a>, ParseError> {
    parser.expect(TokenKind::OpenBracket)?;
    let index = parse_expr(parser, BindingPower::Default)?;
    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(parser.new_expr(
        ExprKind::Index(IndexExpr { base: left, index }),
        left.span.to(close.span),
    ))
}
