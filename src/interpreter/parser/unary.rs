use std::iter::Peekable;

use crate::{
    ast::{Expr, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::misplaced_after_operand,
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix signs `+` and `-`. They are right-associative, so `--3`
/// is parsed as `-(-3)`, and they bind tighter than any binary operator.
///
/// Grammar:
/// ```text
///     unary := ("+" | "-") unary
///            | primary
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Plus, _)) => UnaryOperator::Plus,
        _ => return parse_primary(tokens),
    };

    let position = tokens.next().map_or(0, |(_, position)| *position);
    let expr = parse_unary(tokens)?;

    Ok(Expr::UnaryOp { op,
                       expr: Box::new(expr),
                       position })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions are number literals and parenthesized expressions.
/// Anything else in operand position is a missing operand: a binary
/// operator with nothing on its left, a `)` right after `(` or an operator,
/// or the end of input.
///
/// Grammar:
/// ```text
///     primary := NUMBER
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match tokens.peek() {
        Some((Token::Number(value), position)) => {
            let number = Expr::Number { value:    *value,
                                        position: *position, };
            tokens.next();
            Ok(number)
        },
        Some((Token::LParen, _)) => parse_grouping(tokens),
        Some((tok, position)) => Err(ParseError::MissingOperand { found:    tok.to_string(),
                                                                  position: *position, }),
        None => Err(ParseError::MissingOperand { found:    Token::End.to_string(),
                                                 position: 0, }),
    }
}

/// Parses a parenthesized expression.
///
/// The opening parenthesis is consumed, the inner expression parsed, and a
/// closing parenthesis required. Reaching the end of input instead reports
/// the opening parenthesis as unclosed; any other token is misplaced.
///
/// # Errors
/// - [`ParseError::UnmatchedOpen`] at the offset of this `(` if the input
///   ends before the matching `)`.
/// - Errors from the inner expression.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let open = tokens.next().map_or(0, |(_, position)| *position);
    let inner = parse_expression(tokens)?;

    match tokens.next() {
        Some((Token::RParen, _)) => Ok(inner),
        Some((Token::End, _)) | None => Err(ParseError::UnmatchedOpen { position: open }),
        Some((tok, position)) => Err(misplaced_after_operand(tok, *position)),
    }
}
