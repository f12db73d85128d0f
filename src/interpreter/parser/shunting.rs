use std::fmt;

use crate::{
    ast::{BinaryOperator, UNARY_PRECEDENCE, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{binary::token_to_binary_operator, core::ParseResult, utils::misplaced_after_operand},
    },
};

/// One element of a reverse-Polish sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostfixItem {
    /// Pushes a value.
    Number(f64),
    /// Pops one operand, pushes the result.
    Unary(UnaryOperator),
    /// Pops the right then the left operand, pushes the result.
    Binary(BinaryOperator),
}

impl fmt::Display for PostfixItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            // `~` keeps unary minus distinguishable from subtraction.
            Self::Unary(UnaryOperator::Negate) => write!(f, "~"),
            Self::Unary(UnaryOperator::Plus) => write!(f, "#"),
            Self::Binary(op) => write!(f, "{op}"),
        }
    }
}

/// Renders a postfix sequence as space separated items, e.g. `2 3 4 * +`.
#[must_use]
pub fn render_postfix(items: &[(PostfixItem, usize)]) -> String {
    items.iter()
         .map(|(item, _)| item.to_string())
         .collect::<Vec<_>>()
         .join(" ")
}

/// Entries of the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Open(usize),
    Unary(UnaryOperator, usize),
    Binary(BinaryOperator, usize),
}

impl Pending {
    /// Converts a stacked operator into its output item. `(` never reaches
    /// the output.
    const fn emit(self) -> Option<(PostfixItem, usize)> {
        match self {
            Self::Open(_) => None,
            Self::Unary(op, position) => Some((PostfixItem::Unary(op), position)),
            Self::Binary(op, position) => Some((PostfixItem::Binary(op), position)),
        }
    }

    const fn precedence(self) -> Option<u8> {
        match self {
            Self::Open(_) => None,
            Self::Unary(..) => Some(UNARY_PRECEDENCE),
            Self::Binary(op, _) => Some(op.precedence()),
        }
    }
}

/// Converts an infix token sequence to reverse-Polish order.
///
/// Numbers go straight to the output. A binary operator first pops every
/// stacked operator whose precedence is greater than or equal to its own,
/// which makes equal-precedence operators left-associative. Prefix signs are
/// pushed without popping and carry the highest precedence. `(` is pushed
/// unconditionally; `)` pops up to the matching `(` and discards it. At the
/// end of input everything left is popped.
///
/// The conversion also tracks whether an operand or an operator is expected
/// next, so malformed input is rejected with the same errors the descent
/// parser reports instead of producing an unevaluable sequence.
///
/// # Errors
/// - [`ParseError::UnmatchedClose`] for a `)` with no `(` on the stack.
/// - [`ParseError::UnmatchedOpen`] for a `(` still stacked at the end.
/// - [`ParseError::MissingOperand`], [`ParseError::UnexpectedToken`] or
///   [`ParseError::TrailingInput`] for misplaced tokens.
///
/// # Example
/// ```
/// use memocalc::interpreter::{
///     lexer::tokenize,
///     parser::shunting::{render_postfix, to_postfix},
/// };
///
/// let postfix = to_postfix(&tokenize("2+3*4").unwrap()).unwrap();
/// assert_eq!(render_postfix(&postfix), "2 3 4 * +");
///
/// let postfix = to_postfix(&tokenize("(2+3)*-4").unwrap()).unwrap();
/// assert_eq!(render_postfix(&postfix), "2 3 + 4 ~ *");
/// ```
pub fn to_postfix(tokens: &[Spanned]) -> ParseResult<Vec<(PostfixItem, usize)>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Pending> = Vec::new();
    let mut expect_operand = true;

    for &(token, position) in tokens {
        if expect_operand {
            match token {
                Token::Number(value) => {
                    output.push((PostfixItem::Number(value), position));
                    expect_operand = false;
                },
                Token::LParen => stack.push(Pending::Open(position)),
                Token::Minus => stack.push(Pending::Unary(UnaryOperator::Negate, position)),
                Token::Plus => stack.push(Pending::Unary(UnaryOperator::Plus, position)),
                Token::Star | Token::Slash | Token::RParen | Token::End => {
                    return Err(ParseError::MissingOperand { found: token.to_string(),
                                                            position });
                },
            }
            continue;
        }

        match token {
            Token::Plus | Token::Minus | Token::Star | Token::Slash => {
                let Some(op) = token_to_binary_operator(&token) else {
                    continue;
                };
                while let Some(&top) = stack.last()
                      && top.precedence().is_some_and(|p| p >= op.precedence())
                {
                    stack.pop();
                    output.extend(top.emit());
                }
                stack.push(Pending::Binary(op, position));
                expect_operand = true;
            },
            Token::RParen => loop {
                match stack.pop() {
                    Some(Pending::Open(_)) => break,
                    Some(pending) => output.extend(pending.emit()),
                    None => return Err(ParseError::UnmatchedClose { position }),
                }
            },
            Token::End => {
                while let Some(pending) = stack.pop() {
                    if let Pending::Open(open) = pending {
                        return Err(ParseError::UnmatchedOpen { position: open });
                    }
                    output.extend(pending.emit());
                }
                return Ok(output);
            },
            Token::Number(_) | Token::LParen => {
                return Err(misplaced_after_operand(&token, position));
            },
        }
    }

    // Sequences from `tokenize` always end with `End`; anything else is cut
    // short and still needs an operand or a closing parenthesis.
    if expect_operand {
        return Err(ParseError::MissingOperand { found:    Token::End.to_string(),
                                                position: tokens.last().map_or(0, |(_, p)| *p), });
    }
    while let Some(pending) = stack.pop() {
        if let Pending::Open(open) = pending {
            return Err(ParseError::UnmatchedOpen { position: open });
        }
        output.extend(pending.emit());
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn postfix(source: &str) -> ParseResult<String> {
        to_postfix(&tokenize(source).unwrap()).map(|items| render_postfix(&items))
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(postfix("2+3*4"), Ok("2 3 4 * +".to_string()));
        assert_eq!(postfix("(2+3)*4"), Ok("2 3 + 4 *".to_string()));
        assert_eq!(postfix("10-2-3"), Ok("10 2 - 3 -".to_string()));
        assert_eq!(postfix("8/4*2"), Ok("8 4 / 2 *".to_string()));
    }

    #[test]
    fn prefix_signs() {
        assert_eq!(postfix("--5"), Ok("5 ~ ~".to_string()));
        assert_eq!(postfix("-2*3"), Ok("2 ~ 3 *".to_string()));
        assert_eq!(postfix("+(1)"), Ok("1 #".to_string()));
        assert_eq!(postfix("-(2+3)"), Ok("2 3 + ~".to_string()));
    }

    #[test]
    fn positions_follow_the_operators() {
        let items = to_postfix(&tokenize("1-2").unwrap()).unwrap();
        assert_eq!(items,
                   vec![(PostfixItem::Number(1.0), 0),
                        (PostfixItem::Number(2.0), 2),
                        (PostfixItem::Binary(BinaryOperator::Sub), 1)]);
    }

    #[test]
    fn parenthesis_mismatches() {
        assert_eq!(postfix("2+3)"), Err(ParseError::UnmatchedClose { position: 3 }));
        assert_eq!(postfix("(2+3"), Err(ParseError::UnmatchedOpen { position: 0 }));
        assert_eq!(postfix("(1+(2"), Err(ParseError::UnmatchedOpen { position: 3 }));
    }

    #[test]
    fn misplaced_tokens() {
        assert!(matches!(postfix("2+"), Err(ParseError::MissingOperand { position: 2, .. })));
        assert!(matches!(postfix("/2"), Err(ParseError::MissingOperand { position: 0, .. })));
        assert!(matches!(postfix("(2)3"), Err(ParseError::UnexpectedToken { position: 3, .. })));
        assert!(matches!(postfix("2(3)"), Err(ParseError::TrailingInput { position: 1, .. })));
    }

    #[test]
    fn truncated_sequence_without_end() {
        let tokens = tokenize("(1+2").unwrap();
        let without_end = &tokens[..tokens.len() - 1];
        assert_eq!(to_postfix(without_end), Err(ParseError::UnmatchedOpen { position: 0 }));

        let dangling = &tokenize("1+").unwrap()[..2];
        assert!(matches!(to_postfix(dangling), Err(ParseError::MissingOperand { .. })));
    }
}
