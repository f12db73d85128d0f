use crate::{
    error::ParseError,
    interpreter::lexer::{Spanned, Token},
};

/// Builds the error for a token that appears right after a complete operand
/// where only an operator, a closing parenthesis or the end may follow.
///
/// Shared by both strategies so that they agree on every rejection:
/// - `)` with nothing left to close is an [`ParseError::UnmatchedClose`],
/// - `(` starts input that cannot continue the expression, reported as
///   [`ParseError::TrailingInput`],
/// - a number directly after an operand is an
///   [`ParseError::UnexpectedToken`].
pub(in crate::interpreter::parser) fn misplaced_after_operand(token: &Token,
                                                              position: usize)
                                                              -> ParseError {
    match token {
        Token::RParen => ParseError::UnmatchedClose { position },
        Token::LParen => ParseError::TrailingInput { token: token.to_string(),
                                                     position },
        _ => ParseError::UnexpectedToken { token: token.to_string(),
                                           position },
    }
}

/// Rejects token sequences nested deeper than `limit`.
///
/// Depth counts open parentheses plus the current run of prefix signs, which
/// is what drives recursion in the descent parser and in tree evaluation. A
/// sign is a prefix sign when it follows the start of input, `(`, or another
/// operator.
///
/// # Errors
/// Returns [`ParseError::NestingTooDeep`] at the first token that crosses
/// the limit.
///
/// # Example
/// ```
/// use memocalc::interpreter::{lexer::tokenize, parser::utils::check_nesting};
///
/// let tokens = tokenize("((1))").unwrap();
/// assert!(check_nesting(&tokens, 2).is_ok());
/// assert!(check_nesting(&tokens, 1).is_err());
///
/// let signs = tokenize("---1").unwrap();
/// assert!(check_nesting(&signs, 2).is_err());
/// ```
pub fn check_nesting(tokens: &[Spanned], limit: usize) -> Result<(), ParseError> {
    let mut open = 0usize;
    let mut signs = 0usize;
    let mut expect_operand = true;

    for (token, position) in tokens {
        match token {
            Token::LParen => {
                open += 1;
                expect_operand = true;
            },
            Token::RParen => {
                open = open.saturating_sub(1);
                expect_operand = false;
            },
            Token::Plus | Token::Minus if expect_operand => signs += 1,
            Token::Plus | Token::Minus | Token::Star | Token::Slash => expect_operand = true,
            Token::Number(_) => {
                signs = 0;
                expect_operand = false;
            },
            Token::End => {},
        }

        if open + signs > limit {
            return Err(ParseError::NestingTooDeep { limit,
                                                    position: *position });
        }
    }

    Ok(())
}
