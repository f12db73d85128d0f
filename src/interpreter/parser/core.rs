use std::{fmt, iter::Peekable, str::FromStr};

use tracing::trace;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            binary::parse_additive,
            shunting::{PostfixItem, to_postfix},
            utils::{check_nesting, misplaced_after_operand},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Default limit for [`check_nesting`].
pub const MAX_NESTING: usize = 256;

/// The structure a parser hands to the evaluator.
///
/// Each strategy produces its own representation; they are never mixed.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluable {
    /// An expression tree built by recursive descent.
    Tree(Expr),
    /// A reverse-Polish sequence built by the shunting-yard algorithm.
    Postfix(Vec<(PostfixItem, usize)>),
}

/// Turns a token sequence into something the evaluator can run.
pub trait ExpressionParser {
    /// Parses a complete token sequence terminated by [`Token::End`].
    ///
    /// # Errors
    /// Returns a [`ParseError`] when the tokens do not form exactly one
    /// expression.
    fn parse(&self, tokens: &[Spanned]) -> ParseResult<Evaluable>;
}

/// Precedence-climbing recursive descent producing [`Evaluable::Tree`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveDescent;

/// Dijkstra's shunting-yard producing [`Evaluable::Postfix`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShuntingYard;

impl ExpressionParser for RecursiveDescent {
    fn parse(&self, tokens: &[Spanned]) -> ParseResult<Evaluable> {
        parse_tree(tokens).map(Evaluable::Tree)
    }
}

impl ExpressionParser for ShuntingYard {
    fn parse(&self, tokens: &[Spanned]) -> ParseResult<Evaluable> {
        let postfix = to_postfix(tokens)?;
        trace!(items = postfix.len(), "converted to postfix");
        Ok(Evaluable::Postfix(postfix))
    }
}

/// Which parsing algorithm an engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Recursive descent, see [`RecursiveDescent`].
    #[default]
    Descent,
    /// Shunting-yard, see [`ShuntingYard`].
    ShuntingYard,
}

impl Strategy {
    /// Returns the parser implementing this strategy.
    #[must_use]
    pub fn parser(self) -> &'static dyn ExpressionParser {
        match self {
            Self::Descent => &RecursiveDescent,
            Self::ShuntingYard => &ShuntingYard,
        }
    }

    /// Checks the nesting limit, then parses with this strategy.
    ///
    /// # Errors
    /// Returns [`ParseError::NestingTooDeep`] when `max_nesting` is exceeded,
    /// otherwise whatever the chosen parser reports.
    ///
    /// # Example
    /// ```
    /// use memocalc::interpreter::{
    ///     lexer::tokenize,
    ///     parser::core::{Evaluable, MAX_NESTING, Strategy},
    /// };
    ///
    /// let tokens = tokenize("1+2*3").unwrap();
    /// assert!(matches!(Strategy::Descent.parse(&tokens, MAX_NESTING),
    ///                  Ok(Evaluable::Tree(_))));
    /// assert!(matches!(Strategy::ShuntingYard.parse(&tokens, MAX_NESTING),
    ///                  Ok(Evaluable::Postfix(_))));
    /// ```
    pub fn parse(self, tokens: &[Spanned], max_nesting: usize) -> ParseResult<Evaluable> {
        check_nesting(tokens, max_nesting)?;
        self.parser().parse(tokens)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descent => write!(f, "descent"),
            Self::ShuntingYard => write!(f, "shunting-yard"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "descent" | "recursive-descent" | "rd" => Ok(Self::Descent),
            "shunting-yard" | "shunting" | "postfix" | "rpn" => Ok(Self::ShuntingYard),
            other => {
                Err(format!("unknown strategy '{other}', expected 'descent' or 'shunting-yard'"))
            },
        }
    }
}

/// Parses a full expression.
///
/// This is the entry point for recursive-descent parsing. It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, offset)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_additive(tokens)
}

/// Parses a whole token sequence into a tree.
///
/// After the expression, only [`Token::End`] may follow. A stray `)` is a
/// parenthesis mismatch, anything else is misplaced input.
///
/// # Errors
/// Any [`ParseError`] raised while descending, or one describing the first
/// token left over after a complete expression.
pub fn parse_tree(tokens: &[Spanned]) -> ParseResult<Expr> {
    let mut iter = tokens.iter().peekable();
    let expr = parse_expression(&mut iter)?;

    match iter.next() {
        None | Some((Token::End, _)) => Ok(expr),
        Some((tok, position)) => Err(misplaced_after_operand(tok, *position)),
    }
}
