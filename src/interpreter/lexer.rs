use std::{collections::BTreeSet, fmt, str::FromStr};

use logos::Logos;
use tracing::trace;

use crate::error::LexError;

/// A token paired with the byte offset where it starts.
pub type Spanned = (Token, usize);

/// Represents a lexical token in an arithmetic expression.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// [`tokenize`] always terminates the sequence with [`Token::End`].
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(error = LexFault)]
pub enum Token {
    /// Numeric literal tokens, such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+\.", reject_dangling_point)]
    Number(f64),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// End of input. Never matched from text; appended by [`tokenize`].
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "'{value}'"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::End => write!(f, "end of input"),
        }
    }
}

/// Why the lexer rejected a slice of input.
///
/// Logos reports unmatched input with the default variant; the callbacks
/// below produce the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexFault {
    /// No token pattern matches at this position.
    #[default]
    InvalidCharacter,
    /// A literal ends with a decimal point.
    DanglingPoint,
    /// A literal does not fit in a finite `f64`.
    TooLarge,
}

/// How invalid characters are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidCharacterPolicy {
    /// Stop at the first character that cannot start a token.
    #[default]
    First,
    /// Scan the whole input and report every character outside the
    /// expression alphabet at once.
    Collect,
}

impl fmt::Display for InvalidCharacterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::Collect => write!(f, "collect"),
        }
    }
}

impl FromStr for InvalidCharacterPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "collect" | "all" => Ok(Self::Collect),
            other => Err(format!("unknown invalid-character policy '{other}', expected 'first' or 'collect'")),
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(f64)`: The parsed value.
/// - `Err(LexFault::TooLarge)`: If the value is not finite.
fn parse_number(lex: &mut logos::Lexer<Token>) -> Result<f64, LexFault> {
    match lex.slice().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LexFault::TooLarge),
    }
}

/// Rejects a literal that ends with `.` such as `2.`.
fn reject_dangling_point(_lex: &mut logos::Lexer<Token>) -> Result<f64, LexFault> {
    Err(LexFault::DanglingPoint)
}

/// Returns whether `c` may appear in a normalized expression at all.
#[must_use]
pub const fn is_expression_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
}

/// Tokenizes an expression, failing at the first invalid character.
///
/// The input is expected in normalized form (see
/// [`crate::cache::normalize`]); whitespace is an invalid character here.
///
/// # Errors
/// Returns a [`LexError`] for invalid characters, literals with a dangling
/// decimal point and literals too large to represent.
///
/// # Example
/// ```
/// use memocalc::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2+3.5").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Number(2.0), 0),
///                 (Token::Plus, 1),
///                 (Token::Number(3.5), 2),
///                 (Token::End, 5)]);
///
/// assert!(tokenize("2+a").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, LexError> {
    tokenize_with(source, InvalidCharacterPolicy::First)
}

/// Tokenizes an expression using the given invalid-character policy.
///
/// The whole input is tokenized before anything is returned; the resulting
/// vector always ends with [`Token::End`] positioned at `source.len()`.
///
/// # Errors
/// See [`tokenize`]. With [`InvalidCharacterPolicy::Collect`] every invalid
/// character is reported in one [`LexError::InvalidCharacter`], sorted and
/// de-duplicated.
pub fn tokenize_with(source: &str,
                     policy: InvalidCharacterPolicy)
                     -> Result<Vec<Spanned>, LexError> {
    if policy == InvalidCharacterPolicy::Collect {
        collect_invalid_characters(source)?;
    }

    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(tok) => tokens.push((tok, span.start)),
            Err(LexFault::InvalidCharacter) => {
                let found = source.get(span.start..)
                                  .and_then(|rest| rest.chars().next())
                                  .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(LexError::InvalidCharacter { chars:    vec![found],
                                                        position: span.start, });
            },
            Err(LexFault::DanglingPoint) => {
                return Err(LexError::MalformedNumber { literal:  lexer.slice().to_string(),
                                                       position: span.start, });
            },
            Err(LexFault::TooLarge) => {
                return Err(LexError::LiteralTooLarge { literal:  lexer.slice().to_string(),
                                                       position: span.start, });
            },
        }
    }

    tokens.push((Token::End, source.len()));
    trace!(count = tokens.len(), "tokenized expression");

    Ok(tokens)
}

fn collect_invalid_characters(source: &str) -> Result<(), LexError> {
    let Some(position) = source.char_indices()
                               .find(|(_, c)| !is_expression_char(*c))
                               .map(|(i, _)| i)
    else {
        return Ok(());
    };

    let chars: BTreeSet<char> = source.chars().filter(|c| !is_expression_char(*c)).collect();

    Err(LexError::InvalidCharacter { chars: chars.into_iter().collect(),
                                     position })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(tok, _)| tok).collect()
    }

    #[test]
    fn empty_input_is_only_end() {
        assert_eq!(tokenize("").unwrap(), vec![(Token::End, 0)]);
    }

    #[test]
    fn operators_and_parentheses() {
        assert_eq!(kinds("(1-2)*3/4"),
                   vec![Token::LParen,
                        Token::Number(1.0),
                        Token::Minus,
                        Token::Number(2.0),
                        Token::RParen,
                        Token::Star,
                        Token::Number(3.0),
                        Token::Slash,
                        Token::Number(4.0),
                        Token::End]);
    }

    #[test]
    fn whitespace_is_not_a_token() {
        let err = tokenize("1 +2").unwrap_err();
        assert_eq!(err,
                   LexError::InvalidCharacter { chars:    vec![' '],
                                                position: 1, });
    }

    #[test]
    fn first_invalid_character_is_reported() {
        let err = tokenize("2+a*b").unwrap_err();
        assert_eq!(err,
                   LexError::InvalidCharacter { chars:    vec!['a'],
                                                position: 2, });
    }

    #[test]
    fn collect_policy_reports_every_invalid_character() {
        let err = tokenize_with("x+2*b+x", InvalidCharacterPolicy::Collect).unwrap_err();
        assert_eq!(err,
                   LexError::InvalidCharacter { chars:    vec!['b', 'x'],
                                                position: 0, });
    }

    #[test]
    fn collect_policy_accepts_valid_input() {
        assert_eq!(tokenize_with("1+2", InvalidCharacterPolicy::Collect).unwrap(),
                   tokenize("1+2").unwrap());
    }

    #[test]
    fn dangling_point_is_malformed() {
        let err = tokenize("2.+1").unwrap_err();
        assert_eq!(err,
                   LexError::MalformedNumber { literal:  "2.".to_string(),
                                               position: 0, });
    }

    #[test]
    fn leading_point_is_invalid() {
        let err = tokenize(".5").unwrap_err();
        assert!(matches!(err, LexError::InvalidCharacter { ref chars, position: 0 } if chars == &['.']));
    }

    #[test]
    fn second_point_is_invalid() {
        let err = tokenize("1.2.3").unwrap_err();
        assert!(matches!(err, LexError::InvalidCharacter { position: 3, .. }));
    }

    #[test]
    fn huge_literal_is_rejected() {
        let literal = "9".repeat(400);
        let err = tokenize(&literal).unwrap_err();
        assert!(matches!(err, LexError::LiteralTooLarge { position: 0, .. }));
    }

    #[test]
    fn non_ascii_character_is_reported_whole() {
        let err = tokenize("1+é").unwrap_err();
        assert_eq!(err,
                   LexError::InvalidCharacter { chars:    vec!['é'],
                                                position: 2, });
    }

    #[test]
    fn policy_from_str() {
        assert_eq!("first".parse::<InvalidCharacterPolicy>(),
                   Ok(InvalidCharacterPolicy::First));
        assert_eq!("Collect".parse::<InvalidCharacterPolicy>(),
                   Ok(InvalidCharacterPolicy::Collect));
        assert!("nope".parse::<InvalidCharacterPolicy>().is_err());
    }
}
