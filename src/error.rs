/// Lexing errors.
///
/// Defines the errors raised while turning source text into tokens: invalid
/// characters, malformed decimal literals and literals too large to represent.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while recognizing the grammar:
/// missing operands, misplaced tokens, trailing input, excessive nesting and
/// mismatched parentheses.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation, such as
/// division by zero, overflow, or a malformed postfix sequence.
pub mod runtime_error;

use std::fmt;

use thiserror::Error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any failure of a single evaluation request.
///
/// Each pipeline stage contributes its own error type; this enum lets the
/// cache and the callers handle them uniformly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The lexer rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The parser rejected the token sequence.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation of a structurally valid expression failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl EvalError {
    /// Returns the coarse kind of this error.
    ///
    /// # Example
    /// ```
    /// use memocalc::{
    ///     compute,
    ///     config::EngineConfig,
    ///     error::ErrorKind,
    /// };
    ///
    /// let err = compute("1/0", &EngineConfig::default()).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lex,
            Self::Parse(e) => e.kind(),
            Self::Runtime(e) => e.kind(),
        }
    }

    /// Byte offset into the normalized expression the error refers to, when
    /// there is one.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::Lex(e) => Some(e.position()),
            Self::Parse(e) => Some(e.position()),
            Self::Runtime(e) => e.position(),
        }
    }
}

/// Coarse classification of evaluation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid characters or malformed number literals.
    Lex,
    /// Missing operands, misplaced tokens, trailing input, excessive nesting.
    Syntax,
    /// A `(` without its `)` or the other way around.
    ParenMismatch,
    /// The right operand of `/` was zero.
    DivisionByZero,
    /// An intermediate result was not finite.
    Overflow,
    /// A postfix operator found too few operands.
    StackUnderflow,
    /// A postfix sequence did not reduce to exactly one value.
    MalformedExpression,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lex => "LexError",
            Self::Syntax => "SyntaxError",
            Self::ParenMismatch => "ParenMismatch",
            Self::DivisionByZero => "DivisionByZero",
            Self::Overflow => "Overflow",
            Self::StackUnderflow => "StackUnderflow",
            Self::MalformedExpression => "MalformedExpression",
        };
        f.write_str(name)
    }
}
