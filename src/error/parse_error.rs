use thiserror::Error;

use crate::error::ErrorKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during parsing.
///
/// Both parsing strategies report exactly the same variant for the same
/// input.
pub enum ParseError {
    /// A number appeared directly after a complete operand.
    #[error("Error at position {position}: invalid expression, unexpected token {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// An operand was expected but an operator, `)` or the end was found.
    #[error("Error at position {position}: invalid expression, missing operand before {found}.")]
    MissingOperand {
        /// What was found instead of the operand.
        found:    String,
        /// Byte offset of what was found.
        position: usize,
    },
    /// Found extra tokens after a structurally complete expression.
    #[error("Error at position {position}: unexpected trailing input {token}.")]
    TrailingInput {
        /// The extra token.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Parentheses and prefix signs are nested too deeply.
    #[error("Error at position {position}: expression nests deeper than {limit} levels.")]
    NestingTooDeep {
        /// The configured maximum depth.
        limit:    usize,
        /// Byte offset of the token that crossed the limit.
        position: usize,
    },
    /// An opening parenthesis was never closed.
    #[error("Error at position {position}: unclosed parenthesis.")]
    UnmatchedOpen {
        /// Byte offset of the innermost unclosed `(`.
        position: usize,
    },
    /// A closing parenthesis has no matching opening one.
    #[error("Error at position {position}: unexpected closing parenthesis.")]
    UnmatchedClose {
        /// Byte offset of the stray `)`.
        position: usize,
    },
}

impl ParseError {
    /// Byte offset the error refers to.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::MissingOperand { position, .. }
            | Self::TrailingInput { position, .. }
            | Self::NestingTooDeep { position, .. }
            | Self::UnmatchedOpen { position }
            | Self::UnmatchedClose { position } => *position,
        }
    }

    /// `ParenMismatch` for parenthesis errors, `Syntax` for everything else.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnmatchedOpen { .. } | Self::UnmatchedClose { .. } => ErrorKind::ParenMismatch,
            _ => ErrorKind::Syntax,
        }
    }
}
