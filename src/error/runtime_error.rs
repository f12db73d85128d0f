use thiserror::Error;

use crate::error::ErrorKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Attempted division by zero.
    #[error("Error at position {position}: Division by zero.")]
    DivisionByZero {
        /// Byte offset of the `/` operator.
        position: usize,
    },
    /// An operation produced an infinite or NaN result.
    #[error("Error at position {position}: Result is too large to represent.")]
    Overflow {
        /// Byte offset of the operator that overflowed.
        position: usize,
    },
    /// A postfix operator had fewer operands available than it needs.
    #[error("Error at position {position}: Stack underflow, operator needs {needed} operand(s) but {available} available.")]
    StackUnderflow {
        /// Operands the operator consumes.
        needed:    usize,
        /// Operands that were on the stack.
        available: usize,
        /// Byte offset of the operator.
        position:  usize,
    },
    /// A postfix sequence did not leave exactly one value behind.
    #[error("Malformed expression: {remaining} values left on the stack, expected exactly 1.")]
    MalformedExpression {
        /// Number of values left on the stack.
        remaining: usize,
    },
}

impl RuntimeError {
    /// Byte offset the error refers to, if any.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::DivisionByZero { position }
            | Self::Overflow { position }
            | Self::StackUnderflow { position, .. } => Some(*position),
            Self::MalformedExpression { .. } => None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::StackUnderflow { .. } => ErrorKind::StackUnderflow,
            Self::MalformedExpression { .. } => ErrorKind::MalformedExpression,
        }
    }
}
