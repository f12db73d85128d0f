use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur while tokenizing an expression.
pub enum LexError {
    /// One or more characters are not part of the expression alphabet.
    #[error("Error at position {position}: Invalid character(s): {}.", quote_chars(.chars))]
    InvalidCharacter {
        /// The offending characters, sorted and without duplicates.
        chars:    Vec<char>,
        /// Byte offset of the first offending character.
        position: usize,
    },
    /// A decimal point was not followed by any digit.
    #[error("Error at position {position}: Malformed number '{literal}', expected digits after the decimal point.")]
    MalformedNumber {
        /// The literal as written, including the dangling point.
        literal:  String,
        /// Byte offset where the literal starts.
        position: usize,
    },
    /// A literal value was too large to be represented as a finite number.
    #[error("Error at position {position}: Literal '{literal}' is too large.")]
    LiteralTooLarge {
        /// The literal as written.
        literal:  String,
        /// Byte offset where the literal starts.
        position: usize,
    },
}

impl LexError {
    /// Byte offset the error refers to.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::InvalidCharacter { position, .. }
            | Self::MalformedNumber { position, .. }
            | Self::LiteralTooLarge { position, .. } => *position,
        }
    }
}

fn quote_chars(chars: &[char]) -> String {
    chars.iter()
         .map(|c| format!("'{c}'"))
         .collect::<Vec<_>>()
         .join(", ")
}
