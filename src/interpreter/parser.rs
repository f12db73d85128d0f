/// Binary expression parsing.
///
/// Implements the additive and multiplicative precedence levels of the
/// recursive-descent parser.
pub mod binary;

/// Core parser entry points.
///
/// Defines the parser result type, the [`core::ExpressionParser`] capability,
/// the strategy selector and the structure handed to the evaluator.
pub mod core;

/// Shunting-yard conversion.
///
/// Converts infix tokens to a reverse-Polish sequence using an operator
/// stack.
pub mod shunting;

/// Unary and primary expression parsing.
///
/// Handles prefix signs, number literals and parenthesized groups.
pub mod unary;

/// Parser utility functions.
///
/// Error classification shared by both strategies and the nesting check.
pub mod utils;
