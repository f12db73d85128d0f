/// Binary operator evaluation logic.
///
/// Applies `+ - * /` to two operands, rejecting division by zero and
/// non-finite results.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Applies prefix signs.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the tree walker, the evaluation result type and the dispatch over
/// [`crate::interpreter::parser::core::Evaluable`].
pub mod core;

/// Evaluation of postfix sequences.
///
/// Runs reverse-Polish sequences on a value stack.
pub mod postfix;
