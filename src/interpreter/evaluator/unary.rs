use crate::ast::UnaryOperator;

/// Evaluates a prefix sign on a value.
///
/// Supported operators:
/// - `Negate`: numeric negation.
/// - `Plus`: the value unchanged.
///
/// Negation never overflows, so this cannot fail.
///
/// # Example
/// ```
/// use memocalc::{ast::UnaryOperator, interpreter::evaluator::unary::eval_unary};
///
/// assert_eq!(eval_unary(UnaryOperator::Negate, 5.0), -5.0);
/// assert_eq!(eval_unary(UnaryOperator::Plus, -5.0), -5.0);
/// ```
#[must_use]
pub fn eval_unary(op: UnaryOperator, value: f64) -> f64 {
    match op {
        UnaryOperator::Negate => -value,
        UnaryOperator::Plus => value,
    }
}
