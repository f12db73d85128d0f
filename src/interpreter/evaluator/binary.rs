use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::evaluator::core::EvalResult,
};

/// Evaluates a binary arithmetic operation.
///
/// Division by zero is checked explicitly, for either sign of zero and
/// regardless of the dividend. Any other operation that leaves the finite
/// range (e.g. multiplying two very large literals) is reported as an
/// overflow instead of producing an infinity.
///
/// # Parameters
/// - `op`: The arithmetic operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
/// - `position`: Byte offset of the operator for error reporting.
///
/// # Returns
/// An `EvalResult<f64>` containing the computed value.
///
/// # Example
/// ```
/// use memocalc::{
///     ast::BinaryOperator,
///     error::RuntimeError,
///     interpreter::evaluator::binary::eval_binary,
/// };
///
/// assert_eq!(eval_binary(BinaryOperator::Mul, 1.5, 2.0, 1), Ok(3.0));
/// assert_eq!(eval_binary(BinaryOperator::Div, 1.0, 0.0, 1),
///            Err(RuntimeError::DivisionByZero { position: 1 }));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: f64,
                   right: f64,
                   position: usize)
                   -> EvalResult<f64> {
    use BinaryOperator::{Add, Div, Mul, Sub};

    let value = match op {
        Add => left + right,
        Sub => left - right,
        Mul => left * right,
        Div => {
            if right == 0.0 {
                return Err(RuntimeError::DivisionByZero { position });
            }
            left / right
        },
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(RuntimeError::Overflow { position })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_divisor() {
        assert_eq!(eval_binary(BinaryOperator::Div, -3.0, -0.0, 4),
                   Err(RuntimeError::DivisionByZero { position: 4 }));
    }

    #[test]
    fn zero_over_zero_is_division_by_zero() {
        assert_eq!(eval_binary(BinaryOperator::Div, 0.0, 0.0, 0),
                   Err(RuntimeError::DivisionByZero { position: 0 }));
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(eval_binary(BinaryOperator::Mul, f64::MAX, 2.0, 7),
                   Err(RuntimeError::Overflow { position: 7 }));
        assert_eq!(eval_binary(BinaryOperator::Div, f64::MAX, 0.5, 2),
                   Err(RuntimeError::Overflow { position: 2 }));
    }

    #[test]
    fn subtraction_order() {
        assert_eq!(eval_binary(BinaryOperator::Sub, 10.0, 4.0, 0), Ok(6.0));
        assert_eq!(eval_binary(BinaryOperator::Div, 1.0, 4.0, 0), Ok(0.25));
    }
}
