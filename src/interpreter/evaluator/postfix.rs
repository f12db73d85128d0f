use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::eval_binary, core::EvalResult, unary::eval_unary},
        parser::shunting::PostfixItem,
    },
};

/// Evaluates a reverse-Polish sequence on a value stack.
///
/// Numbers push; a unary item pops one value; a binary item pops the right
/// operand first, then the left one, and pushes the result.
///
/// # Errors
/// - [`RuntimeError::StackUnderflow`] when an operator finds too few values.
/// - [`RuntimeError::MalformedExpression`] when the sequence does not leave
///   exactly one value.
/// - Arithmetic errors from [`eval_binary`].
///
/// # Example
/// ```
/// use memocalc::{
///     ast::BinaryOperator,
///     error::RuntimeError,
///     interpreter::{evaluator::postfix::eval_postfix, parser::shunting::PostfixItem},
/// };
///
/// // 7 2 -
/// let items = [(PostfixItem::Number(7.0), 0),
///              (PostfixItem::Number(2.0), 2),
///              (PostfixItem::Binary(BinaryOperator::Sub), 1)];
/// assert_eq!(eval_postfix(&items), Ok(5.0));
///
/// // 7 -
/// let items = [(PostfixItem::Number(7.0), 0),
///              (PostfixItem::Binary(BinaryOperator::Sub), 1)];
/// assert!(matches!(eval_postfix(&items),
///                  Err(RuntimeError::StackUnderflow { .. })));
/// ```
pub fn eval_postfix(items: &[(PostfixItem, usize)]) -> EvalResult<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(items.len());

    for &(item, position) in items {
        match item {
            PostfixItem::Number(value) => stack.push(value),
            PostfixItem::Unary(op) => {
                let Some(operand) = stack.pop() else {
                    return Err(RuntimeError::StackUnderflow { needed: 1,
                                                              available: 0,
                                                              position });
                };
                stack.push(eval_unary(op, operand));
            },
            PostfixItem::Binary(op) => {
                let available = stack.len();
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    return Err(RuntimeError::StackUnderflow { needed: 2,
                                                              available,
                                                              position });
                };
                stack.push(eval_binary(op, left, right, position)?);
            },
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(RuntimeError::MalformedExpression { remaining: stack.len() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, UnaryOperator};

    fn num(value: f64) -> (PostfixItem, usize) {
        (PostfixItem::Number(value), 0)
    }

    fn bin(op: BinaryOperator) -> (PostfixItem, usize) {
        (PostfixItem::Binary(op), 0)
    }

    #[test]
    fn operand_order_matters() {
        assert_eq!(eval_postfix(&[num(8.0), num(2.0), bin(BinaryOperator::Div)]), Ok(4.0));
        assert_eq!(eval_postfix(&[num(2.0), num(8.0), bin(BinaryOperator::Sub)]), Ok(-6.0));
    }

    #[test]
    fn unary_items() {
        let items = [num(3.0), (PostfixItem::Unary(UnaryOperator::Negate), 0)];
        assert_eq!(eval_postfix(&items), Ok(-3.0));

        let items = [(PostfixItem::Unary(UnaryOperator::Negate), 5)];
        assert_eq!(eval_postfix(&items),
                   Err(RuntimeError::StackUnderflow { needed:    1,
                                                      available: 0,
                                                      position:  5, }));
    }

    #[test]
    fn underflow_reports_available_values() {
        let items = [num(1.0), (PostfixItem::Binary(BinaryOperator::Add), 3)];
        assert_eq!(eval_postfix(&items),
                   Err(RuntimeError::StackUnderflow { needed:    2,
                                                      available: 1,
                                                      position:  3, }));
    }

    #[test]
    fn leftover_values_are_malformed() {
        assert_eq!(eval_postfix(&[num(1.0), num(2.0)]),
                   Err(RuntimeError::MalformedExpression { remaining: 2 }));
        assert_eq!(eval_postfix(&[]), Err(RuntimeError::MalformedExpression { remaining: 0 }));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(eval_postfix(&[num(1.0), num(0.0), bin(BinaryOperator::Div)]),
                   Err(RuntimeError::DivisionByZero { position: 0 }));
    }
}
