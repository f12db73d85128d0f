use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::eval_binary, postfix::eval_postfix, unary::eval_unary},
        parser::core::Evaluable,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl Evaluable {
    /// Evaluates the parsed structure with the evaluator matching its
    /// representation.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] on division by zero, overflow, or a
    /// malformed postfix sequence.
    ///
    /// # Example
    /// ```
    /// use memocalc::interpreter::{
    ///     lexer::tokenize,
    ///     parser::core::{MAX_NESTING, Strategy},
    /// };
    ///
    /// let tokens = tokenize("(2+3)*4").unwrap();
    /// for strategy in [Strategy::Descent, Strategy::ShuntingYard] {
    ///     let parsed = strategy.parse(&tokens, MAX_NESTING).unwrap();
    ///     assert_eq!(parsed.evaluate().unwrap(), 20.0);
    /// }
    /// ```
    pub fn evaluate(&self) -> EvalResult<f64> {
        match self {
            Self::Tree(expr) => eval_expr(expr),
            Self::Postfix(items) => eval_postfix(items),
        }
    }
}

/// Pending work for [`eval_expr`].
enum Step<'e> {
    Visit(&'e Expr),
    Unary(UnaryOperator, usize),
    Binary(BinaryOperator, usize),
}

/// Evaluates an expression tree and returns the resulting value.
///
/// Operands are always fully evaluated before the node itself, the left
/// operand of a binary node before the right one. The walk keeps its own
/// work and value stacks, so a chain like `1+1+...+1` of any length is
/// evaluated without recursion.
///
/// # Errors
/// Propagates the first [`RuntimeError`] raised anywhere in the tree.
pub fn eval_expr(expr: &Expr) -> EvalResult<f64> {
    let mut steps = vec![Step::Visit(expr)];
    let mut values: Vec<f64> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(Expr::Number { value, .. }) => values.push(*value),
            Step::Visit(Expr::UnaryOp { op, expr, position }) => {
                steps.push(Step::Unary(*op, *position));
                steps.push(Step::Visit(expr));
            },
            Step::Visit(Expr::BinaryOp { left,
                                         op,
                                         right,
                                         position, }) => {
                steps.push(Step::Binary(*op, *position));
                steps.push(Step::Visit(right));
                steps.push(Step::Visit(left));
            },
            Step::Unary(op, position) => {
                let Some(operand) = values.pop() else {
                    return Err(RuntimeError::StackUnderflow { needed: 1,
                                                              available: 0,
                                                              position });
                };
                values.push(eval_unary(op, operand));
            },
            Step::Binary(op, position) => {
                let available = values.len();
                let (Some(right), Some(left)) = (values.pop(), values.pop()) else {
                    return Err(RuntimeError::StackUnderflow { needed: 2,
                                                              available,
                                                              position });
                };
                values.push(eval_binary(op, left, right, position)?);
            },
        }
    }

    match values.as_slice() {
        [value] => Ok(*value),
        _ => Err(RuntimeError::MalformedExpression { remaining: values.len() }),
    }
}
