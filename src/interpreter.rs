/// The evaluator module computes results from parsed expressions.
///
/// The evaluator walks expression trees or runs postfix sequences on a value
/// stack and applies IEEE double-precision arithmetic.
///
/// # Responsibilities
/// - Evaluates trees bottom-up, left operand before right operand.
/// - Evaluates postfix sequences and validates their stack discipline.
/// - Reports runtime errors such as division by zero or overflow.
pub mod evaluator;
/// The lexer module tokenizes expressions for further parsing.
///
/// The lexer reads the raw expression text and produces a sequence of
/// tokens, each a number, an operator or a parenthesis, tagged with its byte
/// offset. This is the first stage of evaluation.
///
/// # Responsibilities
/// - Converts the input into tokens with source offsets.
/// - Handles integer and decimal literals.
/// - Reports lexical errors for invalid characters or malformed literals.
pub mod lexer;
/// The parser module recognizes the expression grammar.
///
/// Two strategies are available: recursive descent building an expression
/// tree, and shunting-yard producing a postfix sequence. Both accept and
/// reject exactly the same inputs.
///
/// # Responsibilities
/// - Converts tokens into an evaluable structure.
/// - Enforces precedence, associativity and parenthesis balance.
/// - Reports syntax errors with offset information.
pub mod parser;
