//! # memocalc
//!
//! memocalc is an arithmetic expression evaluator written in Rust.
//! It tokenizes, parses and evaluates infix expressions over `+ - * /`,
//! parentheses and prefix signs, and memoizes results keyed by the
//! whitespace-free form of the input.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::trace;

use crate::{
    cache::normalize,
    config::EngineConfig,
    error::EvalError,
    interpreter::lexer::tokenize_with,
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` tree produced by the recursive-descent
/// parser together with the unary and binary operator types shared by both
/// parsing strategies.
///
/// # Responsibilities
/// - Defines number, unary and binary expression nodes.
/// - Attaches source offsets to nodes for error reporting.
/// - Defines operator precedence.
pub mod ast;
/// Memoizing expression cache.
///
/// Wraps the lexer, parser and evaluator with a lookup/store layer keyed by
/// the normalized expression and keeps hit/miss statistics.
///
/// # Responsibilities
/// - Normalizes expressions into cache keys.
/// - Serializes lookup, computation and storage behind one lock.
/// - Reports hits, misses, hit rate and entry count.
pub mod cache;
/// Engine configuration.
///
/// Selects the parsing strategy, the invalid-character policy, whether
/// results are cached and the maximum nesting depth.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while evaluating an
/// expression. Every error carries the byte offset it refers to, and
/// [`error::EvalError::kind`] groups them into the coarse kinds shown to
/// users.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches offsets and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates tokenizing, parsing and evaluating.
///
/// This module ties together the lexer, both parsing strategies and the
/// evaluators.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser and evaluator.
/// - Provides the individual pipeline stages for direct use.
pub mod interpreter;
/// Line-oriented interactive session.
///
/// Reads commands and expressions from any reader, evaluates them through an
/// [`cache::ExpressionCache`] and writes results to any writer.
pub mod session;
/// General utilities.
///
/// Display formatting of numeric results.
pub mod util;

/// Evaluates an expression once, without any caching.
///
/// The expression is [`normalize`](cache::normalize)d exactly as the cache
/// does it, so `compute` and [`cache::ExpressionCache::evaluate`] agree on
/// every input, then tokenized, parsed with the configured strategy and
/// evaluated. Error offsets refer to the normalized expression.
///
/// # Errors
/// Returns the [`EvalError`] of the first stage that fails.
///
/// # Examples
/// ```
/// use memocalc::{compute, config::EngineConfig, error::ErrorKind};
///
/// let config = EngineConfig::default();
/// assert_eq!(compute("2 + 3 * 4", &config).unwrap(), 14.0);
/// assert_eq!(compute("1 2", &config).unwrap(), 12.0);
///
/// let err = compute("(2+3", &config).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::ParenMismatch);
/// ```
pub fn compute(expression: &str, config: &EngineConfig) -> Result<f64, EvalError> {
    compute_normalized(&normalize(expression), config)
}

/// Runs the pipeline on an expression that is already normalized.
pub(crate) fn compute_normalized(expression: &str,
                                 config: &EngineConfig)
                                 -> Result<f64, EvalError> {
    let tokens = tokenize_with(expression, config.invalid_characters)?;
    trace!(count = tokens.len(), "lexed");

    let parsed = config.strategy.parse(&tokens, config.max_nesting)?;
    let value = parsed.evaluate()?;

    Ok(value)
}
