/// Numeric display helpers.
///
/// This module renders evaluation results for people: integral values
/// without a fractional part, negative zero as `0`, and optional rounding to
/// a fixed number of decimals. None of this affects computed or cached
/// values.
pub mod num;
