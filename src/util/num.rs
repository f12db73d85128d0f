/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Formats a result for display.
///
/// Integral values within the exactly representable range print without a
/// fractional part, negative zero prints as `0`, and everything else uses the
/// shortest representation that round-trips.
///
/// ## Parameters
/// - `value`: The computed result.
/// - `precision`: Optional number of decimals to round to for display.
///
/// ## Returns
/// The display string.
///
/// ## Example
/// ```
/// use memocalc::util::num::format_result;
///
/// assert_eq!(format_result(7.0, None), "7");
/// assert_eq!(format_result(-0.0, None), "0");
/// assert_eq!(format_result(3.5, None), "3.5");
/// assert_eq!(format_result(2.0 / 3.0, Some(3)), "0.667");
/// assert_eq!(format_result(1.5, Some(3)), "1.5");
/// ```
#[must_use]
pub fn format_result(value: f64, precision: Option<usize>) -> String {
    let value = if value == 0.0 { 0.0 } else { value };

    if let Some(digits) = precision {
        let rounded = format!("{value:.digits$}");
        return trim_fraction(&rounded);
    }

    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INT {
        return format!("{value:.0}");
    }

    value.to_string()
}

/// Drops trailing zeros of a fixed-point rendering, and the point itself if
/// nothing remains after it. A rounded negative zero becomes `0`.
fn trim_fraction(rendered: &str) -> String {
    let trimmed = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered
    };

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values() {
        assert_eq!(format_result(14.0, None), "14");
        assert_eq!(format_result(-2.0, None), "-2");
        assert_eq!(format_result(1e20, None), "100000000000000000000");
    }

    #[test]
    fn fractional_values() {
        assert_eq!(format_result(0.1 + 0.2, None), "0.30000000000000004");
        assert_eq!(format_result(-0.25, None), "-0.25");
    }

    #[test]
    fn precision_rounds_for_display() {
        assert_eq!(format_result(0.1 + 0.2, Some(2)), "0.3");
        assert_eq!(format_result(10.0, Some(4)), "10");
        assert_eq!(format_result(-0.0001, Some(2)), "0");
        assert_eq!(format_result(2.4, Some(0)), "2");
    }
}
