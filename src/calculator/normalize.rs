//! Input cleanup that runs before parsing.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::error::EvalError;

lazy_static! {
    /// Runs of digits joined by commas, e.g. `1,000,000` or `1,2,3`.
    static ref GROUPED_DIGITS: Regex = Regex::new(r"\d+(?:,\d+)+").unwrap();
}

/// Trim the expression and drop thousands separators from numbers.
///
/// Only commas with a digit on both sides are removed; every other
/// character, including a stray comma, is kept as-is. This means
/// `log(8,2)` becomes `log(82)`; arguments need a space after the comma.
pub fn normalize(expression: &str) -> Result<String, EvalError> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(EvalError::EmptyExpression);
    }

    let normalized =
        GROUPED_DIGITS.replace_all(trimmed, |caps: &Captures| caps[0].replace(',', ""));
    Ok(normalized.into_owned())
}
