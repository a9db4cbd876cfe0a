//! Tolerant parsing of CSS-like pixel values.

use regex::Regex;
use std::sync::LazyLock;

/// Leading unsigned decimal number, e.g. `20` in `20px` or `13.5` in `13.5px`.
/// Signs are not part of the prefix, so negative values collapse to zero.
static NUMERIC_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*(\.\d*)?").expect("Invalid numeric prefix regex"));

/// Extract the numeric prefix of a pixel value.
///
/// Never fails: anything without a leading number (`"normal"`, `"-4px"`,
/// `""`) yields `0.0`.
pub fn px_to_number(value: &str) -> f64 {
    let value = value.trim();
    NUMERIC_PREFIX_REGEX
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Clamp negative and non-finite numbers to zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
