//! Numeric checks for string-typed record fields.

use std::sync::LazyLock;

use regex::Regex;

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").expect("valid decimal regex")
});

/// Parse a whole-number field such as a port or PID.
///
/// Accepts an optional sign followed by ASCII digits, after trimming.
/// Anything else (including values that overflow `i64`) is not a number.
pub fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// True for plain decimal numbers like `12`, `0.5` or `3.`.
pub fn is_decimal(value: &str) -> bool {
    DECIMAL.is_match(value.trim())
}
