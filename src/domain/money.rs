//! Decimal parsing and formatting for monetary values.
//!
//! Amounts stay at full precision through every computation and are only
//! rounded (half-up, two places) when formatted for output.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use serde_json::Value;

/// Largest accepted scale or exponent, in either direction.
pub const MAX_SCALE: i64 = 20;
/// Largest accepted number of significant digits.
pub const MAX_DIGITS: usize = 30;

/// Parse a JSON number or numeric string into a decimal.
///
/// Floats go through their shortest textual form, so `0.1` becomes exactly
/// `0.1` rather than the nearest binary fraction.
pub fn parse_decimal(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    }
}

/// Parse decimal text, rejecting values whose exponent or digit count would
/// make later arithmetic expand them into huge integers.
pub fn parse_decimal_str(text: &str) -> Option<BigDecimal> {
    let text = text.trim();
    if text.len() > MAX_DIGITS + 16 {
        return None;
    }
    let parsed = BigDecimal::from_str(text).ok()?;
    let (digits, scale) = parsed.as_bigint_and_exponent();
    let digit_count = digits.to_string().trim_start_matches('-').len();
    (scale.abs() <= MAX_SCALE && digit_count <= MAX_DIGITS).then_some(parsed)
}

/// Parse a JSON integer, integral float (`2.0`) or integer string.
pub fn parse_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            (f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `rate` percent of `base`, computed without division.
pub fn percent_of(base: &BigDecimal, rate: &BigDecimal) -> BigDecimal {
    base * rate * BigDecimal::new(1.into(), 2)
}

pub fn round_amount(amount: &BigDecimal) -> BigDecimal {
    amount.with_scale_round(2, RoundingMode::HalfUp)
}

/// Two-decimal textual form, e.g. `1200.00`.
pub fn format_amount(amount: &BigDecimal) -> String {
    let (cents, _) = round_amount(amount).with_scale(2).into_bigint_and_exponent();
    let cents = cents.to_string();
    let (sign, magnitude) = match cents.strip_prefix('-') {
        Some(m) => ("-", m),
        None => ("", cents.as_str()),
    };
    let padded = format!("{magnitude:0>3}");
    let (units, fraction) = padded.split_at(padded.len() - 2);
    format!("{sign}{units}.{fraction}")
}

/// Rate without insignificant trailing zeros, e.g. `20` or `5.5`.
pub fn format_rate(rate: &BigDecimal) -> String {
    let normalized = rate.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();
    if scale <= 0 {
        rate.with_scale(0).to_string()
    } else {
        normalized.to_string()
    }
}
