//! Helpers over JSON-compatible record values.

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Name of the JSON type of `value`, as used in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if is_integral(n) => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Returns `true` if the number has no fractional part.
pub fn is_integral(number: &Number) -> bool {
    if number.is_i64() || number.is_u64() {
        return true;
    }

    number.as_f64().is_some_and(|f| f.fract() == 0.0)
}

/// Number of digits after the decimal point in the shortest representation of
/// `number`.
pub fn count_decimal_places(number: &Number) -> usize {
    if number.is_i64() || number.is_u64() {
        return 0;
    }

    let Some(f) = number.as_f64() else {
        return 0;
    };

    // `f64`'s `Display` never switches to exponent notation.
    let repr = f.to_string();
    match repr.split_once('.') {
        Some((_, fraction)) => fraction.len(),
        None => 0,
    }
}

/// Builds a JSON number from a float, keeping integral values integral.
///
/// `i64::MAX as f64` is 2^63, one past the range, so the upper bound is
/// exclusive; larger values stay floats instead of saturating.
pub fn number_from_f64(f: f64) -> Option<Number> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return Some(Number::from(f as i64));
    }

    Number::from_f64(f)
}

/// Loose equality used by conditional logic: numbers compare by value so that
/// `1` equals `1.0`; everything else compares structurally.
pub fn loose_eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Number(lhs), Value::Number(rhs)) => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => lhs == rhs,
        },
        _ => lhs == rhs,
    }
}

/// Orders two values when they share a comparable type (numbers or strings).
pub fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::Number(lhs), Value::Number(rhs)) => lhs.as_f64()?.partial_cmp(&rhs.as_f64()?),
        (Value::String(lhs), Value::String(rhs)) => Some(lhs.cmp(rhs)),
        (Value::Bool(lhs), Value::Bool(rhs)) => Some(lhs.cmp(rhs)),
        _ => None,
    }
}

/// Text form of a scalar used for pattern matching; `None` for containers.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
