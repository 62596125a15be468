//! Built-in sanitizers.
//!
//! Every sanitizer is idempotent: feeding its output back in returns the same
//! value.

use super::Options;
use crate::value::{is_integral, number_from_f64};

use serde_json::Value;

/// Literals accepted as `true` by [`cast_to_boolean`].
pub const TRUE_LITERALS: &[&str] = &["true", "1", "t", "yes", "y"];

/// Literals accepted as `false` by [`cast_to_boolean`].
pub const FALSE_LITERALS: &[&str] = &["false", "0", "f", "no", "n"];

/// Coerces numeric strings into numbers.
pub fn to_number(value: Value, _options: &Options) -> Value {
    let Value::String(text) = &value else {
        return value;
    };

    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Value::from(n);
    }

    if let Ok(n) = text.parse::<u64>() {
        return Value::from(n);
    }

    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => number_from_f64(f)
            .map(Value::Number)
            .unwrap_or(value),
        _ => value,
    }
}

/// Like [`to_number`], but also collapses integral floats (`2.0`) into
/// integers.
pub fn to_integer(value: Value, options: &Options) -> Value {
    match to_number(value, options) {
        Value::Number(n) if !n.is_i64() && !n.is_u64() && is_integral(&n) => n
            .as_f64()
            .and_then(number_from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Number(n)),
        value => value,
    }
}

/// Trims surrounding whitespace unless the `trim` option is `false`.
pub fn trim(value: Value, options: &Options) -> Value {
    if options.bool("trim") == Some(false) {
        return value;
    }

    match value {
        Value::String(text) if text.trim().len() != text.len() => {
            Value::String(text.trim().to_string())
        }
        value => value,
    }
}

/// Maps boolean-like literals onto booleans.
///
/// Anything outside the literal sets is returned unchanged so the type check
/// can reject it.
pub fn cast_to_boolean(value: Value, _options: &Options) -> Value {
    match &value {
        Value::Number(n) => match n.as_i64() {
            Some(1) => Value::Bool(true),
            Some(0) => Value::Bool(false),
            _ => value,
        },
        Value::String(text) => {
            let text = text.trim().to_ascii_lowercase();
            if TRUE_LITERALS.contains(&text.as_str()) {
                Value::Bool(true)
            } else if FALSE_LITERALS.contains(&text.as_str()) {
                Value::Bool(false)
            } else {
                value
            }
        }
        _ => value,
    }
}

/// Parses JSON strings holding an object or an array. Any other string is
/// returned unchanged.
pub fn parse_json(value: Value, _options: &Options) -> Value {
    let Value::String(text) = &value else {
        return value;
    };

    match serde_json::from_str::<Value>(text) {
        Ok(parsed @ (Value::Object(_) | Value::Array(_))) => parsed,
        _ => value,
    }
}
