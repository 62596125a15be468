//! Built-in validator archetypes.
//!
//! Concrete models compose these in a fixed order: nullability, then type,
//! then range or shape. The required-check runs before the chain, on absent
//! values only (see [`required`]).
//!
//! Every check after [`nullable`] lets `null` through; by the time they run a
//! `null` value has already been accepted as nullable.

use super::Message;
use crate::pipeline::Context;
use crate::value::count_decimal_places;

use serde_json::Value;

type Check = std::result::Result<(), Message>;

/// Fails when the field is absent although it must be present and active.
///
/// Presence is required on create, and for every sub-field of a repeater
/// entry since entries are always written whole.
pub fn required(cx: &Context<'_>) -> Check {
    let applies = cx.operation.is_create() || cx.is_subfield;

    if applies && cx.definition.required && cx.is_active() {
        return Err(Message::Required);
    }

    Ok(())
}

pub fn nullable(value: &Value, cx: &Context<'_>) -> Check {
    if value.is_null() && !cx.definition.nullable {
        return Err(Message::NotNullable);
    }

    Ok(())
}

pub fn number_type(value: &Value, _cx: &Context<'_>) -> Check {
    match value {
        Value::Null | Value::Number(_) => Ok(()),
        _ => Err(Message::InvalidType {
            expected: "a number",
        }),
    }
}

pub fn string_type(value: &Value, _cx: &Context<'_>) -> Check {
    match value {
        Value::Null | Value::String(_) => Ok(()),
        _ => Err(Message::InvalidType {
            expected: "a string",
        }),
    }
}

pub fn boolean_type(value: &Value, _cx: &Context<'_>) -> Check {
    match value {
        Value::Null | Value::Bool(_) => Ok(()),
        _ => Err(Message::InvalidType {
            expected: "a boolean",
        }),
    }
}

pub fn object_type(value: &Value, _cx: &Context<'_>) -> Check {
    match value {
        Value::Null | Value::Object(_) => Ok(()),
        _ => Err(Message::InvalidType {
            expected: "an object",
        }),
    }
}

pub fn array_of_objects_type(value: &Value, _cx: &Context<'_>) -> Check {
    match value {
        Value::Null => Ok(()),
        Value::Array(entries) if entries.iter().all(Value::is_object) => Ok(()),
        _ => Err(Message::InvalidType {
            expected: "an array of objects",
        }),
    }
}

/// Rejects fractional numbers. Integers outside the signed 64-bit range are
/// rejected as well since they cannot be stored.
pub fn integer(value: &Value, _cx: &Context<'_>) -> Check {
    let Value::Number(n) = value else {
        return Ok(());
    };

    if n.is_i64() {
        return Ok(());
    }

    let in_range = !n.is_u64()
        && n.as_f64().is_some_and(|f| {
            f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
        });

    if in_range {
        Ok(())
    } else {
        Err(Message::MustBeInteger)
    }
}

/// Enforces the `decimalPlaces` option. With `decimalPlaces = 0` the value
/// must be an integer.
pub fn decimal_places(value: &Value, cx: &Context<'_>) -> Check {
    let Value::Number(n) = value else {
        return Ok(());
    };

    let max = cx.options().usize("decimalPlaces").unwrap_or(0);
    let places = count_decimal_places(n);

    if places > max {
        if max == 0 {
            return Err(Message::MustBeInteger);
        }
        return Err(Message::DecimalPlaces { max });
    }

    Ok(())
}

/// Enforces the `min` and `max` options.
pub fn min_max(value: &Value, cx: &Context<'_>) -> Check {
    let Some(n) = value.as_f64() else {
        return Ok(());
    };

    if let Some(min) = cx.options().f64("min") {
        if n < min {
            return Err(Message::Min { min });
        }
    }

    if let Some(max) = cx.options().f64("max") {
        if n > max {
            return Err(Message::Max { max });
        }
    }

    Ok(())
}

/// Enforces the `minLength` and `maxLength` options, counting characters.
pub fn length(value: &Value, cx: &Context<'_>) -> Check {
    let Value::String(text) = value else {
        return Ok(());
    };

    let len = text.chars().count();
    let min = cx.options().usize("minLength");
    let max = cx.options().usize("maxLength");

    // If min and max are the same, show exact length requirement
    if let (Some(min), Some(max)) = (min, max) {
        if min == max && len != min {
            return Err(Message::ExactLength { length: min });
        }
    }

    if let Some(min) = min {
        if len < min {
            return Err(Message::MinLength { min });
        }
    }

    if let Some(max) = max {
        if len > max {
            return Err(Message::MaxLength { max });
        }
    }

    Ok(())
}

/// Enforces the `minItems` and `maxItems` options of repeaters.
pub fn items(value: &Value, cx: &Context<'_>) -> Check {
    let Value::Array(entries) = value else {
        return Ok(());
    };

    if let Some(min) = cx.options().usize("minItems") {
        if entries.len() < min {
            return Err(Message::MinItems { min });
        }
    }

    if let Some(max) = cx.options().usize("maxItems") {
        if entries.len() > max {
            return Err(Message::MaxItems { max });
        }
    }

    Ok(())
}

/// Fails when the value cannot be written out as JSON text.
pub fn serializable(value: &Value, _cx: &Context<'_>) -> Check {
    serde_json::to_string(value)
        .map(|_| ())
        .map_err(|_| Message::NotSerializable)
}
