use crate::schema::{sanitizers, validators, DataType, FieldModel};

use serde_json::Value;

/// Booleans, stored as `1`/`0`.
pub fn boolean() -> FieldModel {
    FieldModel::builder("boolean", DataType::Boolean)
        .default(false)
        .sanitizer(sanitizers::cast_to_boolean)
        .validator(validators::nullable)
        .validator(validators::boolean_type)
        .serializer(|value| match value {
            Value::Bool(true) => Value::from(1),
            Value::Bool(false) => Value::from(0),
            value => value.clone(),
        })
        .deserializer(|value| sanitizers::cast_to_boolean(value.clone(), &Default::default()))
        .build()
}
