use crate::schema::{sanitizers, validators, DataType, FieldModel};

use serde_json::Value;

/// Signed 64-bit integers. Options: `min`, `max`.
pub fn bigint() -> FieldModel {
    FieldModel::builder("bigint", DataType::Bigint)
        .default(0)
        .option("min", Value::Null)
        .option("max", Value::Null)
        .sanitizer(sanitizers::to_integer)
        .validator(validators::nullable)
        .validator(validators::number_type)
        .validator(validators::integer)
        .validator(validators::min_max)
        // Some drivers hand 64-bit integers back as text.
        .deserializer(|value| sanitizers::to_integer(value.clone(), &Default::default()))
        .build()
}
