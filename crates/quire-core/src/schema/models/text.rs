use crate::schema::{sanitizers, validators, DataType, FieldModel};

use serde_json::Value;

/// Strings. Options: `minLength`, `maxLength`, `trim` (default `true`).
pub fn text() -> FieldModel {
    FieldModel::builder("text", DataType::Text)
        .default("")
        .option("minLength", Value::Null)
        .option("maxLength", Value::Null)
        .option("trim", true)
        .sanitizer(sanitizers::trim)
        .validator(validators::nullable)
        .validator(validators::string_type)
        .validator(validators::length)
        .build()
}
