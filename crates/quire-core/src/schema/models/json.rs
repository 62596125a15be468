use crate::schema::{sanitizers, validators, DataType, FieldModel};

use serde_json::{Map, Value};

/// Plain JSON objects, stored as JSON text.
pub fn json() -> FieldModel {
    FieldModel::builder("json", DataType::Json)
        .default(Map::new())
        .sanitizer(sanitizers::parse_json)
        .validator(validators::nullable)
        .validator(validators::object_type)
        .validator(validators::serializable)
        .serializer(to_json_text)
        .deserializer(|value| sanitizers::parse_json(value.clone(), &Default::default()))
        .build()
}

pub(super) fn to_json_text(value: &Value) -> Value {
    match value {
        Value::Object(_) | Value::Array(_) => serde_json::to_string(value)
            .map(Value::String)
            .unwrap_or_else(|_| value.clone()),
        value => value.clone(),
    }
}
