use super::json::to_json_text;
use crate::schema::{sanitizers, validators, DataType, FieldModel};

use serde_json::Value;

/// Arrays of sub-records. The sub-fields live on the [`Field`](crate::Field)
/// using this model.
///
/// Options: `minItems`, `maxItems`.
pub fn repeater() -> FieldModel {
    FieldModel::builder("repeater", DataType::Repeater)
        .default(Vec::<Value>::new())
        .option("minItems", Value::Null)
        .option("maxItems", Value::Null)
        .sanitizer(sanitizers::parse_json)
        .validator(validators::nullable)
        .validator(validators::array_of_objects_type)
        .validator(validators::items)
        .serializer(to_json_text)
        .deserializer(|value| sanitizers::parse_json(value.clone(), &Default::default()))
        .build()
}
