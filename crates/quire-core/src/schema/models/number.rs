use crate::schema::{sanitizers, validators, DataType, FieldModel};

use serde_json::Value;

/// Real numbers.
///
/// Options: `min`, `max`, `decimalPlaces` (defaults to `0`, so plain
/// `number` fields hold integers until configured otherwise).
pub fn number() -> FieldModel {
    FieldModel::builder("number", DataType::Numeric)
        .default(0)
        .option("min", Value::Null)
        .option("max", Value::Null)
        .option("decimalPlaces", 0)
        .sanitizer(sanitizers::to_number)
        .validator(validators::nullable)
        .validator(validators::number_type)
        .validator(validators::decimal_places)
        .validator(validators::min_max)
        .deserializer(|value| sanitizers::to_number(value.clone(), &Default::default()))
        .build()
}
