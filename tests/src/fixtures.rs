//! Field sets shared by the integration tests.

use quire::{Condition, Field, Fields, ModelRegistry};
use serde_json::Value;
use std::sync::Arc;

/// Builds a field set from JSON definitions against the built-in models.
pub fn fields(defs: Value) -> Fields {
    ModelRegistry::new()
        .build_from_json(&defs.to_string())
        .unwrap()
}

/// A product with a price that only matters while it is for sale.
pub fn product() -> Fields {
    let models = ModelRegistry::new();
    let model = |name: &str| Arc::clone(models.get(name).unwrap());

    Fields::new([
        Field::new("name", model("text")).required().option("maxLength", 20),
        Field::new("forSale", model("boolean")),
        Field::new("price", model("number"))
            .required()
            .option("decimalPlaces", 2)
            .option("min", 0)
            .conditional_logic(Condition::eq("forSale", true)),
        Field::new("tags", model("json")).nullable(),
    ])
    .unwrap()
}

/// A page made of blocks. Each block has a title and, when the page is
/// featured, a required caption.
pub fn page() -> Fields {
    fields(serde_json::json!([
        {"name": "featured", "model": "boolean"},
        {
            "name": "blocks",
            "model": "repeater",
            "options": {"maxItems": 3},
            "fields": [
                {"name": "title", "model": "text", "required": true},
                {
                    "name": "caption",
                    "model": "text",
                    "required": true,
                    "conditionalLogic": {"../featured": true}
                }
            ]
        }
    ]))
}
