use super::Options;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Declarative description of a field, as found in collection definitions.
///
/// ```json
/// {
///   "name": "price",
///   "model": "number",
///   "required": true,
///   "options": { "min": 0, "decimalPlaces": 2 },
///   "conditionalLogic": { "forSale": true }
/// }
/// ```
///
/// A definition can also adjust its model for this field alone:
/// `sanitizers` and `validators` name registry entries appended after the
/// model's chains, `customOptions` declares extra options with their
/// defaults, and `omitOptions` removes declared ones. `uiOptions` is carried
/// through to [`Field::ui_options`](super::Field::ui_options).
///
/// Turned into a [`Field`](super::Field) by
/// [`ModelRegistry::build`](super::ModelRegistry::build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDef {
    pub name: String,

    /// Registered model name
    pub model: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub nullable: bool,

    /// Overrides the model's default value. An explicit `null` is kept.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_logic: Option<Value>,

    #[serde(default, skip_serializing_if = "Options::is_empty")]
    pub options: Options,

    /// Sub-fields of repeater models
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sanitizers: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<String>,

    #[serde(default, skip_serializing_if = "Options::is_empty")]
    pub custom_options: Options,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omit_options: Vec<String>,

    #[serde(default, skip_serializing_if = "Options::is_empty")]
    pub ui_options: Options,
}

impl FieldDef {
    /// True if the field needs its own variant of the registered model.
    pub fn extends_model(&self) -> bool {
        !self.sanitizers.is_empty()
            || !self.validators.is_empty()
            || !self.custom_options.is_empty()
            || !self.omit_options.is_empty()
    }
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}
