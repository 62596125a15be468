use super::{validators, Builder, FieldModel, Fields, Message, Options};
use crate::logic::Condition;
use crate::pipeline::Context;

use serde_json::Value;
use std::sync::Arc;

/// A named binding of a [`FieldModel`] within a record.
#[derive(Debug, Clone)]
pub struct Field {
    /// The field name, unique within its record
    pub name: String,

    /// Shared type descriptor
    pub model: Arc<FieldModel>,

    /// True if the field must be present on create while active
    pub required: bool,

    /// True if `null` is an accepted value
    pub nullable: bool,

    /// Overrides the model's default value
    pub default: Option<Value>,

    /// Decides when the field is active. `None` means always active.
    pub conditional_logic: Option<Condition>,

    /// The model's default options with the field's overrides applied
    pub options: Options,

    /// Fields of each entry, for repeater models
    pub subfields: Option<Fields>,

    /// Presentation hints. Carried through untouched.
    pub ui_options: Options,
}

impl Field {
    pub fn new(name: impl Into<String>, model: Arc<FieldModel>) -> Field {
        let options = model.default_options().clone();

        Field {
            name: name.into(),
            model,
            required: false,
            nullable: false,
            default: None,
            conditional_logic: None,
            options,
            subfields: None,
            ui_options: Options::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn conditional_logic(mut self, condition: Condition) -> Self {
        self.conditional_logic = Some(condition);
        self
    }

    /// Overrides one of the model's options.
    pub fn option(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.options.insert(name, value);
        self
    }

    /// Overrides several of the model's options at once.
    pub fn options(mut self, overrides: &Options) -> Self {
        self.options = self.options.merged(overrides);
        self
    }

    /// Appends a sanitizer after the model's own chain, for this field only.
    pub fn sanitizer(
        self,
        sanitizer: impl Fn(Value, &Options) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.derive_model(|model| model.sanitizer(sanitizer))
    }

    /// Appends a validator after the model's own chain, for this field only.
    pub fn validator(
        self,
        validator: impl Fn(&Value, &Context<'_>) -> Result<(), Message> + Send + Sync + 'static,
    ) -> Self {
        self.derive_model(|model| model.validator(validator))
    }

    /// Declares an option the model does not have.
    pub fn custom_option(mut self, name: &str, default: impl Into<Value>) -> Self {
        let default = default.into();
        self.options.insert(name, default.clone());
        self.derive_model(|model| model.option(name, default))
    }

    /// Removes one of the model's options from this field.
    pub fn omit_option(mut self, name: &str) -> Self {
        self.options.remove(name);
        self.derive_model(|model| model.omit_option(name))
    }

    pub fn ui_option(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.ui_options.insert(name, value);
        self
    }

    pub fn subfields(mut self, fields: Fields) -> Self {
        self.subfields = Some(fields);
        self
    }

    pub fn is_repeater(&self) -> bool {
        self.model.data_type().is_repeater()
    }

    /// The value used when the field is absent on create.
    pub fn default_value(&self) -> &Value {
        self.default
            .as_ref()
            .unwrap_or_else(|| self.model.default_value())
    }

    /// Runs the model's sanitizers with this field's options.
    pub fn sanitize(&self, value: Value) -> Value {
        self.model.sanitize(value, &self.options)
    }

    fn derive_model(mut self, f: impl FnOnce(Builder) -> Builder) -> Self {
        self.model = Arc::new(f(self.model.extend()).build());
        self
    }

    /// Validates a field value. `None` means the field is absent from its
    /// record, in which case only the required-check applies.
    pub fn validate(&self, value: Option<&Value>, cx: &Context<'_>) -> Result<(), Message> {
        match value {
            None => validators::required(cx),
            Some(value) => self.model.validate(value, cx),
        }
    }
}
