use super::{DataType, Message, Options};
use crate::pipeline::{Context, PopulateContext};
use crate::Result;

use async_trait::async_trait;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Pure value transform. Sanitizers never fail; a value they cannot coerce is
/// returned unchanged.
pub type Sanitizer = Arc<dyn Fn(Value, &Options) -> Value + Send + Sync>;

/// Checks a sanitized value. The first failing validator ends the chain.
pub type Validator =
    Arc<dyn Fn(&Value, &Context<'_>) -> std::result::Result<(), Message> + Send + Sync>;

/// Converts between the application value and its storage representation.
pub type Converter = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Post-read transform that may look up related data.
#[async_trait]
pub trait Populator: Send + Sync {
    async fn populate(&self, value: Value, cx: &PopulateContext<'_>) -> Result<Value>;
}

/// A reusable, type-tagged descriptor shared by every [`Field`](super::Field)
/// of the same kind.
///
/// Field models are built once and never change afterwards; everything a
/// model does is a function of its closed-over options. A variant is derived
/// with [`FieldModel::extend`].
#[derive(Clone)]
pub struct FieldModel {
    /// Registry name, e.g. `number`
    name: String,

    data_type: DataType,

    /// Value used for absent fields on create. Never validated.
    default: Value,

    /// Every option the model understands, with its default
    default_options: Options,

    sanitizers: Vec<Sanitizer>,

    validators: Vec<Validator>,

    serializer: Option<Converter>,

    deserializer: Option<Converter>,

    populator: Option<Arc<dyn Populator>>,
}

/// Assembles a [`FieldModel`].
pub struct Builder {
    model: FieldModel,
}

impl FieldModel {
    pub fn builder(name: impl Into<String>, data_type: DataType) -> Builder {
        Builder {
            model: FieldModel {
                name: name.into(),
                data_type,
                default: Value::Null,
                default_options: Options::new(),
                sanitizers: vec![],
                validators: vec![],
                serializer: None,
                deserializer: None,
                populator: None,
            },
        }
    }

    /// Starts a new model from this one. Sanitizers and validators added to
    /// the builder run after the ones inherited from `self`.
    pub fn extend(&self) -> Builder {
        Builder {
            model: self.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn default_options(&self) -> &Options {
        &self.default_options
    }

    pub fn has_populator(&self) -> bool {
        self.populator.is_some()
    }

    /// Runs the sanitizer chain in declaration order.
    pub fn sanitize(&self, value: Value, options: &Options) -> Value {
        self.sanitizers
            .iter()
            .fold(value, |value, sanitizer| sanitizer(value, options))
    }

    /// Runs the validator chain, stopping at the first failure.
    pub fn validate(&self, value: &Value, cx: &Context<'_>) -> std::result::Result<(), Message> {
        for validator in &self.validators {
            validator(value, cx)?;
        }

        Ok(())
    }

    pub fn serialize(&self, value: &Value) -> Value {
        match &self.serializer {
            _ if value.is_null() => Value::Null,
            Some(serializer) => serializer(value),
            None => value.clone(),
        }
    }

    pub fn deserialize(&self, value: &Value) -> Value {
        match &self.deserializer {
            _ if value.is_null() => Value::Null,
            Some(deserializer) => deserializer(value),
            None => value.clone(),
        }
    }

    /// Runs the populator, or returns `value` unchanged when none is set.
    pub async fn populate(&self, value: Value, cx: &PopulateContext<'_>) -> Result<Value> {
        match &self.populator {
            Some(populator) => populator.populate(value, cx).await,
            None => Ok(value),
        }
    }
}

impl fmt::Debug for FieldModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldModel")
            .field("name", &self.name)
            .field("data_type", &self.data_type)
            .field("default", &self.default)
            .field("default_options", &self.default_options)
            .field("sanitizers", &self.sanitizers.len())
            .field("validators", &self.validators.len())
            .field("populator", &self.populator.is_some())
            .finish()
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Builder").field(&self.model).finish()
    }
}

impl Builder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.model.name = name.into();
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.model.default = value.into();
        self
    }

    /// Declares an option and its default. Use `Value::Null` for options
    /// without a default.
    pub fn option(mut self, name: &str, default: impl Into<Value>) -> Self {
        self.model.default_options.insert(name, default);
        self
    }

    /// Removes a declared option. Validators then read it as unset.
    pub fn omit_option(mut self, name: &str) -> Self {
        self.model.default_options.remove(name);
        self
    }

    pub fn sanitizer(
        mut self,
        sanitizer: impl Fn(Value, &Options) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.model.sanitizers.push(Arc::new(sanitizer));
        self
    }

    pub fn validator(
        mut self,
        validator: impl Fn(&Value, &Context<'_>) -> std::result::Result<(), Message>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.model.validators.push(Arc::new(validator));
        self
    }

    pub fn serializer(
        mut self,
        serializer: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.model.serializer = Some(Arc::new(serializer));
        self
    }

    pub fn deserializer(
        mut self,
        deserializer: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.model.deserializer = Some(Arc::new(deserializer));
        self
    }

    pub fn populator(mut self, populator: impl Populator + 'static) -> Self {
        self.model.populator = Some(Arc::new(populator));
        self
    }

    pub fn build(self) -> FieldModel {
        self.model
    }
}
