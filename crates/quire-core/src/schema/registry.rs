use super::{
    models, sanitizers, validators, Field, FieldDef, FieldModel, Fields, Message, Options,
    Sanitizer, Validator,
};
use crate::logic::Condition;
use crate::pipeline::Context;
use crate::{Error, Result};

use indexmap::IndexMap;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Maps model names to shared [`FieldModel`]s and assembles field sets from
/// declarative definitions.
///
/// Definitions may extend their model with extra sanitizers and validators,
/// named from the registry's catalogue.
#[derive(Clone)]
pub struct ModelRegistry {
    models: IndexMap<String, Arc<FieldModel>>,
    sanitizers: IndexMap<String, Sanitizer>,
    validators: IndexMap<String, Validator>,
}

impl ModelRegistry {
    /// A registry without any model, sanitizer or validator.
    pub fn empty() -> Self {
        Self {
            models: IndexMap::new(),
            sanitizers: IndexMap::new(),
            validators: IndexMap::new(),
        }
    }

    /// A registry holding the built-in models and archetypes.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(models::bigint());
        registry.register(models::boolean());
        registry.register(models::json());
        registry.register(models::number());
        registry.register(models::repeater());
        registry.register(models::text());

        registry.register_sanitizer("castToBoolean", sanitizers::cast_to_boolean);
        registry.register_sanitizer("parseJson", sanitizers::parse_json);
        registry.register_sanitizer("toInteger", sanitizers::to_integer);
        registry.register_sanitizer("toNumber", sanitizers::to_number);
        registry.register_sanitizer("trim", sanitizers::trim);

        registry.register_validator("arrayOfObjects", validators::array_of_objects_type);
        registry.register_validator("boolean", validators::boolean_type);
        registry.register_validator("decimalPlaces", validators::decimal_places);
        registry.register_validator("integer", validators::integer);
        registry.register_validator("items", validators::items);
        registry.register_validator("length", validators::length);
        registry.register_validator("minMax", validators::min_max);
        registry.register_validator("nullable", validators::nullable);
        registry.register_validator("number", validators::number_type);
        registry.register_validator("object", validators::object_type);
        registry.register_validator("serializable", validators::serializable);
        registry.register_validator("string", validators::string_type);
        registry
    }

    /// Registers a model under its own name, replacing any previous model
    /// with that name.
    pub fn register(&mut self, model: FieldModel) -> Arc<FieldModel> {
        let model = Arc::new(model);
        self.models.insert(model.name().to_string(), model.clone());
        model
    }

    /// Makes a sanitizer available to definitions under `name`.
    pub fn register_sanitizer(
        &mut self,
        name: impl Into<String>,
        sanitizer: impl Fn(Value, &Options) -> Value + Send + Sync + 'static,
    ) {
        self.sanitizers.insert(name.into(), Arc::new(sanitizer));
    }

    /// Makes a validator available to definitions under `name`.
    pub fn register_validator(
        &mut self,
        name: impl Into<String>,
        validator: impl Fn(&Value, &Context<'_>) -> std::result::Result<(), Message>
            + Send
            + Sync
            + 'static,
    ) {
        self.validators.insert(name.into(), Arc::new(validator));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<FieldModel>> {
        self.models.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Builds a field set from definitions.
    pub fn build(&self, defs: &[FieldDef]) -> Result<Fields> {
        let fields = defs
            .iter()
            .map(|def| self.build_field(def))
            .collect::<Result<Vec<_>>>()?;

        Fields::new(fields)
    }

    /// Parses a JSON array of definitions and builds the field set.
    pub fn build_from_json(&self, src: &str) -> Result<Fields> {
        let defs: Vec<FieldDef> = serde_json::from_str(src).map_err(|err| {
            Error::from(err).context(Error::invalid_schema("malformed field definitions"))
        })?;
        self.build(&defs)
    }

    fn build_field(&self, def: &FieldDef) -> Result<Field> {
        let model = self.get(&def.model).ok_or_else(|| {
            Error::invalid_schema(format!(
                "field `{}` uses unknown model `{}`",
                def.name, def.model
            ))
        })?;

        let model = self.extend_model(def, model)?;

        let mut field = Field::new(&def.name, model).options(&def.options);
        field.ui_options = def.ui_options.clone();
        field.required = def.required;
        field.nullable = def.nullable;
        field.default = def.default.clone();

        if let Some(src) = &def.conditional_logic {
            let condition = Condition::from_json(src).map_err(|err| {
                err.context(Error::invalid_schema(format!(
                    "field `{}` has invalid conditional logic",
                    def.name
                )))
            })?;
            field = field.conditional_logic(condition);
        }

        if !def.fields.is_empty() {
            field = field.subfields(self.build(&def.fields)?);
        }

        Ok(field)
    }

    /// Derives the field's own model when the definition adds to or removes
    /// from its base model. Otherwise the shared model is used as is.
    fn extend_model(&self, def: &FieldDef, base: &Arc<FieldModel>) -> Result<Arc<FieldModel>> {
        if !def.extends_model() {
            return Ok(base.clone());
        }

        let declared = base.default_options();
        let mut model = base.extend();

        for name in &def.omit_options {
            if !declared.contains(name) {
                return Err(Error::invalid_schema(format!(
                    "field `{}` omits option `{name}`, which model `{}` does not declare",
                    def.name,
                    base.name()
                )));
            }
            model = model.omit_option(name);
        }

        for (name, default) in def.custom_options.iter() {
            if declared.contains(name) && !def.omit_options.contains(name) {
                return Err(Error::invalid_schema(format!(
                    "field `{}` declares custom option `{name}`, which model `{}` already has",
                    def.name,
                    base.name()
                )));
            }
            model = model.option(name, default.clone());
        }

        for name in &def.sanitizers {
            let sanitizer = self.sanitizers.get(name).cloned().ok_or_else(|| {
                Error::invalid_schema(format!(
                    "field `{}` uses unknown sanitizer `{name}`",
                    def.name
                ))
            })?;
            model = model.sanitizer(move |value, options| sanitizer(value, options));
        }

        for name in &def.validators {
            let validator = self.validators.get(name).cloned().ok_or_else(|| {
                Error::invalid_schema(format!(
                    "field `{}` uses unknown validator `{name}`",
                    def.name
                ))
            })?;
            model = model.validator(move |value, cx| validator(value, cx));
        }

        Ok(Arc::new(model.build()))
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .field("sanitizers", &self.sanitizers.keys().collect::<Vec<_>>())
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
