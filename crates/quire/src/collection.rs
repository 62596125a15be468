use quire_core::pipeline::populate_record;
use quire_core::schema::ModelRegistry;
use quire_core::{Fields, Operation, Outcome, Pipeline, Result};

use serde_json::Value;

/// A named set of fields, the unit records are validated, stored and read
/// against.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    fields: Fields,
}

impl Collection {
    pub fn new(name: impl Into<String>, fields: Fields) -> Collection {
        Collection {
            name: name.into(),
            fields,
        }
    }

    /// Builds a collection from a JSON array of field definitions.
    pub fn from_json(
        name: impl Into<String>,
        registry: &ModelRegistry,
        src: &str,
    ) -> Result<Collection> {
        let name = name.into();
        let fields = registry
            .build_from_json(src)
            .map_err(|err| err.context(quire_core::err!("loading collection `{name}`")))?;

        Ok(Collection::new(name, fields))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Runs the validation pipeline without converting a rejection into an
    /// error.
    pub fn validate(&self, operation: Operation, record: Value) -> Outcome {
        Pipeline::new(&self.fields, operation).run(record)
    }

    /// Validates a new record. The accepted record has defaults filled in.
    pub fn create(&self, record: Value) -> Result<Value> {
        self.write(Operation::Create, record)
    }

    /// Validates a partial record; required fields may be left out.
    pub fn update(&self, record: Value) -> Result<Value> {
        self.write(Operation::Update, record)
    }

    /// Storage representation of an accepted record.
    pub fn to_storage(&self, record: &Value) -> Value {
        self.fields.serialize_record(record)
    }

    /// Converts a stored record back and runs its populators.
    pub async fn read(&self, stored: &Value) -> Result<Value> {
        let record = self.fields.deserialize_record(stored);
        populate_record(&self.fields, record).await
    }

    fn write(&self, operation: Operation, record: Value) -> Result<Value> {
        let outcome = self.validate(operation, record);

        if let Outcome::Rejected(errors) = &outcome {
            log::debug!(
                "{operation} on `{}` rejected with {} error(s)",
                self.name,
                errors.len()
            );
        }

        outcome.into_result()
    }
}

impl From<Collection> for Fields {
    fn from(collection: Collection) -> Fields {
        collection.fields
    }
}
