//! The validation pipeline: sanitize, then validate, every field of a record.

mod context;
pub use context::{Context, PopulateContext};

mod field_errors;
pub use field_errors::FieldErrors;

mod operation;
pub use operation::Operation;

mod populate;
pub use populate::populate_record;

use crate::logic::{ConditionalLogicResolver, FieldPath, ResolvedPathMap};
use crate::schema::{English, Field, Fields, Message, Translator};
use crate::{Error, Result};

use serde_json::{Map, Value};

/// Where a [`Pipeline`] is in processing its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Pending,
    Sanitizing,
    Validating,
    Accepted,
    Rejected,
}

impl State {
    pub fn is_terminal(self) -> bool {
        matches!(self, State::Accepted | State::Rejected)
    }
}

/// The result of running a [`Pipeline`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The sanitized record, with defaults filled in on create
    Accepted(Value),

    /// Every failing path with its message
    Rejected(FieldErrors),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Outcome::Rejected(errors) => Some(errors),
            Outcome::Accepted(_) => None,
        }
    }

    /// Converts a rejection into [`Error::validation_failed`].
    pub fn into_result(self) -> Result<Value> {
        match self {
            Outcome::Accepted(record) => Ok(record),
            Outcome::Rejected(errors) => Err(Error::validation_failed(errors)),
        }
    }
}

/// Runs the sanitizers and validators of a field set over one record.
///
/// Each field stops at its first failing validator, but a failing field
/// never keeps the others from being checked: the pipeline collects one
/// message per failing path and rejects the record as a whole.
pub struct Pipeline<'a> {
    fields: &'a Fields,
    operation: Operation,
    translator: &'a dyn Translator,
    state: State,
}

impl<'a> Pipeline<'a> {
    pub fn new(fields: &'a Fields, operation: Operation) -> Self {
        Self {
            fields,
            operation,
            translator: &English,
            state: State::Pending,
        }
    }

    pub fn with_translator(mut self, translator: &'a dyn Translator) -> Self {
        self.translator = translator;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn run(&mut self, record: Value) -> Outcome {
        self.state = State::Pending;
        self.transition(State::Sanitizing);

        let Value::Object(record) = record else {
            let mut errors = FieldErrors::new();
            errors.insert(
                "",
                self.translator.translate(&Message::InvalidType {
                    expected: "an object",
                }),
            );
            return self.reject(errors);
        };

        let record = Value::Object(sanitize_record(self.fields, record));

        self.transition(State::Validating);

        let map = ResolvedPathMap::resolve(self.fields, &record);
        let resolver = ConditionalLogicResolver::new(&map, &record);

        let mut errors = FieldErrors::new();
        if let Value::Object(entries) = &record {
            self.validate_record(
                self.fields,
                entries,
                &FieldPath::root(),
                false,
                resolver,
                &mut errors,
            );
        }

        if !errors.is_empty() {
            return self.reject(errors);
        }

        let record = match record {
            Value::Object(entries) if self.operation.is_create() => {
                Value::Object(fill_defaults(self.fields, entries))
            }
            record => record,
        };

        self.transition(State::Accepted);
        Outcome::Accepted(record)
    }

    fn validate_record(
        &self,
        fields: &Fields,
        record: &Map<String, Value>,
        base: &FieldPath,
        is_subfield: bool,
        resolver: ConditionalLogicResolver<'_>,
        errors: &mut FieldErrors,
    ) {
        for field in fields {
            let path = base.child(&field.name);
            let path_str = path.to_string();
            let value = record.get(&field.name);

            let cx = Context {
                definition: field,
                path: &path_str,
                operation: self.operation,
                resolver,
                is_subfield,
                translator: self.translator,
            };

            if let Err(message) = field.validate(value, &cx) {
                log::trace!("{path_str}: {message}");
                let message = cx.translate(&message);
                errors.insert(path_str, message);
                continue;
            }

            if let (Some(subfields), Some(Value::Array(entries))) = (&field.subfields, value) {
                for (i, entry) in entries.iter().enumerate() {
                    if let Value::Object(entry) = entry {
                        self.validate_record(
                            subfields,
                            entry,
                            &path.index(i),
                            true,
                            resolver,
                            errors,
                        );
                    }
                }
            }
        }
    }

    fn reject(&mut self, errors: FieldErrors) -> Outcome {
        self.transition(State::Rejected);
        Outcome::Rejected(errors)
    }

    fn transition(&mut self, to: State) {
        log::debug!(
            "{} pipeline: {:?} -> {:?}",
            self.operation,
            self.state,
            to
        );
        self.state = to;
    }
}

impl std::fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("fields", &self.fields.len())
            .field("operation", &self.operation)
            .field("state", &self.state)
            .finish()
    }
}

/// Sanitizes the present fields of a record, recursing into repeater
/// entries. Keys without a declared field are dropped.
fn sanitize_record(fields: &Fields, mut record: Map<String, Value>) -> Map<String, Value> {
    let mut ret = Map::with_capacity(record.len());

    for field in fields {
        let Some(value) = record.remove(&field.name) else {
            continue;
        };

        ret.insert(field.name.clone(), sanitize_field(field, value));
    }

    for name in record.keys() {
        log::debug!("dropping undeclared field `{name}`");
    }

    ret
}

fn sanitize_field(field: &Field, value: Value) -> Value {
    match (field.sanitize(value), &field.subfields) {
        (Value::Array(entries), Some(subfields)) => Value::Array(
            entries
                .into_iter()
                .map(|entry| match entry {
                    Value::Object(entry) => Value::Object(sanitize_record(subfields, entry)),
                    entry => entry,
                })
                .collect(),
        ),
        (value, _) => value,
    }
}

/// Fills absent fields with their defaults, in declaration order. Entries
/// of repeaters are new as well and get their sub-field defaults.
fn fill_defaults(fields: &Fields, mut record: Map<String, Value>) -> Map<String, Value> {
    let mut ret = Map::with_capacity(fields.len());

    for field in fields {
        let value = match (record.remove(&field.name), &field.subfields) {
            (Some(Value::Array(entries)), Some(subfields)) => Value::Array(
                entries
                    .into_iter()
                    .map(|entry| match entry {
                        Value::Object(entry) => Value::Object(fill_defaults(subfields, entry)),
                        entry => entry,
                    })
                    .collect(),
            ),
            (Some(value), _) => value,
            (None, _) => field.default_value().clone(),
        };

        ret.insert(field.name.clone(), value);
    }

    ret
}
