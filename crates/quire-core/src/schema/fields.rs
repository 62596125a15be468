use super::Field;
use crate::{Error, Result};

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// The fields of one record, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    fields: IndexMap<String, Field>,
}

impl Fields {
    /// Builds a field set, verifying every field.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Result<Fields> {
        let mut ret = Fields::default();

        for field in fields {
            verify(&field)?;

            if ret.fields.contains_key(&field.name) {
                return Err(Error::invalid_schema(format!(
                    "duplicate field `{}`",
                    field.name
                )));
            }

            ret.fields.insert(field.name.clone(), field);
        }

        Ok(ret)
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Converts a record into its storage representation.
    ///
    /// Keys without a declared field are copied through unchanged.
    pub fn serialize_record(&self, record: &Value) -> Value {
        self.convert_record(record, &|field, value| {
            let value = match (value, &field.subfields) {
                (Value::Array(entries), Some(subfields)) => Value::Array(
                    entries
                        .iter()
                        .map(|entry| subfields.serialize_record(entry))
                        .collect(),
                ),
                _ => value.clone(),
            };

            field.model.serialize(&value)
        })
    }

    /// Converts a stored record back into application values. Inverse of
    /// [`Fields::serialize_record`].
    pub fn deserialize_record(&self, record: &Value) -> Value {
        self.convert_record(record, &|field, value| {
            match (field.model.deserialize(value), &field.subfields) {
                (Value::Array(entries), Some(subfields)) => Value::Array(
                    entries
                        .iter()
                        .map(|entry| subfields.deserialize_record(entry))
                        .collect(),
                ),
                (value, _) => value,
            }
        })
    }

    fn convert_record(&self, record: &Value, convert: &dyn Fn(&Field, &Value) -> Value) -> Value {
        let Value::Object(entries) = record else {
            return record.clone();
        };

        let mut ret = Map::with_capacity(entries.len());

        for (name, value) in entries {
            let value = match self.get(name) {
                Some(field) => convert(field, value),
                None => value.clone(),
            };
            ret.insert(name.clone(), value);
        }

        Value::Object(ret)
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a Field;
    type IntoIter = indexmap::map::Values<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

fn verify(field: &Field) -> Result<()> {
    let model = &field.model;

    for name in field.options.names() {
        if !model.default_options().contains(name) {
            return Err(Error::invalid_schema(format!(
                "field `{}` sets option `{name}`, which model `{}` does not declare",
                field.name,
                model.name()
            )));
        }
    }

    match (field.is_repeater(), &field.subfields) {
        (true, None) => {
            return Err(Error::invalid_schema(format!(
                "repeater field `{}` declares no sub-fields",
                field.name
            )));
        }
        (false, Some(_)) => {
            return Err(Error::invalid_schema(format!(
                "field `{}` declares sub-fields but model `{}` is not a repeater",
                field.name,
                model.name()
            )));
        }
        _ => {}
    }

    if field.default_value().is_null() && !field.nullable {
        return Err(Error::invalid_schema(format!(
            "field `{}` defaults to null but is not nullable",
            field.name
        )));
    }

    Ok(())
}
