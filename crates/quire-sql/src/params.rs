use super::Dialect;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::{collections::HashMap, fmt};

/// Source of values for the named placeholders of a template.
pub trait Bindings {
    fn get(&self, name: &str) -> Option<&Value>;
}

impl Bindings for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<&Value> {
        HashMap::get(self, name)
    }
}

impl Bindings for IndexMap<String, Value> {
    fn get(&self, name: &str) -> Option<&Value> {
        IndexMap::get(self, name)
    }
}

impl Bindings for Map<String, Value> {
    fn get(&self, name: &str) -> Option<&Value> {
        Map::get(self, name)
    }
}

/// Only objects bind anything.
impl Bindings for Value {
    fn get(&self, name: &str) -> Option<&Value> {
        self.as_object()?.get(name)
    }
}

impl<T: Bindings + ?Sized> Bindings for &T {
    fn get(&self, name: &str) -> Option<&Value> {
        (**self).get(name)
    }
}

/// The parameter container of a prepared query, shaped by its dialect.
///
/// A slot whose name had no binding holds `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    /// `pN → value`, for sqlite
    Named(IndexMap<String, Option<Value>>),

    /// Value of slot `N` at index `N - 1`, for postgres and d1
    Positional(Vec<Option<Value>>),
}

impl Params {
    pub fn new(dialect: Dialect) -> Params {
        if dialect.is_named() {
            Params::Named(IndexMap::new())
        } else {
            Params::Positional(vec![])
        }
    }

    /// Appends the value of the next slot.
    pub fn push(&mut self, value: Option<Value>) -> usize {
        match self {
            Params::Named(params) => {
                let slot = params.len() + 1;
                params.insert(format!("p{slot}"), value);
                slot
            }
            Params::Positional(params) => {
                params.push(value);
                params.len()
            }
        }
    }

    /// The value of 1-based `slot`. The outer `Option` is `None` for slots
    /// that do not exist.
    pub fn slot(&self, slot: usize) -> Option<Option<&Value>> {
        let index = slot.checked_sub(1)?;

        match self {
            Params::Named(params) => params.get_index(index).map(|(_, value)| value.as_ref()),
            Params::Positional(params) => params.get(index).map(Option::as_ref),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Params::Named(params) => params.len(),
            Params::Positional(params) => params.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// JSON form handed to drivers: an object for named parameters, an array
    /// otherwise. Unbound slots become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Params::Named(params) => Value::Object(
                params
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone().unwrap_or(Value::Null)))
                    .collect(),
            ),
            Params::Positional(params) => Value::Array(
                params
                    .iter()
                    .map(|value| value.clone().unwrap_or(Value::Null))
                    .collect(),
            ),
        }
    }
}

/// A parameter reference in rewritten SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub dialect: Dialect,

    /// 1-based
    pub slot: usize,
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dialect {
            Dialect::Sqlite => write!(f, "$p{}", self.slot),
            Dialect::Postgres => write!(f, "${}", self.slot),
            Dialect::D1 => write!(f, "?{}", self.slot),
        }
    }
}
