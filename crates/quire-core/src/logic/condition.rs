use super::{FieldPath, Predicate, Reference};
use crate::{Error, Result};

use serde_json::{Map, Value};
use std::fmt;

/// A declarative predicate over other fields of a record.
///
/// In JSON form a condition is an object keyed by field path. A path maps to
/// a bare value (implicit `=`) or to an object of operator → operand; the
/// combinators `$and`, `$or` and `$not` nest further conditions. Entries of one
/// object are AND-ed:
///
/// ```json
/// { "status": "published", "../price": { ">": 0, "<=": 100 } }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Field {
        reference: Reference,
        predicate: Predicate,
    },

    /// True when every nested condition holds; an empty list is true.
    And(Vec<Condition>),

    /// True when any nested condition holds; an empty list is false.
    Or(Vec<Condition>),

    Not(Box<Condition>),
}

impl Condition {
    pub fn field(path: &str, predicate: Predicate) -> Self {
        Condition::Field {
            reference: Reference::parse(path),
            predicate,
        }
    }

    pub fn eq(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Predicate::Eq(value.into()))
    }

    pub fn ne(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Predicate::Ne(value.into()))
    }

    pub fn lt(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Predicate::Lt(value.into()))
    }

    pub fn le(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Predicate::Le(value.into()))
    }

    pub fn gt(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Predicate::Gt(value.into()))
    }

    pub fn ge(path: &str, value: impl Into<Value>) -> Self {
        Self::field(path, Predicate::Ge(value.into()))
    }

    pub fn in_list(path: &str, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self::field(
            path,
            Predicate::In(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn regexp(path: &str, pattern: &str) -> Result<Self> {
        Ok(Self::field(path, Predicate::regexp(pattern)?))
    }

    pub fn and(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(conditions.into_iter().collect())
    }

    pub fn or(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(conditions.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Parses the JSON form.
    pub fn from_json(src: &Value) -> Result<Condition> {
        let Value::Object(entries) = src else {
            return Err(Error::invalid_condition(format!(
                "expected an object, found {}",
                crate::value::type_name(src)
            )));
        };

        let mut conditions = Vec::with_capacity(entries.len());

        for (key, value) in entries {
            match key.as_str() {
                "$and" => conditions.push(Condition::And(parse_list(key, value)?)),
                "$or" => conditions.push(Condition::Or(parse_list(key, value)?)),
                "$not" => conditions.push(Condition::not(Condition::from_json(value)?)),
                path => conditions.extend(parse_field(path, value)?),
            }
        }

        Ok(match conditions.len() {
            1 => conditions.remove(0),
            _ => Condition::And(conditions),
        })
    }

    /// The JSON form of this condition.
    pub fn to_json(&self) -> Value {
        let mut ret = Map::new();

        match self {
            Condition::Field {
                reference,
                predicate,
            } => {
                let mut ops = Map::new();
                ops.insert(predicate.op().to_string(), predicate.operand());
                ret.insert(reference.to_string(), Value::Object(ops));
            }
            Condition::And(conditions) => {
                ret.insert("$and".into(), conditions.iter().map(Self::to_json).collect());
            }
            Condition::Or(conditions) => {
                ret.insert("$or".into(), conditions.iter().map(Self::to_json).collect());
            }
            Condition::Not(condition) => {
                ret.insert("$not".into(), condition.to_json());
            }
        }

        Value::Object(ret)
    }

    /// Returns a copy with every reference rewritten against `scopes` (see
    /// [`Reference::rewrite`]).
    pub fn rewrite(&self, scopes: &[FieldPath]) -> Condition {
        match self {
            Condition::Field {
                reference,
                predicate,
            } => Condition::Field {
                reference: reference.rewrite(scopes),
                predicate: predicate.clone(),
            },
            Condition::And(conditions) => {
                Condition::And(conditions.iter().map(|c| c.rewrite(scopes)).collect())
            }
            Condition::Or(conditions) => {
                Condition::Or(conditions.iter().map(|c| c.rewrite(scopes)).collect())
            }
            Condition::Not(condition) => Condition::not(condition.rewrite(scopes)),
        }
    }

    /// Every field reference in this condition, depth first.
    pub fn references(&self) -> Vec<&Reference> {
        let mut ret = vec![];
        self.collect_references(&mut ret);
        ret
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a Reference>) {
        match self {
            Condition::Field { reference, .. } => out.push(reference),
            Condition::And(conditions) | Condition::Or(conditions) => {
                for condition in conditions {
                    condition.collect_references(out);
                }
            }
            Condition::Not(condition) => condition.collect_references(out),
        }
    }

    /// Evaluates the condition against the root record.
    ///
    /// A condition holding an unreachable reference is never satisfied, no
    /// matter how it is combined.
    pub fn evaluate(&self, record: &Value) -> bool {
        if self.references().iter().any(|r| r.is_unreachable()) {
            return false;
        }

        self.eval(record)
    }

    fn eval(&self, record: &Value) -> bool {
        match self {
            Condition::Field {
                reference,
                predicate,
            } => predicate.test(reference.lookup(record)),
            Condition::And(conditions) => conditions.iter().all(|c| c.eval(record)),
            Condition::Or(conditions) => conditions.iter().any(|c| c.eval(record)),
            Condition::Not(condition) => !condition.eval(record),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_json().fmt(f)
    }
}

fn parse_list(key: &str, value: &Value) -> Result<Vec<Condition>> {
    let Value::Array(items) = value else {
        return Err(Error::invalid_condition(format!(
            "`{key}` expects an array of conditions"
        )));
    };

    items.iter().map(Condition::from_json).collect()
}

fn parse_field(path: &str, value: &Value) -> Result<Vec<Condition>> {
    let operators = match value {
        Value::Object(ops)
            if !ops.is_empty()
                && ops.keys().all(|op| Predicate::OPERATORS.contains(&op.as_str())) =>
        {
            ops
        }
        // Anything else is compared for equality as a whole.
        _ => return Ok(vec![Condition::eq(path, value.clone())]),
    };

    operators
        .iter()
        .map(|(op, operand)| Ok(Condition::field(path, Predicate::parse(op, operand)?)))
        .collect()
}
