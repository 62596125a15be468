use crate::value::{as_text, compare, loose_eq};
use crate::{Error, Result};

use regex::Regex;
use serde_json::Value;
use std::{cmp::Ordering, fmt};

/// A test applied to the value a conditional-logic reference points at.
#[derive(Debug, Clone)]
pub enum Predicate {
    Eq(Value),
    Ne(Value),
    Lt(Value),
    Le(Value),
    Gt(Value),
    Ge(Value),
    In(Vec<Value>),
    Regexp(Regex),
}

impl Predicate {
    /// Operator tokens accepted by [`Predicate::parse`].
    pub const OPERATORS: &'static [&'static str] =
        &["=", "!=", "<", "<=", ">", ">=", "in", "regexp"];

    pub fn parse(op: &str, operand: &Value) -> Result<Predicate> {
        let operand = operand.clone();

        Ok(match op {
            "=" => Predicate::Eq(operand),
            "!=" => Predicate::Ne(operand),
            "<" => Predicate::Lt(operand),
            "<=" => Predicate::Le(operand),
            ">" => Predicate::Gt(operand),
            ">=" => Predicate::Ge(operand),
            "in" => match operand {
                Value::Array(values) => Predicate::In(values),
                _ => {
                    return Err(Error::invalid_condition(
                        "operator `in` expects an array operand",
                    ))
                }
            },
            "regexp" => match operand {
                Value::String(pattern) => Predicate::regexp(&pattern)?,
                _ => {
                    return Err(Error::invalid_condition(
                        "operator `regexp` expects a string operand",
                    ))
                }
            },
            _ => {
                return Err(Error::invalid_condition(format!(
                    "unknown operator `{op}`"
                )))
            }
        })
    }

    pub fn regexp(pattern: &str) -> Result<Predicate> {
        let regex = Regex::new(pattern).map_err(|err| {
            Error::from(err).context(Error::invalid_condition(format!(
                "invalid pattern `{pattern}`"
            )))
        })?;
        Ok(Predicate::Regexp(regex))
    }

    pub fn op(&self) -> &'static str {
        use Predicate::*;

        match self {
            Eq(_) => "=",
            Ne(_) => "!=",
            Lt(_) => "<",
            Le(_) => "<=",
            Gt(_) => ">",
            Ge(_) => ">=",
            In(_) => "in",
            Regexp(_) => "regexp",
        }
    }

    pub fn operand(&self) -> Value {
        use Predicate::*;

        match self {
            Eq(value) | Ne(value) | Lt(value) | Le(value) | Gt(value) | Ge(value) => value.clone(),
            In(values) => Value::Array(values.clone()),
            Regexp(regex) => Value::String(regex.as_str().to_string()),
        }
    }

    /// Tests a value. A missing value is tested as `null`.
    pub fn test(&self, value: Option<&Value>) -> bool {
        use Predicate::*;

        let value = value.unwrap_or(&Value::Null);

        match self {
            Eq(operand) => loose_eq(value, operand),
            Ne(operand) => !loose_eq(value, operand),
            Lt(operand) => compare(value, operand) == Some(Ordering::Less),
            Le(operand) => matches!(
                compare(value, operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Gt(operand) => compare(value, operand) == Some(Ordering::Greater),
            Ge(operand) => matches!(
                compare(value, operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            In(operands) => operands.iter().any(|operand| loose_eq(value, operand)),
            Regexp(regex) => as_text(value).is_some_and(|text| regex.is_match(&text)),
        }
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.op() == other.op() && self.operand() == other.operand()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op(), self.operand())
    }
}
