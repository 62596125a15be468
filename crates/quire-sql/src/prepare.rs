use super::{Bindings, Dialect, Params, Placeholder};

use quire_core::Error;

use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// Rewrites named-placeholder SQL templates for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct Preparer {
    dialect: Dialect,
}

/// Dialect-correct SQL text and its parameters.
///
/// `error` is set when the template referenced names without a binding. The
/// SQL and parameters are still complete, with `None` in the unbound slots,
/// so the caller can log or reject as it sees fit.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    sql: String,
    params: Params,
    error: Option<Error>,
}

impl Preparer {
    pub fn new(dialect: Dialect) -> Preparer {
        Preparer { dialect }
    }

    pub fn sqlite() -> Preparer {
        Preparer::new(Dialect::Sqlite)
    }

    pub fn postgres() -> Preparer {
        Preparer::new(Dialect::Postgres)
    }

    pub fn d1() -> Preparer {
        Preparer::new(Dialect::D1)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Replaces every `$name` of `template` with the dialect's placeholder.
    ///
    /// Slots are numbered by first appearance; a name used several times
    /// keeps its first slot. Never fails.
    pub fn prepare(&self, template: &str, bindings: &impl Bindings) -> PreparedQuery {
        let mut slots: IndexMap<&str, usize> = IndexMap::new();
        let mut params = Params::new(self.dialect);
        let mut unbound = vec![];

        for caps in PLACEHOLDER.captures_iter(template) {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };

            if slots.contains_key(name) {
                continue;
            }

            let value = Bindings::get(bindings, name).cloned();
            if value.is_none() {
                unbound.push(name.to_string());
            }

            slots.insert(name, params.push(value));
        }

        let sql = PLACEHOLDER
            .replace_all(template, |caps: &Captures<'_>| {
                let slot = slots.get(&caps[1]).copied().unwrap_or_default();
                Placeholder {
                    dialect: self.dialect,
                    slot,
                }
                .to_string()
            })
            .into_owned();

        let error = if unbound.is_empty() {
            None
        } else {
            log::debug!(
                "{} query references unbound parameters {unbound:?}: {sql}",
                self.dialect
            );
            Some(Error::exec(unbound))
        };

        PreparedQuery { sql, params, error }
    }
}

/// Prepares `template` for `dialect`. See [`Preparer::prepare`].
pub fn prepare(template: &str, params: &impl Bindings, dialect: Dialect) -> PreparedQuery {
    Preparer::new(dialect).prepare(template, params)
}

impl PreparedQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Turns an unbound-parameter error into `Err` for callers that reject
    /// such queries.
    pub fn check(self) -> Result<(String, Params), Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok((self.sql, self.params)),
        }
    }

    pub fn into_parts(self) -> (String, Params, Option<Error>) {
        (self.sql, self.params, self.error)
    }
}
