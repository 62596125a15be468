use quire_core::Error;

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The SQL dialects queries can be prepared for. Each has its own
/// placeholder syntax and parameter container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `$p1`, parameters keyed by name
    Sqlite,

    /// `$1`, positional parameters
    Postgres,

    /// `?1`, positional parameters
    D1,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Sqlite, Dialect::Postgres, Dialect::D1];

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
            Dialect::D1 => "d1",
        }
    }

    /// Returns `true` if parameters are passed by name rather than position.
    pub fn is_named(self) -> bool {
        matches!(self, Dialect::Sqlite)
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "sqlite" => Ok(Dialect::Sqlite),
            "postgres" => Ok(Dialect::Postgres),
            "d1" => Ok(Dialect::D1),
            _ => Err(Error::unsupported_dialect(s)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
