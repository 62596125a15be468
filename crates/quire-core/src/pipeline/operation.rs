use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The kind of request a record is being processed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[serde(alias = "insert")]
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    /// Returns `true` for operations writing a new record. Only those enforce
    /// required fields at the top level.
    pub fn is_create(self) -> bool {
        matches!(self, Operation::Create)
    }

    pub fn is_read(self) -> bool {
        matches!(self, Operation::Read)
    }

    pub fn is_update(self) -> bool {
        matches!(self, Operation::Update)
    }

    pub fn is_delete(self) -> bool {
        matches!(self, Operation::Delete)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" | "insert" => Ok(Operation::Create),
            "read" => Ok(Operation::Read),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            _ => Err(crate::err!("unknown operation `{s}`")),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
