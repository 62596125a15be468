use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage tag of a field model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 64-bit integer
    Bigint,

    /// Real number
    Numeric,

    /// UTF-8 string
    Text,

    /// Boolean, stored as `0`/`1`
    Boolean,

    /// Plain JSON object, stored as text
    Json,

    /// Array of structured sub-records, stored as JSON text
    Repeater,
}

impl DataType {
    pub fn is_repeater(self) -> bool {
        matches!(self, Self::Repeater)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DataType::*;

        match self {
            Bigint => "bigint".fmt(f),
            Numeric => "numeric".fmt(f),
            Text => "text".fmt(f),
            Boolean => "boolean".fmt(f),
            Json => "json".fmt(f),
            Repeater => "repeater".fmt(f),
        }
    }
}
