use std::fmt;

/// A user-facing validation message, kept structured until a [`Translator`]
/// renders it.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A required field is absent
    Required,

    /// `null` given for a non-nullable field
    NotNullable,

    /// The value is not of the model's native type
    InvalidType { expected: &'static str },

    /// A fractional number where an integer is expected
    MustBeInteger,

    /// Too many digits after the decimal point
    DecimalPlaces { max: usize },

    Min { min: f64 },

    Max { max: f64 },

    /// `minLength == maxLength`
    ExactLength { length: usize },

    MinLength { min: usize },

    MaxLength { max: usize },

    MinItems { min: usize },

    MaxItems { max: usize },

    NotSerializable,

    /// Free-form message from a custom validator
    Custom(String),
}

impl Message {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Message::*;

        match self {
            Required => f.write_str("This field is required"),
            NotNullable => f.write_str("The value cannot be null"),
            InvalidType { expected } => write!(f, "The value must be {expected}"),
            MustBeInteger => f.write_str("The value must be an integer"),
            DecimalPlaces { max: 1 } => f.write_str("The value can have at most 1 decimal place"),
            DecimalPlaces { max } => write!(f, "The value can have at most {max} decimal places"),
            Min { min } => write!(f, "The value must be greater than or equal to {min}"),
            Max { max } => write!(f, "The value must be less than or equal to {max}"),
            ExactLength { length } => {
                write!(f, "The value must be exactly {length} characters long")
            }
            MinLength { min } => write!(f, "The value must be at least {min} characters long"),
            MaxLength { max } => write!(f, "The value must be at most {max} characters long"),
            MinItems { min: 1 } => f.write_str("At least 1 entry is required"),
            MinItems { min } => write!(f, "At least {min} entries are required"),
            MaxItems { max: 1 } => f.write_str("At most 1 entry is allowed"),
            MaxItems { max } => write!(f, "At most {max} entries are allowed"),
            NotSerializable => f.write_str("The value cannot be serialized"),
            Custom(message) => f.write_str(message),
        }
    }
}

/// Renders validation messages for end users.
pub trait Translator: Send + Sync {
    fn translate(&self, message: &Message) -> String;
}

/// The built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Translator for English {
    fn translate(&self, message: &Message) -> String {
        message.to_string()
    }
}
