use super::Error;

/// Error when a conditional-logic expression cannot be parsed.
#[derive(Debug)]
pub(super) struct InvalidCondition {
    message: Box<str>,
}

impl std::error::Error for InvalidCondition {}

impl core::fmt::Display for InvalidCondition {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid conditional logic: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid conditional-logic error.
    pub fn invalid_condition(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidCondition(InvalidCondition {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid conditional-logic error.
    pub fn is_invalid_condition(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidCondition(_))
    }
}
