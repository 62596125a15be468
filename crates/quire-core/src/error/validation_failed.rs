use super::Error;
use crate::pipeline::FieldErrors;

/// Error when one or more fields of a record fail validation.
///
/// Carries every failing path; sibling fields are never skipped because an
/// earlier one failed.
#[derive(Debug)]
pub(super) struct ValidationFailed {
    errors: FieldErrors,
}

impl std::error::Error for ValidationFailed {}

impl core::fmt::Display for ValidationFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("validation failed")?;

        for (i, (path, message)) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{path}: {message}")?;
        }

        Ok(())
    }
}

impl Error {
    /// Creates a validation error from the aggregated per-path messages.
    pub fn validation_failed(errors: FieldErrors) -> Error {
        Error::from(super::ErrorKind::ValidationFailed(ValidationFailed { errors }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ValidationFailed(_))
    }

    /// The per-path messages of a validation error.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self.kind() {
            super::ErrorKind::ValidationFailed(err) => Some(&err.errors),
            _ => None,
        }
    }
}
