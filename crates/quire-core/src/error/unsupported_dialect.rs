use super::Error;

/// Error when a dialect tag is not one of the supported literals.
#[derive(Debug)]
pub(super) struct UnsupportedDialect {
    tag: Box<str>,
}

impl std::error::Error for UnsupportedDialect {}

impl core::fmt::Display for UnsupportedDialect {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsupported dialect `{}` (expected one of: sqlite, postgres, d1)",
            self.tag
        )
    }
}

impl Error {
    /// Creates an unsupported dialect error.
    pub fn unsupported_dialect(tag: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsupportedDialect(UnsupportedDialect {
            tag: tag.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsupported dialect error.
    pub fn is_unsupported_dialect(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsupportedDialect(_))
    }
}
