use super::Error;

/// Error when a field populator fails on the read path.
///
/// Usually attached as context over the populator's own error.
#[derive(Debug)]
pub(super) struct PopulateFailed {
    path: Box<str>,
}

impl std::error::Error for PopulateFailed {}

impl core::fmt::Display for PopulateFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "populating field `{}` failed", self.path)
    }
}

impl Error {
    /// Creates a populate-failed error for the field at `path`.
    pub fn populate_failed(path: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::PopulateFailed(PopulateFailed {
            path: path.into().into(),
        }))
    }

    /// Returns `true` if this error is a populate-failed error.
    pub fn is_populate_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::PopulateFailed(_))
    }
}
