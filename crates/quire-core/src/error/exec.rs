use super::Error;

/// Error when a query template references a name that has no bound value.
///
/// The prepared SQL and parameters are still produced; this error travels
/// alongside them so the caller decides whether to log or reject.
#[derive(Debug)]
pub(super) struct ExecError {
    unbound: Vec<String>,
}

impl std::error::Error for ExecError {}

impl core::fmt::Display for ExecError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("exec error: no value bound for query parameter")?;
        if self.unbound.len() > 1 {
            f.write_str("s")?;
        }

        for (i, name) in self.unbound.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}${name}")?;
        }

        Ok(())
    }
}

impl Error {
    /// Creates an exec error for the given unbound parameter names.
    pub fn exec(unbound: Vec<String>) -> Error {
        Error::from(super::ErrorKind::Exec(ExecError { unbound }))
    }

    /// Returns `true` if this error is an exec error.
    pub fn is_exec(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Exec(_))
    }

    /// Names referenced by a query template without a bound value, in order
    /// of first appearance.
    pub fn unbound_params(&self) -> Option<&[String]> {
        match self.kind() {
            super::ErrorKind::Exec(err) => Some(&err.unbound),
            _ => None,
        }
    }
}
