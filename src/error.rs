//! The public error type.
//!
//! Internally, functions return `anyhow::Result` and attach context as they go. At the command
//! boundary these are classified with an `ErrorType` by calling `pub_result` so that callers, the
//! interactive menu and tests can tell a rejected input apart from an I/O failure.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

pub type Result<T> = std::result::Result<T, Error>;

/// The kind of failure an operation reports.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Date text did not match any accepted format.
    InvalidDate,
    /// Amount text was not numeric.
    InvalidAmount,
    /// Id text was not an integer.
    InvalidId,
    /// Year or month text was not usable for a monthly summary.
    InvalidMonth,
    /// The expense store could not be written.
    Store,
    /// The CSV export could not be written.
    Export,
    /// The configuration file or home directory is unusable.
    Config,
    /// Reading from or writing to the terminal failed.
    Io,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error with an `ErrorType` classification and the full `anyhow` context chain.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    /// Creates an error from a plain message.
    pub fn msg<S>(error_type: ErrorType, message: S) -> Self
    where
        S: Display + Debug + Send + Sync + 'static,
    {
        Self::new(error_type, anyhow::anyhow!(message))
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Alternate formatting prints the whole context chain, e.g. "outer: inner".
        write!(f, "{:#}", self.inner)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Converts an internal result into the public `Result` with a classification.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::str::FromStr;

    #[test]
    fn test_error_type_display_round_trip() {
        assert_eq!(ErrorType::InvalidDate.to_string(), "invalid_date");
        assert_eq!(
            ErrorType::from_str("invalid_amount").unwrap(),
            ErrorType::InvalidAmount
        );
    }

    #[test]
    fn test_pub_result_keeps_context_chain() {
        let r: anyhow::Result<()> = Err(anyhow::anyhow!("disk full")).context("Unable to save");
        let e = r.pub_result(ErrorType::Store).unwrap_err();
        assert_eq!(e.error_type(), ErrorType::Store);
        assert_eq!(e.to_string(), "Unable to save: disk full");
    }
}
