use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Result returning Error
pub type Result<T> = std::result::Result<T, Error>;

/// Scan errors. All except Internal are considered user-facing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Error {
    /// Invalid options or request configuration.
    Config(String),
    /// A bug or an unexpected failure inside the crate.
    Internal(String),
    /// An invalid value supplied by the caller, e.g. an item without its key attributes.
    Value(String),
    /// A failure surfaced by the store client while serving a request.
    Store(String),
    /// A raw record could not be converted into a domain object.
    Conversion(String),
    /// The iterator has no further items.
    Exhausted,
    /// The operation is not supported by a read-only sequence.
    Unsupported(String),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(s)
            | Error::Internal(s)
            | Error::Value(s)
            | Error::Store(s)
            | Error::Conversion(s)
            | Error::Unsupported(s) => write!(f, "{}", s),
            Error::Exhausted => write!(f, "No more items in scan"),
        }
    }
}

impl From<Box<bincode::ErrorKind>> for Error {
    fn from(err: Box<bincode::ErrorKind>) -> Self {
        Error::Internal(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Error::Internal(err.to_string())
    }
}
