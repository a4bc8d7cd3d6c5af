//! Config Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The preference store could not produce a value for the option (store
    /// unavailable, value of the wrong type, unparsable source file). Not the
    /// same thing as the option being unset.
    #[display("cannot read preference: {_0}")]
    Access(#[error(not(source))] String),
    /// An explicitly requested configuration file could not be used.
    #[display("cannot load configuration: {}", _0.display())]
    Load(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A store that failed to initialize may well be ready later on.
        matches!(self, Self::Access(_))
    }
}
