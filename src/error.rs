//! Command Line Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A command error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("no such file \"{}\"", _0.display())]
    NoSuchFile(#[error(not(source))] PathBuf),
    #[display("couldn't read file \"{}\"", _0.display())]
    ReadFailed(#[error(not(source))] PathBuf),
    #[display("couldn't write to file \"{}\"", _0.display())]
    WriteFailed(#[error(not(source))] PathBuf),
    /// The document could not be decoded, encoded or validated.
    #[display("invalid catalog")]
    Catalog,
    #[display("catalog storage failed")]
    Store,
    #[display("page generation failed")]
    Render,
    #[display("configuration could not be loaded")]
    Config,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
