//! Web Error Types

use derive_more::{Display, Error};

/// A page generation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for page generation.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("issue with page generation from template")]
    Template,
    #[display("invalid URL \"{_0}\"")]
    InvalidUrl(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
