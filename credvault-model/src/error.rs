//! Entry validation errors.

use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons an entry is rejected before it enters a vault.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("you must generate an id")]
    MissingId,

    #[error("you must define a name")]
    MissingName,

    #[error("the uri isn't a valid uri: {0}")]
    InvalidUri(String),
}
