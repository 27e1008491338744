//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while sealing or opening a payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The AEAD tag did not verify: wrong passphrase, wrong salt, or the
    /// ciphertext was modified or truncated.
    #[error("authentication failed (wrong passphrase or corrupted data)")]
    Authentication,

    #[error("invalid payload encoding: {0}")]
    Encoding(String),

    #[error("encryption failed: {0}")]
    Encryption(String),
}
