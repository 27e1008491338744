//! Encryption layer for credvault.
//!
//! Protects a wallet's serialized entry list at rest using:
//! - PBKDF2-HMAC-SHA512 for key derivation from the passphrase and salt
//! - AES-256-GCM for authenticated encryption
//! - Zeroization of derived keys on drop
//!
//! # Wire format
//!
//! A sealed payload is `base64(nonce || ciphertext || tag)` with a 12-byte
//! random nonce drawn fresh for every call. The salt travels next to the
//! payload in the wallet file, so the passphrase is the only secret input.
//!
//! Key derivation is deterministic: the same passphrase and salt always yield
//! the same key, which is what lets a wallet be reopened.

mod cipher;
mod error;
mod key;
pub mod random;

pub use cipher::{
    decrypt, decrypt_with_key, encrypt, encrypt_with_key, NONCE_SIZE, TAG_SIZE,
};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, DerivedKey, KdfParams, DEFAULT_ITERATIONS, KEY_SIZE};
pub use random::{generate_salt, random_string, CharClasses, PasswordPolicy, SALT_LENGTH};
